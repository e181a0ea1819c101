use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::{channel, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use board_lab::config::{ConfirmMode, OpponentKind, SessionConfig};
use board_lab::game_state::chess_types::{Color, Square};
use board_lab::game_state::session::{ClickOutcome, GameSession};
use board_lab::utils::algebraic::{algebraic_to_square, long_algebraic_to_squares};
use board_lab::utils::move_log::{export_pgn_like, numbered_move_list, render_history};
use board_lab::utils::render_board::{render_board, BoardMarkers};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Color {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::White => Color::White,
            SideArg::Black => Color::Black,
        }
    }
}

#[derive(Parser)]
#[command(name = "board_lab")]
#[command(about = "Terminal chess board with pseudo-legal moves and an automated opponent")]
struct Args {
    /// JSON settings file; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Play against this UCI engine instead of the built-in search
    #[arg(long, value_name = "PATH")]
    engine: Option<PathBuf>,

    /// Search depth for the selected opponent
    #[arg(long)]
    depth: Option<u8>,

    /// Side the human plays; the opponent takes the other one
    #[arg(long, value_enum)]
    human_plays: Option<SideArg>,

    /// Apply moves on the destination click instead of staging them
    #[arg(long)]
    immediate: bool,

    /// No automated opponent
    #[arg(long)]
    no_ai: bool,
}

const HELP: &str = "\
commands:
  click <sq>       select / stage / move, like clicking the square
  select <sq>      select a piece
  target <sq>      stage a destination for the selection
  confirm          apply the staged move
  cancel           clear selection
  move <e2e4>      play a move in one step
  info <sq>        square details
  board            show the board
  history          numbered move list and per-move details
  pgn              PGN-like export
  fen              export the position
  load <fen>       import a position
  json             session snapshot
  ai <white|black|off>
  reset
  quit";

fn build_config(args: &Args) -> Result<SessionConfig, String> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => SessionConfig::default(),
    };

    if let Some(path) = &args.engine {
        config.opponent = OpponentKind::ExternalEngine;
        config.engine_path = Some(path.clone());
    }
    if let Some(depth) = args.depth {
        match config.opponent {
            OpponentKind::Minimax => config.search_depth = depth,
            OpponentKind::ExternalEngine => config.engine_depth = depth,
        }
    }
    if let Some(side) = args.human_plays {
        config.automated_side = Some(Color::from(side).opposite());
    }
    if args.immediate {
        config.confirm_mode = ConfirmMode::Immediate;
    }
    if args.no_ai {
        config.automated_side = None;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_square(text: Option<&str>) -> Result<Square, String> {
    let text = text.ok_or("missing square")?;
    if let Ok(index) = text.parse::<u8>() {
        return if index < 64 {
            Ok(index)
        } else {
            Err(format!("square index out of range: {index}"))
        };
    }
    algebraic_to_square(text).map_err(|e| e.to_string())
}

fn show_board(session: &GameSession) {
    let state = session.state();
    let markers = BoardMarkers {
        selected: state.selected,
        target: state.target,
        legal: state.selection_moves(),
        last_move: state.last_move.map(|m| (m.from, m.to)),
    };
    println!("{}", render_board(&state.position, &markers));

    let status = if session.is_thinking() {
        format!("{} to move ({} thinking...)", state.side_to_move.name(), session.opponent_name())
    } else {
        format!("{} to move", state.side_to_move.name())
    };
    println!("{status}");
}

/// Returns `false` when the user asked to quit.
fn handle_command(session: &mut GameSession, line: &str) -> bool {
    let now = Instant::now();
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };

    match command {
        "quit" | "exit" => return false,
        "help" => println!("{HELP}"),
        "board" => show_board(session),
        "click" => match parse_square(parts.next()) {
            Ok(sq) => {
                match session.click(sq, now) {
                    ClickOutcome::Ignored => println!("wait for your turn"),
                    ClickOutcome::MoveApplied(record) => println!("played {}", record.notation()),
                    _ => {}
                }
                show_board(session);
            }
            Err(err) => println!("{err}"),
        },
        "select" => match parse_square(parts.next()) {
            Ok(sq) => {
                if !session.select_square(sq) {
                    println!("nothing of yours to select there");
                }
                show_board(session);
            }
            Err(err) => println!("{err}"),
        },
        "target" => match parse_square(parts.next()) {
            Ok(sq) => {
                if !session.set_target(sq) {
                    println!("not a destination of the selected piece");
                }
                show_board(session);
            }
            Err(err) => println!("{err}"),
        },
        "confirm" => match session.confirm_move(now) {
            Some(record) => {
                println!("played {}", record.notation());
                show_board(session);
            }
            None => println!("select a piece and a target first"),
        },
        "cancel" => {
            session.cancel_selection();
            show_board(session);
        }
        "move" => match parts.next().map(long_algebraic_to_squares) {
            Some(Ok((from, to))) => match session.play_move(from, to, now) {
                Some(record) => {
                    println!("played {}", record.notation());
                    show_board(session);
                }
                None => println!("illegal move"),
            },
            Some(Err(err)) => println!("{err}"),
            None => println!("usage: move e2e4"),
        },
        "info" => match parse_square(parts.next()) {
            Ok(sq) => match session.inspect_square(sq) {
                Ok(report) => println!("{}", report.describe()),
                Err(err) => println!("{err}"),
            },
            Err(err) => println!("{err}"),
        },
        "history" => {
            for line in numbered_move_list(&session.state().move_history) {
                println!("{line}");
            }
            println!("{}", render_history(&session.state().move_history));
        }
        "pgn" => {
            let today = chrono::Local::now().date_naive();
            print!("{}", export_pgn_like(&session.state().move_history, today));
        }
        "fen" => println!("{}", session.export_fen()),
        "load" => {
            let fen = parts.collect::<Vec<_>>().join(" ");
            if session.import_fen(&fen, now) {
                show_board(session);
            } else {
                println!("invalid position notation");
            }
        }
        "json" => match session.state().to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => println!("{err}"),
        },
        "ai" => {
            let side = match parts.next() {
                Some("white") => Some(Color::White),
                Some("black") => Some(Color::Black),
                Some("off") => None,
                _ => {
                    println!("usage: ai <white|black|off>");
                    return true;
                }
            };
            session.set_automated_side(side, now);
            show_board(session);
        }
        "reset" => {
            session.reset(now);
            show_board(session);
        }
        other => println!("unknown command '{other}', try help"),
    }
    true
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("board_lab=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let mut session = match GameSession::from_config(config) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "could not start session");
            process::exit(1);
        }
    };
    info!(
        opponent = session.opponent_name(),
        automated = session.automated_side().map(Color::name).unwrap_or("none"),
        "session started"
    );

    let (line_tx, line_rx) = channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{HELP}");
    show_board(&session);

    loop {
        match line_rx.try_recv() {
            Ok(line) => {
                if !handle_command(&mut session, line.trim()) {
                    break;
                }
                io::stdout().flush().ok();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                if !session.is_thinking() {
                    break;
                }
            }
        }

        if let Some(record) = session.tick(Instant::now()) {
            println!("opponent played {}", record.notation());
            show_board(&session);
            io::stdout().flush().ok();
        }

        thread::sleep(Duration::from_millis(10));
    }
}
