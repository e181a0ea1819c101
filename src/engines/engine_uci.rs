//! External engine opponent speaking the UCI text protocol.
//!
//! A dedicated actor thread owns the transport and serializes everything the
//! engine sees. Engine output reaches the actor through the same inbox as
//! move requests, so one `recv` loop drives the handshake, the searches and
//! shutdown.
//!
//! Handshake: `uci` -> `uciok` -> `isready` -> `readyok`. Until `readyok`
//! arrives every request resolves at once with no move.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::engines::engine_trait::{EngineOutput, Opponent, PendingMove};
use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::CandidateMove;
use crate::utils::algebraic::long_algebraic_to_squares;
use crate::utils::fen_generator::generate_fen;

/// Outbound half of an engine connection.
pub trait EngineTransport: Send {
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Release the engine. Called once, after `quit` was sent.
    fn terminate(&mut self) {}
}

enum Inbox {
    Search {
        fen: String,
        depth: u8,
        reply: Sender<EngineOutput>,
    },
    Stop,
    EngineLine(String),
    EngineExited,
    Shutdown,
}

/// Handle a transport uses to report engine output to the actor.
#[derive(Clone)]
pub struct EngineEventSink {
    inbox: Sender<Inbox>,
}

impl EngineEventSink {
    /// Returns `false` once the actor is gone.
    pub fn line(&self, line: impl Into<String>) -> bool {
        self.inbox.send(Inbox::EngineLine(line.into())).is_ok()
    }

    pub fn exited(&self) {
        let _ = self.inbox.send(Inbox::EngineExited);
    }
}

/// Engine running as a child process over piped stdio.
pub struct ChildProcessTransport {
    child: Child,
    stdin: ChildStdin,
}

impl ChildProcessTransport {
    pub fn spawn(path: &Path, sink: EngineEventSink) -> BoardLabResult<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BoardLabError::EngineUnavailable("engine stdin not captured".to_owned()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BoardLabError::EngineUnavailable("engine stdout not captured".to_owned()))?;

        thread::Builder::new()
            .name("uci-reader".to_owned())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    match line {
                        Ok(line) => {
                            if !sink.line(line) {
                                return;
                            }
                        }
                        Err(err) => {
                            warn!(error = %err, "engine stdout read failed");
                            break;
                        }
                    }
                }
                sink.exited();
            })?;

        info!(engine = %path.display(), pid = child.id(), "engine process started");
        Ok(Self { child, stdin })
    }
}

impl EngineTransport for ChildProcessTransport {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()
    }

    fn terminate(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        match self.child.wait() {
            Ok(status) => info!(%status, "engine process exited"),
            Err(err) => warn!(error = %err, "could not reap engine process"),
        }
    }
}

/// Parse the move token of a `bestmove` line. `(none)`, a missing token or an
/// unreadable token all mean no move.
pub fn parse_bestmove(line: &str) -> Option<CandidateMove> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return None;
    }
    let token = tokens.next()?;
    if token == "(none)" {
        return None;
    }
    match long_algebraic_to_squares(token) {
        Ok((from, to)) => Some(CandidateMove::new(from, to)),
        Err(err) => {
            warn!(token, error = %err, "unreadable bestmove");
            None
        }
    }
}

struct EngineActor {
    transport: Box<dyn EngineTransport>,
    inbox: Receiver<Inbox>,
    ready: Arc<AtomicBool>,
    alive: bool,
    /// Replies in the order their `go` commands were sent.
    outstanding: VecDeque<Sender<EngineOutput>>,
    info_lines: Vec<String>,
}

impl EngineActor {
    fn send(&mut self, line: &str) {
        debug!(line, "-> engine");
        if let Err(err) = self.transport.send_line(line) {
            warn!(error = %err, line, "engine write failed");
            self.on_exit();
        }
    }

    fn run(mut self) {
        self.send("uci");

        while let Ok(message) = self.inbox.recv() {
            match message {
                Inbox::Search { fen, depth, reply } => self.on_search(fen, depth, reply),
                Inbox::Stop => {
                    if !self.outstanding.is_empty() {
                        self.send("stop");
                    }
                }
                Inbox::EngineLine(line) => self.on_line(line),
                Inbox::EngineExited => self.on_exit(),
                Inbox::Shutdown => break,
            }
        }

        if self.alive {
            self.send("quit");
        }
        self.transport.terminate();
        self.ready.store(false, Ordering::SeqCst);
    }

    fn on_search(&mut self, fen: String, depth: u8, reply: Sender<EngineOutput>) {
        if !self.alive || !self.ready.load(Ordering::SeqCst) {
            let _ = reply.send(EngineOutput::no_move());
            return;
        }
        // Finish the abandoned search first; its bestmove resolves the
        // abandoned reply, which nobody listens to any more.
        if !self.outstanding.is_empty() {
            self.send("stop");
        }
        self.outstanding.push_back(reply);
        self.send(&format!("position fen {fen}"));
        self.send(&format!("go depth {depth}"));
    }

    fn on_line(&mut self, line: String) {
        let trimmed = line.trim();
        debug!(line = trimmed, "<- engine");

        if trimmed == "uciok" {
            self.send("isready");
        } else if trimmed == "readyok" {
            if !self.ready.swap(true, Ordering::SeqCst) {
                info!("engine ready");
            }
        } else if trimmed.starts_with("bestmove") {
            let output = EngineOutput {
                best_move: parse_bestmove(trimmed),
                info_lines: std::mem::take(&mut self.info_lines),
            };
            match self.outstanding.pop_front() {
                Some(reply) => {
                    if reply.send(output).is_err() {
                        debug!("engine answer discarded, request was cancelled");
                    }
                }
                None => debug!("unsolicited bestmove"),
            }
        } else if trimmed.starts_with("info") {
            self.info_lines.push(trimmed.to_owned());
        }
    }

    fn on_exit(&mut self) {
        if self.alive {
            warn!("engine connection lost");
        }
        self.alive = false;
        self.ready.store(false, Ordering::SeqCst);
        for reply in self.outstanding.drain(..) {
            let _ = reply.send(EngineOutput::no_move());
        }
    }
}

/// Opponent backed by an external UCI engine.
pub struct UciOpponent {
    inbox: Sender<Inbox>,
    ready: Arc<AtomicBool>,
    depth: u8,
    actor: Option<JoinHandle<()>>,
}

impl UciOpponent {
    /// Start the actor over a transport built by `connect`.
    pub fn start<F>(depth: u8, connect: F) -> BoardLabResult<Self>
    where
        F: FnOnce(EngineEventSink) -> BoardLabResult<Box<dyn EngineTransport>>,
    {
        let (tx, rx) = channel();
        let transport = connect(EngineEventSink { inbox: tx.clone() })?;
        let ready = Arc::new(AtomicBool::new(false));

        let actor = EngineActor {
            transport,
            inbox: rx,
            ready: Arc::clone(&ready),
            alive: true,
            outstanding: VecDeque::new(),
            info_lines: Vec::new(),
        };
        let handle = thread::Builder::new()
            .name("uci-actor".to_owned())
            .spawn(move || actor.run())?;

        Ok(Self {
            inbox: tx,
            ready,
            depth,
            actor: Some(handle),
        })
    }

    pub fn spawn_process(path: &Path, depth: u8) -> BoardLabResult<Self> {
        Self::start(depth, |sink| {
            let transport = ChildProcessTransport::spawn(path, sink)?;
            Ok(Box::new(transport) as Box<dyn EngineTransport>)
        })
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl Opponent for UciOpponent {
    fn name(&self) -> &str {
        "uci"
    }

    fn request_move(&mut self, position: &Position, side_to_move: Color) -> PendingMove {
        if !self.is_ready() {
            warn!("engine not ready, no move");
            return PendingMove::resolved(EngineOutput::no_move());
        }

        let (reply, pending) = PendingMove::channel();
        let request = Inbox::Search {
            fen: generate_fen(position, side_to_move),
            depth: self.depth,
            reply,
        };
        // A dead actor drops the reply, which the handle reads as no move.
        let _ = self.inbox.send(request);
        pending
    }

    fn cancel(&mut self) {
        let _ = self.inbox.send(Inbox::Stop);
    }
}

impl Drop for UciOpponent {
    fn drop(&mut self) {
        let _ = self.inbox.send(Inbox::Shutdown);
        if let Some(handle) = self.actor.take() {
            let _ = handle.join();
        }
    }
}
