//! Board/game session: selection, move application, history and the hand-off
//! to the automated side.
//!
//! `SessionState` holds the data and its pure transitions. `GameSession`
//! owns one state plus the opponent controller and enforces turn order: while
//! the automated side is to move, or a request is in flight, human input is
//! ignored.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ConfirmMode, OpponentKind, SessionConfig};
use crate::engines::engine_minimax::MinimaxOpponent;
use crate::engines::engine_trait::Opponent;
use crate::engines::engine_uci::UciOpponent;
use crate::engines::opponent_controller::OpponentController;
use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::square_info::{format_bitboard, square_info, try_square_info, SquareInfo};
use crate::move_generation::legal_move_generator::{legal_moves_from, CandidateMove};
use crate::move_generation::legal_move_shared::LegalMoves;
use crate::utils::algebraic::square_to_algebraic;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::move_notation::move_notation;

/// One applied move. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: SquareInfo,
    pub to: SquareInfo,
    pub piece: Piece,
    pub is_capture: bool,
    pub captured_piece: Option<Piece>,
}

impl MoveRecord {
    pub fn notation(&self) -> String {
        move_notation(&self.from, &self.to, self.piece, self.is_capture)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Deselected,
    TargetStaged(Square),
    MoveApplied(MoveRecord),
    /// Input arrived while the human may not act.
    Ignored,
}

/// Everything the board display shows about one square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquareReport {
    pub square: SquareInfo,
    pub piece: Option<Piece>,
    pub legal: LegalMoves,
}

impl SquareReport {
    pub fn describe(&self) -> String {
        let info = &self.square;
        let mut lines = vec![format!(
            "{} index {} file {} rank {} {} bitboard {}",
            info.algebraic,
            info.index,
            info.file,
            info.rank,
            if info.is_light { "light" } else { "dark" },
            format_bitboard(info.bitboard),
        )];

        match self.piece {
            None => lines.push("empty".to_owned()),
            Some(piece) => {
                lines.push(format!(
                    "{} {} {} ({}), value {}",
                    piece.glyph(),
                    piece.color.name(),
                    piece.kind.name(),
                    piece.kind.letter(),
                    piece.kind.display_value(),
                ));
                lines.push(piece.kind.movement_rule().to_owned());
                lines.push(format!("moves: {}", square_list(&self.legal.moves)));
                lines.push(format!("captures: {}", square_list(&self.legal.captures)));
                lines.push(format!("legal bitboard: {}", self.legal.to_bitboard()));
            }
        }
        lines.join("\n")
    }
}

fn square_list(squares: &[Square]) -> String {
    if squares.is_empty() {
        return "-".to_owned();
    }
    squares
        .iter()
        .filter_map(|&sq| square_to_algebraic(sq).ok())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serializable session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub position: Position,
    pub selected: Option<Square>,
    pub target: Option<Square>,
    pub last_move: Option<LastMove>,
    pub move_history: Vec<MoveRecord>,
    pub side_to_move: Color,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            position: Position::initial(),
            selected: None,
            target: None,
            last_move: None,
            move_history: Vec::new(),
            side_to_move: Color::White,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations of the selected piece; empty without a selection.
    pub fn selection_moves(&self) -> LegalMoves {
        match self.selected {
            Some(sq) => legal_moves_from(&self.position, sq),
            None => LegalMoves::default(),
        }
    }

    fn owns(&self, square: Square) -> bool {
        matches!(self.position.get(square), Some(piece) if piece.color == self.side_to_move)
    }

    /// Select `index` if it holds a piece of the side to move, otherwise
    /// clear the selection. The target is cleared either way.
    pub fn select_square(&mut self, index: Square) -> bool {
        self.target = None;
        if index < 64 && self.owns(index) {
            self.selected = Some(index);
            true
        } else {
            self.selected = None;
            false
        }
    }

    /// Stage `index` as the target of the current selection.
    pub fn set_target(&mut self, index: Square) -> bool {
        if self.selected.is_none() || !self.selection_moves().contains(index) {
            return false;
        }
        self.target = Some(index);
        true
    }

    pub fn cancel_selection(&mut self) {
        self.selected = None;
        self.target = None;
    }

    pub fn click(&mut self, index: Square, mode: ConfirmMode) -> ClickOutcome {
        if self.selected.is_some() && self.selection_moves().contains(index) {
            return match mode {
                ConfirmMode::TwoStep => {
                    self.target = Some(index);
                    ClickOutcome::TargetStaged(index)
                }
                ConfirmMode::Immediate => {
                    self.target = Some(index);
                    match self.confirm_move() {
                        Some(record) => ClickOutcome::MoveApplied(record),
                        None => ClickOutcome::Deselected,
                    }
                }
            };
        }

        if self.select_square(index) {
            ClickOutcome::Selected(index)
        } else {
            ClickOutcome::Deselected
        }
    }

    /// Apply the staged selection -> target move.
    pub fn confirm_move(&mut self) -> Option<MoveRecord> {
        let (from, to) = (self.selected?, self.target?);
        self.apply_move(from, to)
    }

    /// Move whatever stands on `from` to `to`, record it and pass the turn.
    /// Only checks that `from` is occupied; callers decide legality.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        if from > 63 || to > 63 {
            return None;
        }
        let piece = self.position.get(from)?;
        let captured_piece = self.position.get(to);

        let record = MoveRecord {
            from: square_info(from),
            to: square_info(to),
            piece,
            is_capture: captured_piece.is_some(),
            captured_piece,
        };

        self.position = self.position.with_move_applied(from, to);
        self.last_move = Some(LastMove { from, to });
        self.selected = None;
        self.target = None;
        self.side_to_move = self.side_to_move.opposite();
        self.move_history.push(record.clone());

        info!(
            ply = self.move_history.len(),
            notation = %record.notation(),
            "move applied"
        );
        Some(record)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the position from FEN. On error nothing changes.
    pub fn import_fen(&mut self, fen: &str) -> BoardLabResult<()> {
        let (position, side_to_move) = parse_fen(fen)?;
        *self = Self {
            position,
            side_to_move,
            ..Self::default()
        };
        Ok(())
    }

    pub fn export_fen(&self) -> String {
        generate_fen(&self.position, self.side_to_move)
    }

    pub fn inspect_square(&self, index: Square) -> BoardLabResult<SquareReport> {
        let square = try_square_info(index)?;
        Ok(SquareReport {
            square,
            piece: self.position.get(index),
            legal: legal_moves_from(&self.position, index),
        })
    }

    pub fn to_json(&self) -> BoardLabResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoardLabError::Config(e.to_string()))
    }
}

pub fn build_opponent(config: &SessionConfig) -> BoardLabResult<Box<dyn Opponent>> {
    match config.opponent {
        OpponentKind::Minimax => Ok(Box::new(MinimaxOpponent::new(config.search_config()))),
        OpponentKind::ExternalEngine => {
            let path = config.engine_path.as_deref().ok_or_else(|| {
                BoardLabError::EngineUnavailable("no engine path configured".to_owned())
            })?;
            Ok(Box::new(UciOpponent::spawn_process(path, config.engine_depth)?))
        }
    }
}

pub struct GameSession {
    state: SessionState,
    config: SessionConfig,
    controller: OpponentController,
    /// Set when the automated side answered "no move" for the current turn,
    /// so it is not asked again until the position changes.
    stalled: bool,
}

impl GameSession {
    pub fn new(config: SessionConfig, controller: OpponentController) -> Self {
        Self {
            state: SessionState::new(),
            config,
            controller,
            stalled: false,
        }
    }

    pub fn from_config(config: SessionConfig) -> BoardLabResult<Self> {
        config.validate()?;
        let opponent = build_opponent(&config)?;
        let controller = OpponentController::new(opponent, config.think_delay());
        Ok(Self::new(config, controller))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn opponent_name(&self) -> &str {
        self.controller.opponent_name()
    }

    pub fn is_thinking(&self) -> bool {
        self.controller.is_thinking()
    }

    pub fn automated_side(&self) -> Option<Color> {
        self.config.automated_side
    }

    fn automated_to_move(&self) -> bool {
        self.config.automated_side == Some(self.state.side_to_move)
    }

    /// Human input is accepted only on the human's turn with nothing in
    /// flight.
    pub fn human_can_act(&self) -> bool {
        !self.is_thinking() && !self.automated_to_move()
    }

    pub fn click(&mut self, index: Square, now: Instant) -> ClickOutcome {
        if !self.human_can_act() {
            debug!(index, "click ignored, not the human's turn");
            return ClickOutcome::Ignored;
        }
        let outcome = self.state.click(index, self.config.confirm_mode);
        if matches!(outcome, ClickOutcome::MoveApplied(_)) {
            self.position_changed(now);
        }
        outcome
    }

    pub fn select_square(&mut self, index: Square) -> bool {
        self.human_can_act() && self.state.select_square(index)
    }

    pub fn set_target(&mut self, index: Square) -> bool {
        self.human_can_act() && self.state.set_target(index)
    }

    pub fn confirm_move(&mut self, now: Instant) -> Option<MoveRecord> {
        if !self.human_can_act() {
            return None;
        }
        let record = self.state.confirm_move()?;
        self.position_changed(now);
        Some(record)
    }

    /// Single-step variant: select `from` and move it to `to` if that is one
    /// of its destinations.
    pub fn play_move(&mut self, from: Square, to: Square, now: Instant) -> Option<MoveRecord> {
        if !self.select_square(from) || !self.state.set_target(to) {
            return None;
        }
        self.confirm_move(now)
    }

    pub fn cancel_selection(&mut self) {
        self.state.cancel_selection();
    }

    pub fn reset(&mut self, now: Instant) {
        self.controller.new_game();
        self.state.reset();
        info!("session reset");
        self.position_changed(now);
    }

    /// Load a FEN position. Returns `false`, with nothing changed, when the
    /// text does not parse.
    pub fn import_fen(&mut self, fen: &str, now: Instant) -> bool {
        let mut candidate = self.state.clone();
        if let Err(err) = candidate.import_fen(fen) {
            warn!(error = %err, "FEN import rejected");
            return false;
        }
        self.controller.cancel();
        self.state = candidate;
        info!(fen = %self.state.export_fen(), "position imported");
        self.position_changed(now);
        true
    }

    pub fn export_fen(&self) -> String {
        self.state.export_fen()
    }

    pub fn inspect_square(&self, index: Square) -> BoardLabResult<SquareReport> {
        self.state.inspect_square(index)
    }

    /// Change which side the opponent plays. Any in-flight request is
    /// abandoned.
    pub fn set_automated_side(&mut self, side: Option<Color>, now: Instant) {
        self.controller.cancel();
        self.config.automated_side = side;
        info!(side = side.map(Color::name).unwrap_or("none"), "automated side changed");
        self.position_changed(now);
    }

    /// Drive the opponent. Returns the automated move when one was applied.
    pub fn tick(&mut self, now: Instant) -> Option<MoveRecord> {
        let mut applied = None;

        if let Some(result) = self.controller.poll(now) {
            if result.side != self.state.side_to_move || !self.automated_to_move() {
                debug!(generation = result.generation, "stale opponent result ignored");
            } else {
                applied = self.apply_automated(result.side, result.output.best_move);
            }
        }

        self.start_turn_if_due(now);
        applied
    }

    fn apply_automated(&mut self, side: Color, best_move: Option<CandidateMove>) -> Option<MoveRecord> {
        let Some(mv) = best_move else {
            info!(side = side.name(), "opponent has no move");
            self.stalled = true;
            return None;
        };

        match self.state.position.get(mv.from) {
            Some(piece) if piece.color == side => {
                self.stalled = false;
                self.state.apply_move(mv.from, mv.to)
            }
            _ => {
                warn!(from = mv.from, to = mv.to, "opponent move does not start on its own piece");
                self.stalled = true;
                None
            }
        }
    }

    fn position_changed(&mut self, now: Instant) {
        self.stalled = false;
        self.start_turn_if_due(now);
    }

    fn start_turn_if_due(&mut self, now: Instant) {
        if self.stalled || !self.automated_to_move() || self.controller.is_thinking() {
            return;
        }
        self.controller
            .begin_turn(&self.state.position, self.state.side_to_move, now);
    }
}
