//! Opponent abstraction used by the turn controller.
//!
//! Every strategy answers a move request asynchronously through a
//! [`PendingMove`] handle. Dropping the handle abandons the request: a
//! strategy that finishes later finds the channel closed and discards its
//! answer.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::CandidateMove;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    /// `None` when the strategy has no move to offer.
    pub best_move: Option<CandidateMove>,
    pub info_lines: Vec<String>,
}

impl EngineOutput {
    pub fn no_move() -> Self {
        Self::default()
    }

    pub fn with_move(mv: CandidateMove) -> Self {
        Self {
            best_move: Some(mv),
            info_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingPoll {
    Waiting,
    Ready(EngineOutput),
}

/// Receiving end of one move request.
#[derive(Debug)]
pub struct PendingMove {
    rx: Receiver<EngineOutput>,
}

impl PendingMove {
    /// A fresh request and the sender the strategy answers on.
    pub fn channel() -> (Sender<EngineOutput>, Self) {
        let (tx, rx) = channel();
        (tx, Self { rx })
    }

    /// A request that is already answered.
    pub fn resolved(output: EngineOutput) -> Self {
        let (tx, pending) = Self::channel();
        // The receiver is alive in `pending`, so the send cannot fail.
        let _ = tx.send(output);
        pending
    }

    /// Non-blocking check. A strategy that hung up without answering counts
    /// as answering "no move".
    pub fn try_poll(&self) -> PendingPoll {
        match self.rx.try_recv() {
            Ok(output) => PendingPoll::Ready(output),
            Err(TryRecvError::Empty) => PendingPoll::Waiting,
            Err(TryRecvError::Disconnected) => PendingPoll::Ready(EngineOutput::no_move()),
        }
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<EngineOutput> {
        match self.rx.recv_timeout(timeout) {
            Ok(output) => Some(output),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(EngineOutput::no_move()),
        }
    }
}

pub trait Opponent: Send {
    fn name(&self) -> &str;

    /// Called on session reset.
    fn new_game(&mut self) {}

    /// Start computing a move for `side_to_move`. Must not block on the
    /// search itself.
    fn request_move(&mut self, position: &Position, side_to_move: Color) -> PendingMove;

    /// Best-effort abort of the in-flight request. The controller drops the
    /// pending handle regardless.
    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_handle_is_ready_immediately() {
        let pending = PendingMove::resolved(EngineOutput::with_move(CandidateMove::new(12, 28)));
        assert_eq!(
            pending.try_poll(),
            PendingPoll::Ready(EngineOutput::with_move(CandidateMove::new(12, 28)))
        );
    }

    #[test]
    fn hung_up_strategy_means_no_move() {
        let (tx, pending) = PendingMove::channel();
        assert_eq!(pending.try_poll(), PendingPoll::Waiting);
        drop(tx);
        assert_eq!(pending.try_poll(), PendingPoll::Ready(EngineOutput::no_move()));
    }

    #[test]
    fn dropped_handle_makes_late_answer_fail_quietly() {
        let (tx, pending) = PendingMove::channel();
        drop(pending);
        assert!(tx.send(EngineOutput::no_move()).is_err());
    }
}
