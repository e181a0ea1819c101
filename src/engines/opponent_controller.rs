//! Turn-taking for the automated side.
//!
//! A turn goes `Idle -> Waiting (think delay) -> Thinking -> Idle`. At most
//! one request is in flight; `begin_turn` refuses while one is. Every turn
//! gets a fresh generation number and `cancel` bumps it, so a result is only
//! ever reported for the turn that is still current. The pending handle of a
//! cancelled turn is dropped, which closes its channel and makes the
//! strategy's late answer go nowhere.
//!
//! The controller is polled from the session's thread; it never touches
//! session state itself.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engines::engine_trait::{EngineOutput, Opponent, PendingMove, PendingPoll};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;

pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(300);

enum TurnState {
    Idle,
    Waiting {
        due: Instant,
        position: Position,
        side: Color,
    },
    Thinking {
        pending: PendingMove,
        side: Color,
    },
}

/// Answer for one automated turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub generation: u64,
    pub side: Color,
    pub output: EngineOutput,
}

pub struct OpponentController {
    opponent: Box<dyn Opponent>,
    think_delay: Duration,
    state: TurnState,
    generation: u64,
}

impl OpponentController {
    pub fn new(opponent: Box<dyn Opponent>, think_delay: Duration) -> Self {
        Self {
            opponent,
            think_delay,
            state: TurnState::Idle,
            generation: 0,
        }
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// True from `begin_turn` until the result is reported or cancelled.
    pub fn is_thinking(&self) -> bool {
        !matches!(self.state, TurnState::Idle)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule a request for `side` after the think delay. Returns `false`
    /// and does nothing if a turn is already in flight.
    pub fn begin_turn(&mut self, position: &Position, side: Color, now: Instant) -> bool {
        if self.is_thinking() {
            debug!("turn already in flight, request ignored");
            return false;
        }
        self.generation += 1;
        self.state = TurnState::Waiting {
            due: now + self.think_delay,
            position: position.clone(),
            side,
        };
        debug!(generation = self.generation, side = side.name(), "automated turn scheduled");
        true
    }

    /// Advance the turn. Returns the result once, when the strategy answers.
    pub fn poll(&mut self, now: Instant) -> Option<TurnResult> {
        match std::mem::replace(&mut self.state, TurnState::Idle) {
            TurnState::Idle => None,
            TurnState::Waiting { due, position, side } => {
                if now < due {
                    self.state = TurnState::Waiting { due, position, side };
                    return None;
                }
                info!(
                    generation = self.generation,
                    opponent = self.opponent.name(),
                    side = side.name(),
                    "requesting move"
                );
                let pending = self.opponent.request_move(&position, side);
                self.state = TurnState::Thinking { pending, side };
                // A strategy may answer synchronously.
                self.poll(now)
            }
            TurnState::Thinking { pending, side } => match pending.try_poll() {
                PendingPoll::Waiting => {
                    self.state = TurnState::Thinking { pending, side };
                    None
                }
                PendingPoll::Ready(output) => {
                    info!(
                        generation = self.generation,
                        best_move = ?output.best_move,
                        "move resolved"
                    );
                    Some(TurnResult {
                        generation: self.generation,
                        side,
                        output,
                    })
                }
            },
        }
    }

    /// Abandon the in-flight turn, if any.
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.state, TurnState::Idle) {
            TurnState::Idle => {}
            TurnState::Waiting { .. } => {
                self.generation += 1;
                debug!("scheduled turn cancelled");
            }
            TurnState::Thinking { pending, .. } => {
                self.generation += 1;
                self.opponent.cancel();
                drop(pending);
                info!("in-flight request cancelled");
            }
        }
    }

    /// Cancel and tell the strategy a new game started.
    pub fn new_game(&mut self) {
        self.cancel();
        self.opponent.new_game();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Sender;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::move_generation::legal_move_generator::CandidateMove;

    /// Opponent whose answers are released by the test.
    #[derive(Default)]
    struct ManualOpponent {
        requests: Arc<Mutex<Vec<Sender<EngineOutput>>>>,
        cancels: Arc<Mutex<u32>>,
    }

    impl Opponent for ManualOpponent {
        fn name(&self) -> &str {
            "manual"
        }

        fn request_move(&mut self, _position: &Position, _side: Color) -> PendingMove {
            let (tx, pending) = PendingMove::channel();
            self.requests.lock().expect("lock").push(tx);
            pending
        }

        fn cancel(&mut self) {
            *self.cancels.lock().expect("lock") += 1;
        }
    }

    fn manual_controller() -> (OpponentController, Arc<Mutex<Vec<Sender<EngineOutput>>>>, Arc<Mutex<u32>>) {
        let opponent = ManualOpponent::default();
        let requests = Arc::clone(&opponent.requests);
        let cancels = Arc::clone(&opponent.cancels);
        (
            OpponentController::new(Box::new(opponent), Duration::from_millis(300)),
            requests,
            cancels,
        )
    }

    #[test]
    fn request_waits_for_think_delay() {
        let (mut controller, requests, _) = manual_controller();
        let start = Instant::now();
        assert!(controller.begin_turn(&Position::initial(), Color::Black, start));
        assert!(controller.is_thinking());

        assert_eq!(controller.poll(start + Duration::from_millis(100)), None);
        assert!(requests.lock().expect("lock").is_empty());

        assert_eq!(controller.poll(start + Duration::from_millis(300)), None);
        assert_eq!(requests.lock().expect("lock").len(), 1);
    }

    #[test]
    fn result_reported_once_then_idle() {
        let (mut controller, requests, _) = manual_controller();
        let start = Instant::now();
        controller.begin_turn(&Position::initial(), Color::Black, start);
        let later = start + Duration::from_secs(1);
        controller.poll(later);

        let answer = EngineOutput::with_move(CandidateMove::new(52, 36));
        requests.lock().expect("lock")[0]
            .send(answer.clone())
            .expect("handle alive");

        let result = controller.poll(later).expect("result ready");
        assert_eq!(result.side, Color::Black);
        assert_eq!(result.output, answer);
        assert_eq!(result.generation, controller.generation());
        assert!(!controller.is_thinking());
        assert_eq!(controller.poll(later), None);
    }

    #[test]
    fn second_turn_refused_while_in_flight() {
        let (mut controller, requests, _) = manual_controller();
        let start = Instant::now();
        assert!(controller.begin_turn(&Position::initial(), Color::Black, start));
        assert!(!controller.begin_turn(&Position::initial(), Color::Black, start));
        controller.poll(start + Duration::from_secs(1));
        assert!(!controller.begin_turn(&Position::initial(), Color::Black, start));
        assert_eq!(requests.lock().expect("lock").len(), 1);
    }

    #[test]
    fn cancel_drops_late_answer() {
        let (mut controller, requests, cancels) = manual_controller();
        let start = Instant::now();
        controller.begin_turn(&Position::initial(), Color::Black, start);
        controller.poll(start + Duration::from_secs(1));
        let before = controller.generation();

        controller.cancel();
        assert!(!controller.is_thinking());
        assert!(controller.generation() > before);
        assert_eq!(*cancels.lock().expect("lock"), 1);

        let late = requests.lock().expect("lock")[0].send(EngineOutput::no_move());
        assert!(late.is_err());
        assert_eq!(controller.poll(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn cancel_before_delay_skips_request() {
        let (mut controller, requests, cancels) = manual_controller();
        let start = Instant::now();
        controller.begin_turn(&Position::initial(), Color::White, start);
        controller.cancel();
        assert_eq!(controller.poll(start + Duration::from_secs(1)), None);
        assert!(requests.lock().expect("lock").is_empty());
        assert_eq!(*cancels.lock().expect("lock"), 0);
    }

    #[test]
    fn synchronous_answer_resolves_on_same_poll() {
        struct SyncOpponent;
        impl Opponent for SyncOpponent {
            fn name(&self) -> &str {
                "instant"
            }
            fn request_move(&mut self, _position: &Position, _side: Color) -> PendingMove {
                PendingMove::resolved(EngineOutput::no_move())
            }
        }

        let mut controller = OpponentController::new(Box::new(SyncOpponent), Duration::ZERO);
        let now = Instant::now();
        controller.begin_turn(&Position::initial(), Color::White, now);
        let result = controller.poll(now).expect("answered synchronously");
        assert_eq!(result.output.best_move, None);
    }
}
