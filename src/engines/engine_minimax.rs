use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::engines::engine_trait::{EngineOutput, Opponent, PendingMove};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::search::board_scoring::CenterControlScorer;
use crate::search::minimax::{find_best_move, SearchConfig};

/// Local heuristic opponent: alpha-beta over the pseudo-legal generator,
/// run on a short-lived worker thread per request.
pub struct MinimaxOpponent {
    config: SearchConfig,
    seed: Option<u64>,
    requests: u64,
}

impl MinimaxOpponent {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            seed: None,
            requests: 0,
        }
    }

    /// Deterministic jitter: request `n` searches with `seed + n`.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            seed: Some(seed),
            requests: 0,
        }
    }

    fn next_rng(&mut self) -> StdRng {
        let request = self.requests;
        self.requests += 1;
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(request)),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for MinimaxOpponent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Opponent for MinimaxOpponent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn new_game(&mut self) {
        self.requests = 0;
    }

    fn request_move(&mut self, position: &Position, side_to_move: Color) -> PendingMove {
        let (tx, pending) = PendingMove::channel();
        let position = position.clone();
        let config = self.config;
        let mut rng = self.next_rng();

        let spawned = thread::Builder::new()
            .name("minimax-search".to_owned())
            .spawn(move || {
                let result = find_best_move(&position, side_to_move, &CenterControlScorer, config, &mut rng);
                let output = EngineOutput {
                    best_move: result.best_move,
                    info_lines: vec![format!(
                        "info depth {} score {:.1} nodes {}",
                        config.depth, result.score, result.nodes
                    )],
                };
                if tx.send(output).is_err() {
                    debug!("minimax result discarded, request was cancelled");
                }
            });

        if let Err(err) = spawned {
            // The sender moved into the failed closure and is dropped with it,
            // so the handle already reads as "no move".
            warn!(error = %err, "could not start minimax worker");
        }
        pending
    }
}
