//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The automated side maximizes, its opponent minimizes, alternating per ply.
//! Nodes are visited with make/unmake on a single position; per-ply move
//! buffers are reused across siblings.
//!
//! A side with no pseudo-legal moves is scored as a decisive loss for it.
//! Check is not modeled, so this also fires for positions that are merely
//! blocked; it is an approximation, not mate detection.

use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::{generate_all_moves_in_place, CandidateMove};
use crate::search::board_scoring::BoardScorer;

/// Score assigned when the side to move has no moves.
pub const NO_MOVES_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Plies searched, root included. Zero is treated as one.
    pub depth: u8,
    /// Root scores get uniform noise from `[-jitter, jitter)`.
    pub jitter: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            jitter: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<CandidateMove>,
    /// Search value of the chosen move, jitter included.
    pub score: f64,
    pub nodes: u64,
}

struct Searcher<'a, S: BoardScorer> {
    position: Position,
    automated: Color,
    scorer: &'a S,
    buffers: Vec<Vec<CandidateMove>>,
    nodes: u64,
}

impl<S: BoardScorer> Searcher<'_, S> {
    fn minimax(&mut self, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.scorer.score(&self.position, self.automated);
        }

        let color = if maximizing {
            self.automated
        } else {
            self.automated.opposite()
        };

        let mut moves = std::mem::take(&mut self.buffers[depth as usize]);
        generate_all_moves_in_place(&self.position, color, &mut moves);

        let value = if moves.is_empty() {
            if maximizing {
                -NO_MOVES_SCORE
            } else {
                NO_MOVES_SCORE
            }
        } else if maximizing {
            let mut max_eval = i32::MIN;
            for mv in &moves {
                let captured = self.position.make_move(mv.from, mv.to);
                let eval = self.minimax(depth - 1, alpha, beta, false);
                self.position.unmake_move(mv.from, mv.to, captured);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in &moves {
                let captured = self.position.make_move(mv.from, mv.to);
                let eval = self.minimax(depth - 1, alpha, beta, true);
                self.position.unmake_move(mv.from, mv.to, captured);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        };

        self.buffers[depth as usize] = moves;
        value
    }
}

/// Pick a move for `automated` in `position`.
///
/// Each root move is searched with a fresh window; the highest value plus
/// jitter wins, earlier moves winning exact ties.
pub fn find_best_move<S, R>(
    position: &Position,
    automated: Color,
    scorer: &S,
    config: SearchConfig,
    rng: &mut R,
) -> SearchResult
where
    S: BoardScorer,
    R: Rng + ?Sized,
{
    let depth = config.depth.max(1);
    let mut searcher = Searcher {
        position: position.clone(),
        automated,
        scorer,
        buffers: vec![Vec::new(); depth as usize + 1],
        nodes: 1,
    };

    let mut root_moves = Vec::new();
    generate_all_moves_in_place(&searcher.position, automated, &mut root_moves);

    let mut best_move = None;
    let mut best_score = f64::NEG_INFINITY;

    for mv in root_moves {
        let captured = searcher.position.make_move(mv.from, mv.to);
        let score = searcher.minimax(depth - 1, i32::MIN, i32::MAX, false);
        searcher.position.unmake_move(mv.from, mv.to, captured);

        let noise = if config.jitter > 0.0 {
            rng.random_range(-config.jitter..config.jitter)
        } else {
            0.0
        };
        let adjusted = f64::from(score) + noise;

        if adjusted > best_score {
            best_score = adjusted;
            best_move = Some(mv);
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        nodes: searcher.nodes,
    }
}
