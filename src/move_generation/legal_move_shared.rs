//! Output type and target bookkeeping shared by the per-piece generators.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Pseudo-legal destinations for one piece, split into quiet moves and
/// captures. Order is the scan order of the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMoves {
    pub moves: Vec<Square>,
    pub captures: Vec<Square>,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.captures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len() + self.captures.len()
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.moves.contains(&square) || self.captures.contains(&square)
    }

    #[inline]
    pub fn is_capture(&self, square: Square) -> bool {
        self.captures.contains(&square)
    }

    /// Quiet moves first, then captures.
    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().chain(self.captures.iter()).copied()
    }

    /// One bit per reachable square, for the bitboard display.
    pub fn to_bitboard(&self) -> u64 {
        self.destinations().fold(0u64, |acc, sq| acc | (1u64 << sq))
    }
}

/// Records a sliding/stepping target. Returns `true` when the square was empty
/// and a ray may continue past it.
#[inline]
pub(crate) fn push_target(
    position: &Position,
    mover: Color,
    target: i16,
    out: &mut LegalMoves,
) -> bool {
    if !(0..64).contains(&target) {
        return false;
    }
    let target = target as Square;
    match position.get(target) {
        Some(occupant) => {
            if occupant.color != mover {
                out.captures.push(target);
            }
            false
        }
        None => {
            out.moves.push(target);
            true
        }
    }
}

/// Records `target` only if an enemy piece stands there.
#[inline]
pub(crate) fn push_capture_only(
    position: &Position,
    mover: Color,
    target: i16,
    out: &mut LegalMoves,
) {
    if !(0..64).contains(&target) {
        return;
    }
    let target = target as Square;
    if let Some(occupant) = position.get(target) {
        if occupant.color != mover {
            out.captures.push(target);
        }
    }
}

/// Walk from `from` in steps of `(file_step, rank_step)` until the board edge
/// or the first occupied square.
pub(crate) fn walk_ray(
    position: &Position,
    from: Square,
    mover: Color,
    file_step: i16,
    rank_step: i16,
    out: &mut LegalMoves,
) {
    let mut file = (from % 8) as i16 + file_step;
    let mut rank = (from / 8) as i16 + rank_step;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        if !push_target(position, mover, rank * 8 + file, out) {
            break;
        }
        file += file_step;
        rank += rank_step;
    }
}
