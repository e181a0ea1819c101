//! Bishop rays, bounded by the file and rank edges together.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{walk_ray, LegalMoves};

pub(crate) const BISHOP_DIRECTIONS: [(i16, i16); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn generate_bishop_moves(
    position: &Position,
    from: Square,
    mover: Color,
    out: &mut LegalMoves,
) {
    for (file_step, rank_step) in BISHOP_DIRECTIONS {
        walk_ray(position, from, mover, file_step, rank_step, out);
    }
}
