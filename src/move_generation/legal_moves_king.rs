//! One-step king moves. Castling is not generated.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{push_target, LegalMoves};

const KING_STEPS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub fn generate_king_moves(position: &Position, from: Square, mover: Color, out: &mut LegalMoves) {
    let from_index = from as i16;
    let file = from_index % 8;

    for step in KING_STEPS {
        let target = from_index + step;
        if !(0..64).contains(&target) {
            continue;
        }
        // Index arithmetic alone would let h1 + 1 land on a2.
        if ((target % 8) - file).abs() > 1 {
            continue;
        }
        push_target(position, mover, target, out);
    }
}
