//! Pawn pushes and diagonal captures.
//!
//! No en passant and no promotion: a pawn on the last rank simply has no
//! forward square.

use crate::game_state::chess_rules::{BLACK_PAWN_START_RANK, WHITE_PAWN_START_RANK};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{push_capture_only, LegalMoves};

pub fn generate_pawn_moves(position: &Position, from: Square, mover: Color, out: &mut LegalMoves) {
    let from_index = from as i16;
    let file = from_index % 8;
    let rank = from / 8;
    let (direction, start_rank) = match mover {
        Color::White => (1i16, WHITE_PAWN_START_RANK),
        Color::Black => (-1i16, BLACK_PAWN_START_RANK),
    };

    let forward = from_index + direction * 8;
    if (0..64).contains(&forward) && !position.is_occupied(forward as Square) {
        out.moves.push(forward as Square);

        // Only reached with the intermediate square empty.
        if rank == start_rank {
            let double_forward = from_index + direction * 16;
            if !position.is_occupied(double_forward as Square) {
                out.moves.push(double_forward as Square);
            }
        }
    }

    if file > 0 {
        push_capture_only(position, mover, forward - 1, out);
    }
    if file < 7 {
        push_capture_only(position, mover, forward + 1, out);
    }
}
