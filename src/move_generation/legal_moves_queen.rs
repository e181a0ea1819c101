use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::LegalMoves;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Union of rook and bishop rays, rook rays first.
pub fn generate_queen_moves(position: &Position, from: Square, mover: Color, out: &mut LegalMoves) {
    generate_rook_moves(position, from, mover, out);
    generate_bishop_moves(position, from, mover, out);
}
