//! Pseudo-legal move generation entry points.
//!
//! "Legal" here means geometry and blocking only: no move is rejected for
//! leaving the mover's own king attacked, and castling, en passant and
//! promotion are not generated.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::LegalMoves;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// A from/to pair produced for search or by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    pub from: Square,
    pub to: Square,
}

impl CandidateMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

/// Destinations for `piece` standing on `square`.
///
/// The piece is taken from the argument, not looked up, so callers may ask
/// "what if" questions about squares the piece does not occupy.
pub fn legal_moves(square: Square, piece: Piece, position: &Position) -> LegalMoves {
    let mut out = LegalMoves::default();
    legal_moves_in_place(square, piece, position, &mut out);
    out
}

/// Same as [`legal_moves`] for whatever occupies `square`; empty if nothing.
pub fn legal_moves_from(position: &Position, square: Square) -> LegalMoves {
    match position.get(square) {
        Some(piece) => legal_moves(square, piece, position),
        None => LegalMoves::default(),
    }
}

pub fn legal_moves_in_place(square: Square, piece: Piece, position: &Position, out: &mut LegalMoves) {
    let mover = piece.color;
    match piece.kind {
        PieceKind::King => generate_king_moves(position, square, mover, out),
        PieceKind::Queen => generate_queen_moves(position, square, mover, out),
        PieceKind::Rook => generate_rook_moves(position, square, mover, out),
        PieceKind::Bishop => generate_bishop_moves(position, square, mover, out),
        PieceKind::Knight => generate_knight_moves(position, square, mover, out),
        PieceKind::Pawn => generate_pawn_moves(position, square, mover, out),
    }
}

/// Every pseudo-legal move for `color`, by ascending source square; per piece
/// quiet moves come before captures.
pub fn all_pseudo_legal_moves(position: &Position, color: Color) -> Vec<CandidateMove> {
    let mut out = Vec::new();
    generate_all_moves_in_place(position, color, &mut out);
    out
}

/// Allocation-reusing variant for search. Clears `out` first.
pub fn generate_all_moves_in_place(position: &Position, color: Color, out: &mut Vec<CandidateMove>) {
    out.clear();
    let mut scratch = LegalMoves::default();

    for (from, piece) in position.pieces_of(color) {
        scratch.moves.clear();
        scratch.captures.clear();
        legal_moves_in_place(from, piece, position, &mut scratch);
        out.extend(scratch.destinations().map(|to| CandidateMove::new(from, to)));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn as_set(squares: &[Square]) -> HashSet<Square> {
        squares.iter().copied().collect()
    }

    #[test]
    fn a2_pawn_at_start() {
        let position = Position::initial();
        let result = legal_moves_from(&position, 8);
        assert_eq!(as_set(&result.moves), as_set(&[16, 24]));
        assert!(result.captures.is_empty());
    }

    #[test]
    fn b1_knight_at_start() {
        let position = Position::initial();
        let result = legal_moves_from(&position, 1);
        assert_eq!(as_set(&result.moves), as_set(&[16, 18]));
        assert!(result.captures.is_empty());
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(legal_moves_from(&Position::initial(), 30).is_empty());
    }

    #[test]
    fn starting_position_has_twenty_moves_per_side() {
        let position = Position::initial();
        assert_eq!(all_pseudo_legal_moves(&position, Color::White).len(), 20);
        assert_eq!(all_pseudo_legal_moves(&position, Color::Black).len(), 20);
    }

    #[test]
    fn all_moves_only_for_requested_color() {
        let (position, _) = parse_fen("4k3/8/8/8/8/8/8/4K2R w").expect("FEN should parse");
        let moves = all_pseudo_legal_moves(&position, Color::White);
        assert!(moves.iter().all(|mv| mv.from == 4 || mv.from == 7));
        // King: d1 f1 d2 e2 f2. Rook: g1 f1 then blocked by its own king, h2..h8.
        assert_eq!(moves.len(), 5 + 2 + 7);
    }

    #[test]
    fn candidate_order_is_source_ascending() {
        let moves = all_pseudo_legal_moves(&Position::initial(), Color::White);
        let sources: Vec<Square> = moves.iter().map(|mv| mv.from).collect();
        let mut sorted = sources.clone();
        sorted.sort_unstable();
        assert_eq!(sources, sorted);
        assert_eq!(moves[0], CandidateMove::new(1, 16));
    }

    #[test]
    fn captures_include_kings() {
        // Kings are ordinary targets: there is no check detection.
        let (position, _) = parse_fen("8/8/8/8/8/8/8/Rk6 w").expect("FEN should parse");
        let result = legal_moves_from(&position, 0);
        assert_eq!(result.captures, vec![1]);
    }
}
