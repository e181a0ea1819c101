//! Pluggable board evaluation.
//!
//! Search stays independent of the heuristic by scoring through the
//! `BoardScorer` trait. The default scorer counts material and rewards
//! central squares.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; positive is good for it.
    fn score(&self, position: &Position, perspective: Color) -> i32;
}

/// Centre bonus by square index, symmetric around the middle, zero on the
/// outer ring.
#[rustfmt::skip]
pub const CENTER_BONUS: [i32; 64] = [
    0,  0,  0,  0,  0,  0,  0,  0,
    0,  5,  5,  5,  5,  5,  5,  0,
    0,  5, 10, 15, 15, 10,  5,  0,
    0,  5, 15, 20, 20, 15,  5,  0,
    0,  5, 15, 20, 20, 15,  5,  0,
    0,  5, 10, 15, 15, 10,  5,  0,
    0,  5,  5,  5,  5,  5,  5,  0,
    0,  0,  0,  0,  0,  0,  0,  0,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CenterControlScorer;

impl CenterControlScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    #[inline]
    fn square_worth(square: Square, piece: Piece) -> i32 {
        let bonus = if piece.kind == PieceKind::King {
            0
        } else {
            CENTER_BONUS[square as usize]
        };
        Self::piece_value(piece.kind) + bonus
    }
}

impl BoardScorer for CenterControlScorer {
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        position.iter().fold(0i32, |acc, (square, piece)| {
            let worth = Self::square_worth(square, piece);
            if piece.color == perspective {
                acc + worth
            } else {
                acc - worth
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_is_balanced() {
        let position = Position::initial();
        assert_eq!(CenterControlScorer.score(&position, Color::White), 0);
        assert_eq!(CenterControlScorer.score(&position, Color::Black), 0);
    }

    #[test]
    fn bonus_table_is_symmetric() {
        for sq in 0..64usize {
            let file = sq % 8;
            let rank = sq / 8;
            assert_eq!(CENTER_BONUS[sq], CENTER_BONUS[rank * 8 + (7 - file)]);
            assert_eq!(CENTER_BONUS[sq], CENTER_BONUS[(7 - rank) * 8 + file]);
            if file == 0 || file == 7 || rank == 0 || rank == 7 {
                assert_eq!(CENTER_BONUS[sq], 0);
            }
        }
    }

    #[test]
    fn central_knight_and_king_exemption() {
        // White knight e4 (bonus 20), black king e5 (no bonus).
        let (position, _) = parse_fen("8/8/8/4k3/4N3/8/8/8 w").expect("FEN should parse");
        assert_eq!(
            CenterControlScorer.score(&position, Color::White),
            320 + 20 - 20000
        );
        assert_eq!(
            CenterControlScorer.score(&position, Color::Black),
            20000 - 320 - 20
        );
    }
}
