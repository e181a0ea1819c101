//! Rook rays: increasing file, decreasing file, increasing rank, decreasing
//! rank.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{walk_ray, LegalMoves};

pub(crate) const ROOK_DIRECTIONS: [(i16, i16); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub fn generate_rook_moves(position: &Position, from: Square, mover: Color, out: &mut LegalMoves) {
    for (file_step, rank_step) in ROOK_DIRECTIONS {
        walk_ray(position, from, mover, file_step, rank_step, out);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_shared::LegalMoves;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn rook_on_empty_board_reaches_fourteen_squares() {
        let (position, _) = parse_fen("8/8/8/8/3R4/8/8/8 w").expect("FEN should parse");
        let mut out = LegalMoves::default();
        generate_rook_moves(&position, 27, Color::White, &mut out);
        assert_eq!(out.moves.len(), 14);
        assert!(out.captures.is_empty());
    }

    #[test]
    fn rays_stop_at_first_occupant() {
        // Rook d4, own pawn d6, enemy knight f4, enemy pawn d2 behind nothing.
        let (position, _) = parse_fen("8/8/3P4/8/3R1n2/8/3p4/8 w").expect("FEN should parse");
        let mut out = LegalMoves::default();
        generate_rook_moves(&position, 27, Color::White, &mut out);

        // East: e4 then capture f4, nothing past it.
        assert!(out.moves.contains(&28));
        assert!(out.captures.contains(&29));
        assert!(!out.moves.contains(&30));
        // North: d5 then own pawn d6 excluded entirely.
        assert!(out.moves.contains(&35));
        assert!(!out.moves.contains(&43));
        assert!(!out.captures.contains(&43));
        // South: d3 then capture d2, d1 unreachable.
        assert!(out.moves.contains(&19));
        assert!(out.captures.contains(&11));
        assert!(!out.moves.contains(&3));
        // West: c4, b4, a4.
        assert!(out.moves.contains(&24));

        let mut captures = out.captures.clone();
        captures.sort_unstable();
        assert_eq!(captures, vec![11, 29]);
    }
}
