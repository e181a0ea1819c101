use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{push_target, LegalMoves};

/// `(rank_delta, file_delta)` jumps, each checked against both board edges.
const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn generate_knight_moves(
    position: &Position,
    from: Square,
    mover: Color,
    out: &mut LegalMoves,
) {
    let file = (from % 8) as i16;
    let rank = (from / 8) as i16;

    for (rank_delta, file_delta) in KNIGHT_OFFSETS {
        let new_rank = rank + rank_delta;
        let new_file = file + file_delta;
        if (0..8).contains(&new_rank) && (0..8).contains(&new_file) {
            push_target(position, mover, new_rank * 8 + new_file, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_shared::LegalMoves;

    #[test]
    fn knight_from_d4_has_eight_targets() {
        let mut position = Position::empty();
        position.set(27, Some(Piece::new(PieceKind::Knight, Color::White)));
        let mut out = LegalMoves::default();
        generate_knight_moves(&position, 27, Color::White, &mut out);
        assert_eq!(out.moves.len(), 8);
    }

    #[test]
    fn knight_never_wraps_files() {
        let position = Position::empty();
        for from in 0..64u8 {
            let mut out = LegalMoves::default();
            generate_knight_moves(&position, from, Color::Black, &mut out);
            for to in out.destinations() {
                let file_gap = (from % 8).abs_diff(to % 8);
                let rank_gap = (from / 8).abs_diff(to / 8);
                assert!(file_gap <= 2, "{from} -> {to} wrapped");
                assert_eq!(file_gap + rank_gap, 3);
            }
        }
    }

    #[test]
    fn corner_knight_has_two_targets() {
        let mut out = LegalMoves::default();
        generate_knight_moves(&Position::empty(), 63, Color::White, &mut out);
        let mut moves = out.moves.clone();
        moves.sort_unstable();
        assert_eq!(moves, vec![46, 53]);
    }
}
