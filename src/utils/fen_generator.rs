use crate::game_state::chess_rules::FEN_UNTRACKED_TRAILER;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Encode a position and side to move. Castling, en-passant and clocks are not
/// tracked, so the trailer is always `KQkq - 0 1`.
pub fn generate_fen(position: &Position, side_to_move: Color) -> String {
    format!(
        "{} {} {}",
        generate_placement(position),
        side_to_move.fen_char(),
        FEN_UNTRACKED_TRAILER
    )
}

/// First FEN field: ranks 8 down to 1, run-length encoded empties.
pub fn generate_placement(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match position.get(rank * 8 + file) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_encodes_to_standard_fen() {
        assert_eq!(
            generate_fen(&Position::initial(), Color::White),
            STARTING_POSITION_FEN
        );
    }

    #[test]
    fn round_trip_after_moves() {
        let position = Position::initial()
            .with_move_applied(12, 28)
            .with_move_applied(57, 42)
            .with_move_applied(3, 39);
        let fen = generate_fen(&position, Color::Black);

        assert_eq!(
            fen,
            "r1bqkbnr/pppppppp/2n5/7Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 0 1"
        );

        let (reparsed, side) = parse_fen(&fen).expect("generated FEN should parse");
        assert_eq!(reparsed, position);
        assert_eq!(side, Color::Black);
    }

    #[test]
    fn custom_fen_keeps_placement_but_resets_trailer() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let (position, side) = parse_fen(fen).expect("custom FEN should parse");
        assert_eq!(
            generate_fen(&position, side),
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b KQkq - 0 1"
        );
    }

    #[test]
    fn empty_board() {
        assert_eq!(
            generate_fen(&Position::empty(), Color::White),
            "8/8/8/8/8/8/8/8 w KQkq - 0 1"
        );
    }
}
