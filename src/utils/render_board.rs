//! Terminal-oriented Unicode board renderer.
//!
//! Rank 8 at the top, `a` file on the left. Each square is three columns
//! wide so markers can bracket the piece:
//!
//! - `[x]` selected square
//! - `<x>` staged target
//! - `(x)` capturable piece of the current selection
//! - ` • ` empty legal destination
//! - `{x}` either end of the last move

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::LegalMoves;

/// Highlights drawn on top of the pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardMarkers {
    pub selected: Option<Square>,
    pub target: Option<Square>,
    pub legal: LegalMoves,
    pub last_move: Option<(Square, Square)>,
}

pub fn render_board(position: &Position, markers: &BoardMarkers) -> String {
    let mut out = String::new();

    out.push_str("   a  b  c  d  e  f  g  h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let sq = rank * 8 + file;
            let (open, close) = brackets(sq, markers);
            out.push(open);
            out.push(square_char(position, sq, markers));
            out.push(close);
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("   a  b  c  d  e  f  g  h");
    out
}

fn brackets(square: Square, markers: &BoardMarkers) -> (char, char) {
    if markers.selected == Some(square) {
        ('[', ']')
    } else if markers.target == Some(square) {
        ('<', '>')
    } else if markers.legal.is_capture(square) {
        ('(', ')')
    } else if matches!(markers.last_move, Some((from, to)) if from == square || to == square) {
        ('{', '}')
    } else {
        (' ', ' ')
    }
}

fn square_char(position: &Position, square: Square, markers: &BoardMarkers) -> char {
    match position.get(square) {
        Some(piece) => piece.glyph(),
        None if markers.legal.moves.contains(&square) => '•',
        None => '·',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_moves_from;

    #[test]
    fn initial_board_layout() {
        let text = render_board(&Position::initial(), &BoardMarkers::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8  ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜  8");
        assert_eq!(lines[5], "4  ·  ·  ·  ·  ·  ·  ·  ·  4");
        assert_eq!(lines[8], "1  ♖  ♘  ♗  ♕  ♔  ♗  ♘  ♖  1");
    }

    #[test]
    fn selection_and_destinations_are_marked() {
        let position = Position::initial();
        let markers = BoardMarkers {
            selected: Some(12),
            target: Some(28),
            legal: legal_moves_from(&position, 12),
            last_move: None,
        };
        let text = render_board(&position, &markers);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[7].contains("[♙]"));
        assert!(lines[5].contains("<•>"));
        assert!(lines[6].contains(" • "));
    }

    #[test]
    fn last_move_and_capture_markers() {
        let mut position = Position::initial();
        position.make_move(12, 28);
        position.make_move(51, 35);
        let markers = BoardMarkers {
            selected: Some(28),
            target: None,
            legal: legal_moves_from(&position, 28),
            last_move: Some((51, 35)),
        };
        let text = render_board(&position, &markers);
        let lines: Vec<&str> = text.lines().collect();
        // d5 pawn is both the last move and capturable; capture wins.
        assert!(lines[4].contains("(♟)"));
        assert!(lines[2].contains("{·}"));
    }
}
