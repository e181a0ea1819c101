//! FEN-to-Position parser.
//!
//! Only the placement and side-to-move fields are read. Castling, en-passant
//! and clock fields are accepted without inspection because the session does
//! not track them. Decoding is all-or-nothing: the position is built into a
//! fresh value and only returned once every rank checked out.

use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn parse_fen(fen: &str) -> BoardLabResult<(Position, Color)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| BoardLabError::InvalidFen("missing board layout".to_owned()))?;
    let position = parse_placement(board_part)?;
    let side_to_move = parse_side_to_move(parts.next());

    Ok((position, side_to_move))
}

/// Parse the first FEN field (`rnbqkbnr/pppppppp/...`).
pub fn parse_placement(board_part: &str) -> BoardLabResult<Position> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(BoardLabError::InvalidFen(format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut position = Position::empty();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(BoardLabError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                BoardLabError::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;

            if file >= 8 {
                return Err(BoardLabError::InvalidFen(format!(
                    "rank {} has too many files",
                    board_rank + 1
                )));
            }

            position.set((board_rank * 8 + file) as Square, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(BoardLabError::InvalidFen(format!(
                "rank {} accounts for {file} files instead of 8",
                board_rank + 1
            )));
        }
    }

    Ok(position)
}

/// `b` selects black; anything else, including a missing field, is white.
fn parse_side_to_move(side_part: Option<&str>) -> Color {
    match side_part {
        Some("b") => Color::Black,
        _ => Color::White,
    }
}
