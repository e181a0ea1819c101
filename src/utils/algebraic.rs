//! Square conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (`e4`, case-insensitive) and
//! square indices, and between four-character engine moves (`e2e4`) and
//! index pairs.

use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as `"e4"` or `"E4"` to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> BoardLabResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(BoardLabError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(BoardLabError::InvalidAlgebraic(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index to lowercase coordinate notation.
#[inline]
pub fn square_to_algebraic(square: Square) -> BoardLabResult<String> {
    if square > 63 {
        return Err(BoardLabError::SquareOutOfRange(square));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Parse the leading four characters of a coordinate move (`e2e4`, `e7e8q`).
///
/// A promotion suffix is ignored; promotion is not modeled.
pub fn long_algebraic_to_squares(mv: &str) -> BoardLabResult<(Square, Square)> {
    if !(4..=5).contains(&mv.len()) || !mv.is_ascii() {
        return Err(BoardLabError::InvalidAlgebraic(mv.to_owned()));
    }
    let from = algebraic_to_square(&mv[0..2])?;
    let to = algebraic_to_square(&mv[2..4])?;
    Ok((from, to))
}

pub fn squares_to_long_algebraic(from: Square, to: Square) -> BoardLabResult<String> {
    Ok(format!(
        "{}{}",
        square_to_algebraic(from)?,
        square_to_algebraic(to)?
    ))
}
