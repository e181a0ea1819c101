//! Linear index <-> coordinate model.
//!
//! Every square is derived from its index (`index == rank_index * 8 +
//! file_index`); nothing here holds state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

const FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

impl File {
    #[inline]
    pub const fn from_index(file_index: u8) -> Self {
        FILES[(file_index & 7) as usize]
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Everything the board display knows about one square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareInfo {
    pub index: Square,
    pub file: File,
    /// 1-based rank.
    pub rank: u8,
    /// Uppercase file + rank, e.g. `E4`.
    pub algebraic: String,
    pub is_light: bool,
    pub bitboard: u64,
}

impl SquareInfo {
    #[inline]
    pub fn file_index(&self) -> u8 {
        self.file.index()
    }

    #[inline]
    pub fn rank_index(&self) -> u8 {
        self.rank - 1
    }
}

/// Derive the square for `index`.
///
/// # Panics
/// If `index > 63`. Callers validate user input with [`try_square_info`].
pub fn square_info(index: Square) -> SquareInfo {
    assert!(index < 64, "square index out of range: {index}");

    let file_index = index % 8;
    let rank_index = index / 8;
    let file = File::from_index(file_index);
    let rank = rank_index + 1;

    SquareInfo {
        index,
        file,
        rank,
        algebraic: format!("{}{}", file.letter(), rank),
        is_light: (file_index + rank_index) % 2 == 1,
        bitboard: 1u64 << index,
    }
}

pub fn try_square_info(index: Square) -> BoardLabResult<SquareInfo> {
    if index > 63 {
        return Err(BoardLabError::SquareOutOfRange(index));
    }
    Ok(square_info(index))
}

/// All 64 squares, position in the vector equals the square index.
pub fn all_squares() -> Vec<SquareInfo> {
    (0..64).map(square_info).collect()
}

/// Compact bitboard label: small values verbatim, larger ones as `2^n`.
pub fn format_bitboard(value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let power = 63 - value.leading_zeros();
    if power < 10 {
        value.to_string()
    } else {
        format!("2^{power}")
    }
}
