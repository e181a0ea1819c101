//! Canonical chess-rule constants.
//!
//! Starting layout literals shared by the position model, the FEN codec and
//! the tests.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank order from the a-file to the h-file, identical for both colors.
pub const STARTING_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// FEN trailer fields the session does not track; always emitted as-is.
pub const FEN_UNTRACKED_TRAILER: &str = "KQkq - 0 1";

/// Rank index a pawn of the given color starts on.
pub const WHITE_PAWN_START_RANK: u8 = 1;
pub const BLACK_PAWN_START_RANK: u8 = 6;
