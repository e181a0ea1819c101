//! Short display notation for the move list.
//!
//! `<piece letter><pawn source file><x><destination>`, e.g. `Nf3`, `exd5`,
//! `Qxh7`. There is no disambiguation between identical pieces and no check
//! or mate suffix.

use crate::game_state::chess_types::*;
use crate::game_state::square_info::SquareInfo;

pub fn move_notation(from: &SquareInfo, to: &SquareInfo, piece: Piece, is_capture: bool) -> String {
    let mut out = String::with_capacity(6);

    if piece.kind != PieceKind::Pawn {
        out.push(piece.kind.letter());
    } else if is_capture {
        out.push(from.file.letter().to_ascii_lowercase());
    }

    if is_capture {
        out.push('x');
    }

    out.push_str(&to.algebraic.to_ascii_lowercase());
    out
}
