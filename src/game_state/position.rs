//! Board snapshot: which piece stands on which square.
//!
//! The position is a plain 64-slot container. It performs no legality checks;
//! applying a move simply moves the piece and overwrites the destination.
//! Search uses `make_move`/`unmake_move` on one array instead of cloning per
//! node.

use serde::{Deserialize, Serialize};

use crate::errors::BoardLabError;
use crate::game_state::chess_rules::STARTING_BACK_RANK;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_placement;
use crate::utils::fen_parser::parse_placement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    squares: [Option<Piece>; 64],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Standard starting layout: white on indices 0-15, black on 48-63.
    pub fn initial() -> Self {
        let mut position = Self::empty();
        for (file, kind) in STARTING_BACK_RANK.iter().copied().enumerate() {
            let file = file as Square;
            position.set(file, Some(Piece::new(kind, Color::White)));
            position.set(8 + file, Some(Piece::new(PieceKind::Pawn, Color::White)));
            position.set(48 + file, Some(Piece::new(PieceKind::Pawn, Color::Black)));
            position.set(56 + file, Some(Piece::new(kind, Color::Black)));
        }
        position
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares.get(square as usize).copied().flatten()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Place or clear a square. Indices above 63 are ignored.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(slot) = self.squares.get_mut(square as usize) {
            *slot = piece;
        }
    }

    /// Copy of this position with the piece on `from` moved to `to`.
    ///
    /// Whatever stood on `to` is overwritten. An empty `from` yields an
    /// unchanged copy.
    pub fn with_move_applied(&self, from: Square, to: Square) -> Self {
        let mut next = self.clone();
        next.make_move(from, to);
        next
    }

    /// Move in place and return the overwritten occupant of `to`.
    #[inline]
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let Some(moving) = self.get(from) else {
            return None;
        };
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, Some(moving));
        captured
    }

    /// Undo a `make_move` given the occupant it returned.
    #[inline]
    pub fn unmake_move(&mut self, from: Square, to: Square, captured: Option<Piece>) {
        let moving = self.get(to);
        self.set(from, moving);
        self.set(to, captured);
    }

    /// Occupied squares in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|piece| (idx as Square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.iter().count()
    }

    /// One bit per occupied square.
    pub fn occupancy_bitboard(&self) -> u64 {
        self.iter().fold(0u64, |acc, (sq, _)| acc | (1u64 << sq))
    }
}

impl TryFrom<String> for Position {
    type Error = BoardLabError;

    fn try_from(placement: String) -> Result<Self, Self::Error> {
        parse_placement(&placement)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        generate_placement(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_layout() {
        let position = Position::initial();
        assert_eq!(position.piece_count(), 32);
        assert_eq!(
            position.get(0),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(
            position.get(3),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            position.get(4),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            position.get(60),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            position.get(55),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(position.get(30), None);
        assert_eq!(position.occupancy_bitboard(), 0xFFFF_0000_0000_FFFF);
    }

    #[test]
    fn with_move_applied_leaves_original_untouched() {
        let start = Position::initial();
        let next = start.with_move_applied(12, 28);

        assert_eq!(start.get(12).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(next.get(12), None);
        assert_eq!(next.get(28).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(next.piece_count(), 32);
    }

    #[test]
    fn make_and_unmake_restore_capture() {
        let mut position = Position::initial();
        let before = position.clone();

        // Knight b1 lands on the black pawn on b7 (no legality check here).
        let captured = position.make_move(1, 49);
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(position.piece_count(), 31);

        position.unmake_move(1, 49, captured);
        assert_eq!(position, before);
    }

    #[test]
    fn serializes_as_placement_text() {
        let json = serde_json::to_string(&Position::initial()).expect("position should serialize");
        assert_eq!(json, "\"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR\"");

        let back: Position = serde_json::from_str(&json).expect("placement should deserialize");
        assert_eq!(back, Position::initial());
    }
}
