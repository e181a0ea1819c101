//! Move history text: numbered move list, per-move detail lines and a
//! PGN-like export.
//!
//! The export carries the seven standard header tags but no result
//! adjudication (the result is always `*`), since the session does not
//! detect game end.

use chrono::NaiveDate;

use crate::game_state::chess_types::Color;
use crate::game_state::session::MoveRecord;
use crate::game_state::square_info::format_bitboard;

/// One row per full move: `1. e4 e5`. A history that starts with black
/// opens with `1... e5`.
pub fn numbered_move_list(history: &[MoveRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut number = 1u32;
    let mut current = String::new();

    for record in history {
        match record.piece.color {
            Color::White => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    number += 1;
                }
                current = format!("{number}. {}", record.notation());
            }
            Color::Black => {
                if current.is_empty() {
                    current = format!("{number}... {}", record.notation());
                } else {
                    current.push(' ');
                    current.push_str(&record.notation());
                }
                lines.push(std::mem::take(&mut current));
                number += 1;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Detail line for one history entry, e.g.
/// `#3 ♘ G1 (6, 64) -> F3 (21, 2^21)` with a capture suffix when relevant.
pub fn describe_record(ordinal: usize, record: &MoveRecord) -> String {
    let mut line = format!(
        "#{ordinal} {} {} ({}, {}) -> {} ({}, {})",
        record.piece.glyph(),
        record.from.algebraic,
        record.from.index,
        format_bitboard(record.from.bitboard),
        record.to.algebraic,
        record.to.index,
        format_bitboard(record.to.bitboard),
    );

    if let Some(captured) = record.captured_piece.filter(|_| record.is_capture) {
        line.push_str(&format!(" captured {}", captured.glyph()));
    }
    line
}

pub fn render_history(history: &[MoveRecord]) -> String {
    if history.is_empty() {
        return "No moves yet".to_owned();
    }
    history
        .iter()
        .enumerate()
        .map(|(idx, record)| describe_record(idx + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_pgn_like(history: &[MoveRecord], date: NaiveDate) -> String {
    let date_value = date.format("%Y.%m.%d").to_string();
    let headers = [
        ("Event", "Board Lab Game"),
        ("Site", "Local"),
        ("Date", date_value.as_str()),
        ("Round", "-"),
        ("White", "White"),
        ("Black", "Black"),
        ("Result", "*"),
    ];

    let mut out = String::new();
    for (key, value) in headers {
        out.push_str(&format!("[{key} \"{value}\"]\n"));
    }
    out.push('\n');

    let mut movetext = numbered_move_list(history);
    movetext.push("*".to_owned());
    out.push_str(&movetext.join(" "));
    out.push('\n');
    out
}
