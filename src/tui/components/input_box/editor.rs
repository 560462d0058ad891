//! Row layout and cursor arithmetic for the InputBox.
//!
//! The buffer is hard-wrapped into visual rows, each a byte range into the
//! buffer. Rows break at `\n` and wherever the next character would overflow
//! the width. Breaking at characters instead of words keeps every byte of
//! the buffer on exactly one row, so cursor positions map back exactly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// The box grows with its content up to this many rows, then scrolls
pub(super) const MAX_VISIBLE_LINES: u16 = 5;

/// One visual row as a byte range, newline excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Width available for text inside the block. 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into visual rows. Always returns at least one row.
pub(super) fn visual_rows(text: &str, width: u16) -> Vec<Row> {
    let width = width.max(1) as usize;
    let mut rows = Vec::new();
    let mut start = 0;
    let mut col = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            rows.push(Row { start, end: i });
            start = i + 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col > 0 && col + w > width {
            rows.push(Row { start, end: i });
            start = i;
            col = 0;
        }
        col += w;
    }
    rows.push(Row {
        start,
        end: text.len(),
    });
    rows
}

/// Index of the row holding byte offset `pos`.
///
/// At a soft wrap the end of one row is the start of the next; the cursor
/// belongs to the later row there.
pub(super) fn row_of(rows: &[Row], pos: usize) -> usize {
    rows.iter().rposition(|r| r.start <= pos).unwrap_or(0)
}

/// Cursor (row, display column) for byte offset `pos`.
pub(super) fn cursor_position(text: &str, pos: usize, width: u16) -> (usize, u16) {
    let rows = visual_rows(text, width);
    let row = row_of(&rows, pos);
    let col = text[rows[row].start..pos].width() as u16;
    (row, col)
}

/// Byte offset one row up (`up = true`) or down from `pos`, keeping the
/// display column where possible. `None` at the first/last row.
pub(super) fn move_vertically(text: &str, pos: usize, width: u16, up: bool) -> Option<usize> {
    let rows = visual_rows(text, width);
    let current = row_of(&rows, pos);
    let target = if up {
        current.checked_sub(1)?
    } else {
        let next = current + 1;
        if next >= rows.len() {
            return None;
        }
        next
    };

    let col = text[rows[current].start..pos].width();
    let row = rows[target];
    let mut acc = 0;
    for (i, c) in text[row.start..row.end].char_indices() {
        let w = c.width().unwrap_or(0);
        if acc + w > col {
            return Some(row.start + i);
        }
        acc += w;
    }
    Some(row.end)
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Start of the logical line (after the previous `\n`).
pub(super) fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// End of the logical line (before the next `\n`).
pub(super) fn line_end(text: &str, pos: usize) -> usize {
    text[pos..]
        .find('\n')
        .map(|i| pos + i)
        .unwrap_or(text.len())
}
