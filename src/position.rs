//! Board coordinates.
//!
//! A [`Position`] is a 0-indexed `(row, col)` pair. Row 0 is Black's home row
//! and rows grow toward White. Positions are plain values: they know nothing
//! about a particular board, so bounds are checked against a size when needed.
//!
//! Two external notations are supported:
//! - the renderer's flat cell index, `index = row * size + col`
//! - algebraic notation, a column letter followed by a 1-based row (`b3` is
//!   row 2, col 1)

use std::fmt;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by a signed displacement.
    ///
    /// Returns `None` when the step leaves the board through row or column 0.
    /// Steps past the far edges produce an out-of-range position, which
    /// [`crate::board::Board::get`] reports as "no piece".
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Convert a renderer cell index into a position.
    pub fn from_index(index: usize, size: usize) -> Option<Position> {
        if size == 0 || index >= size * size {
            return None;
        }
        Some(Position::new(index / size, index % size))
    }

    /// Convert to the renderer's flat cell index.
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Cell jumped over by a capture from `self` to `to`.
    ///
    /// Captures always travel exactly two cells along both axes, so the
    /// midpoint is an integer position.
    pub fn midpoint(self, to: Position) -> Position {
        assert!(
            self.row.abs_diff(to.row) == 2 && self.col.abs_diff(to.col) == 2,
            "capture from {self} to {to} is not a two-cell diagonal jump"
        );
        Position::new((self.row + to.row) / 2, (self.col + to.col) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_cell(*self))
    }
}

/// Parse a cell given either as a flat index (`"17"`) or algebraically (`"b3"`).
///
/// Returns `None` for malformed input or cells outside a `size`x`size` board.
pub fn parse_cell(s: &str, size: usize) -> Option<Position> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        let index = s.parse::<usize>().ok()?;
        return Position::from_index(index, size);
    }

    let bytes = s.as_bytes();
    let col_char = bytes[0].to_ascii_lowercase();
    if !col_char.is_ascii_lowercase() {
        return None;
    }
    let col = (col_char - b'a') as usize;

    let digits = &s[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row = digits.parse::<usize>().ok()?.checked_sub(1)?;

    let pos = Position::new(row, col);
    pos.in_bounds(size).then_some(pos)
}

/// Format a position algebraically (`Position::new(2, 1)` is `"b3"`).
pub fn str_cell(pos: Position) -> String {
    let col = if pos.col < 26 {
        (b'a' + pos.col as u8) as char
    } else {
        '?'
    };
    format!("{col}{}", pos.row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let size = 8;
        for index in 0..size * size {
            let pos = Position::from_index(index, size).unwrap();
            assert_eq!(pos.to_index(size), index);
        }
        assert_eq!(Position::from_index(64, 8), None);
        assert_eq!(Position::from_index(17, 8), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_offset_off_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Position::new(1, 1)));

        let far = Position::new(7, 7).offset(1, 1).unwrap();
        assert!(!far.in_bounds(8));
    }

    #[test]
    fn test_midpoint() {
        let from = Position::new(2, 2);
        assert_eq!(from.midpoint(Position::new(4, 4)), Position::new(3, 3));
        assert_eq!(from.midpoint(Position::new(0, 4)), Position::new(1, 3));
        assert_eq!(from.midpoint(Position::new(4, 0)), Position::new(3, 1));
    }

    #[test]
    #[should_panic]
    fn test_midpoint_rejects_single_step() {
        Position::new(2, 2).midpoint(Position::new(3, 3));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("b3", 8), Some(Position::new(2, 1)));
        assert_eq!(parse_cell("B3", 8), Some(Position::new(2, 1)));
        assert_eq!(parse_cell("17", 8), Some(Position::new(2, 1)));
        assert_eq!(parse_cell("h8", 8), Some(Position::new(7, 7)));
        assert_eq!(parse_cell("i1", 8), None);
        assert_eq!(parse_cell("a0", 8), None);
        assert_eq!(parse_cell("a9", 8), None);
        assert_eq!(parse_cell("64", 8), None);
        assert_eq!(parse_cell("", 8), None);
        assert_eq!(parse_cell("-3", 8), None);
        assert_eq!(parse_cell("b", 8), None);
    }

    #[test]
    fn test_str_cell_roundtrip() {
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                assert_eq!(parse_cell(&str_cell(pos), 8), Some(pos));
            }
        }
        assert_eq!(Position::new(0, 0).to_string(), "a1");
    }
}
