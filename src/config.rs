//! Game configuration.
//!
//! The only free parameter is the board size. Everything else a game needs to
//! know about its geometry (starting layout depth, piece count, promotion rows,
//! which cells are playable) is derived from it here so that no other module
//! hardcodes 8x8 numbers.

use crate::board::{CellColor, Side};
use crate::constants::{DEFAULT_SIZE, EMPTY_MIDDLE_ROWS, MAX_SIZE, MIN_SIZE, STARTING_ROWS};
use crate::error::ConfigError;
use crate::position::Position;

/// Validated board geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl GameConfig {
    /// Validate a board size.
    ///
    /// The size must be even so that both sides get the same playable cells,
    /// and at least [`MIN_SIZE`] so that two empty rows separate the armies.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size % 2 != 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::InvalidSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self { size })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rows each side fills at the start (3 on an 8x8 board).
    pub fn starting_rows(&self) -> usize {
        STARTING_ROWS.min((self.size - EMPTY_MIDDLE_ROWS) / 2)
    }

    /// Men per side at the start; also the number of captures that wins.
    pub fn pieces_per_side(&self) -> usize {
        self.starting_rows() * self.size / 2
    }

    /// Row on which a man of `side` is promoted.
    pub fn promotion_row(&self, side: Side) -> usize {
        promotion_row(self.size, side)
    }
}

/// Row on which a man of `side` is promoted on a `size`x`size` board.
#[inline]
pub fn promotion_row(size: usize, side: Side) -> usize {
    match side {
        Side::Black => size - 1,
        Side::White => 0,
    }
}

/// Static checkerboard coloring. Pieces only ever stand on black cells.
#[inline]
pub fn cell_color(pos: Position) -> CellColor {
    if (pos.row + pos.col) % 2 == 1 {
        CellColor::Black
    } else {
        CellColor::White
    }
}

#[inline]
pub fn is_playable(pos: Position) -> bool {
    cell_color(pos) == CellColor::Black
}
