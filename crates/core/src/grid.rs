//! Grid module - the fixed 20x10 occupancy matrix
//!
//! Coordinates are `(row, col)`: row 0 is the top, row 19 the bottom, col 0
//! the left edge. Cells only record occupancy; pieces lose their identity once
//! locked.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One grid row.
pub type Row = [bool; WIDTH];

/// Rows removed by a single clear, as original row indices (bottom to top).
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// Error for checked access outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { row: i8, col: i8 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the {}x{} grid", row, col, HEIGHT, WIDTH)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The game grid - 20 rows x 10 columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [Row; HEIGHT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [[false; WIDTH]; HEIGHT],
        }
    }

    /// Build a grid from text rows (`#` = occupied), aligned to the bottom.
    ///
    /// Handy for setting up stacks in tests; short or missing rows are empty.
    ///
    /// ```
    /// use tick_tetris_core::Grid;
    ///
    /// let grid = Grid::from_bottom(&["#.........", "##########"]);
    /// assert_eq!(grid.is_occupied(18, 0), Ok(true));
    /// assert!(grid.is_row_full(19));
    /// ```
    pub fn from_bottom(pattern: &[&str]) -> Self {
        let mut grid = Self::new();
        let skip = pattern.len().saturating_sub(HEIGHT);
        let start = HEIGHT - (pattern.len() - skip);
        for (offset, line) in pattern.iter().skip(skip).enumerate() {
            for (col, ch) in line.chars().take(WIDTH).enumerate() {
                grid.rows[start + offset][col] = ch == '#';
            }
        }
        grid
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    #[inline(always)]
    pub fn in_bounds(&self, row: i8, col: i8) -> bool {
        row >= 0 && (row as usize) < HEIGHT && col >= 0 && (col as usize) < WIDTH
    }

    /// Occupancy of `(row, col)`.
    pub fn is_occupied(&self, row: i8, col: i8) -> Result<bool, GridError> {
        if !self.in_bounds(row, col) {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(self.rows[row as usize][col as usize])
    }

    /// In bounds and empty.
    #[inline(always)]
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.is_occupied(row, col), Ok(false))
    }

    /// Mark `(row, col)` as permanently filled. Idempotent.
    pub fn occupy(&mut self, row: i8, col: i8) -> Result<(), GridError> {
        if !self.in_bounds(row, col) {
            return Err(GridError::OutOfBounds { row, col });
        }
        self.rows[row as usize][col as usize] = true;
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.iter().all(|&c| c))
    }

    /// Remove every full row, dropping the rows above into place and refilling
    /// the top with empty rows. The grid keeps its height.
    ///
    /// Returns the removed rows' original indices, sorted bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write = HEIGHT;

        // Scan from bottom to top, compacting kept rows downwards.
        for read in (0..HEIGHT).rev() {
            if self.is_row_full(read) {
                cleared.push(read);
            } else {
                write -= 1;
                if write != read {
                    self.rows[write] = self.rows[read];
                }
            }
        }

        for row in &mut self.rows[..write] {
            *row = [false; WIDTH];
        }

        cleared
    }

    pub fn rows(&self) -> &[Row; HEIGHT] {
        &self.rows
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.rows = [[false; WIDTH]; HEIGHT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
