//! Shape module - fixed-capacity boolean piece matrices
//!
//! A shape is stored inline as a 4x4 matrix plus its logical `rows x cols`
//! size, so rotating a piece never allocates. Sub-cell `(i, j)` is row `i`,
//! column `j` of the piece's local frame; `true` marks an occupied sub-cell.

use std::fmt;

use crate::types::{RotateKind, MAX_SHAPE_DIM};

const DIM: usize = MAX_SHAPE_DIM;

/// Boolean piece matrix of at most 4x4 sub-cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[bool; DIM]; DIM],
    rows: u8,
    cols: u8,
}

impl Shape {
    /// Build a shape from text rows, `#` marking an occupied sub-cell.
    ///
    /// Usable in const context; panics at compile time on a ragged or
    /// oversized pattern.
    ///
    /// ```
    /// use tick_tetris_core::Shape;
    ///
    /// let s = Shape::from_pattern(&["#.", "##"]);
    /// assert_eq!((s.rows(), s.cols()), (2, 2));
    /// assert!(s.get(1, 1));
    /// assert!(!s.get(0, 1));
    /// ```
    pub const fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        assert!(rows > 0 && rows <= DIM, "shape rows out of range");
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= DIM, "shape cols out of range");

        let mut cells = [[false; DIM]; DIM];
        let mut i = 0;
        while i < rows {
            let bytes = pattern[i].as_bytes();
            assert!(bytes.len() == cols, "ragged shape pattern");
            let mut j = 0;
            while j < cols {
                cells[i][j] = bytes[j] == b'#';
                j += 1;
            }
            i += 1;
        }

        Self {
            cells,
            rows: rows as u8,
            cols: cols as u8,
        }
    }

    /// A shape with no occupied sub-cells.
    pub const fn empty(rows: u8, cols: u8) -> Self {
        assert!(rows as usize <= DIM && cols as usize <= DIM, "shape exceeds 4x4");
        Self {
            cells: [[false; DIM]; DIM],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupancy of sub-cell `(i, j)`; `false` outside the logical size.
    pub fn get(&self, i: usize, j: usize) -> bool {
        i < self.rows as usize && j < self.cols as usize && self.cells[i][j]
    }

    pub fn set(&mut self, i: usize, j: usize, filled: bool) {
        if i < self.rows as usize && j < self.cols as usize {
            self.cells[i][j] = filled;
        }
    }

    /// Iterate occupied sub-cells as `(i, j)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let cols = self.cols as usize;
        (0..self.rows as usize).flat_map(move |i| {
            (0..cols)
                .filter(move |&j| self.cells[i][j])
                .map(move |j| (i as i8, j as i8))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = Self::empty(self.cols, self.rows);
        for i in 0..self.rows as usize {
            for j in 0..self.cols as usize {
                out.cells[j][i] = self.cells[i][j];
            }
        }
        out
    }

    /// Reverse the order of rows (vertical flip).
    pub fn reverse_rows(&self) -> Self {
        let mut out = Self::empty(self.rows, self.cols);
        let last = (self.rows as usize).saturating_sub(1);
        for i in 0..self.rows as usize {
            out.cells[last - i] = self.cells[i];
        }
        out
    }

    /// Reverse the order of columns (horizontal flip).
    pub fn reverse_cols(&self) -> Self {
        let mut out = Self::empty(self.rows, self.cols);
        let last = (self.cols as usize).saturating_sub(1);
        for i in 0..self.rows as usize {
            for j in 0..self.cols as usize {
                out.cells[i][last - j] = self.cells[i][j];
            }
        }
        out
    }

    /// 90° clockwise: reverse row order, then transpose.
    pub fn rotate_cw(&self) -> Self {
        self.reverse_rows().transpose()
    }

    /// 90° counter-clockwise: transpose, then reverse row order.
    pub fn rotate_ccw(&self) -> Self {
        self.transpose().reverse_rows()
    }

    /// 180°: reverse both row and column order.
    pub fn rotate_half(&self) -> Self {
        self.reverse_rows().reverse_cols()
    }

    pub fn rotated(&self, kind: RotateKind) -> Self {
        match kind {
            RotateKind::Cw => self.rotate_cw(),
            RotateKind::Ccw => self.rotate_ccw(),
            RotateKind::Half => self.rotate_half(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows as usize {
            if i > 0 {
                f.write_str("/")?;
            }
            for j in 0..self.cols as usize {
                f.write_str(if self.cells[i][j] { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Shape = Shape::from_pattern(&[".#.", "###", "..."]);

    #[test]
    fn test_from_pattern_dimensions() {
        let s = Shape::from_pattern(&["....", "####", "....", "...."]);
        assert_eq!(s.rows(), 4);
        assert_eq!(s.cols(), 4);
        assert_eq!(
            s.cells().collect::<Vec<_>>(),
            vec![(1, 0), (1, 1), (1, 2), (1, 3)]
        );
    }

    #[test]
    fn test_rotate_cw_t() {
        assert_eq!(T.rotate_cw().to_string(), ".#./.##/.#.");
    }

    #[test]
    fn test_rotate_ccw_t() {
        assert_eq!(T.rotate_ccw().to_string(), ".#./##./.#.");
    }

    #[test]
    fn test_rotate_half_t() {
        assert_eq!(T.rotate_half().to_string(), ".../###/.#.");
    }

    #[test]
    fn test_rectangular_transpose_swaps_dims() {
        let s = Shape::from_pattern(&["###", "#.."]);
        let t = s.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.to_string(), "##/#./#.");
        assert_eq!(s.rotate_cw().to_string(), "##/.#/.#");
    }

    #[test]
    fn test_get_outside_logical_size_is_false() {
        let s = Shape::from_pattern(&["##", "##"]);
        assert!(!s.get(2, 0));
        assert!(!s.get(0, 3));
    }

    #[test]
    fn test_empty_shape() {
        let s = Shape::empty(3, 3);
        assert!(s.is_empty());
        assert_eq!(s.occupied_count(), 0);
        assert_eq!(s.rotate_cw(), s);
    }
}
