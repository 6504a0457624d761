use crate::error::{GridError, Result};

/// Immutable rectangular grid of QR modules, `true` meaning set (dark).
///
/// Cells are packed eight to a byte in row-major order. Every public
/// constructor yields at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGrid {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl BinaryGrid {
    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: bool) -> Result<Self> {
        check_dims(rows, cols)?;
        let mut grid = Self::blank(rows, cols);
        if value {
            for r in 0..rows {
                for c in 0..cols {
                    grid.mark(r, c);
                }
            }
        }
        Ok(grid)
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        check_dims(rows, cols)?;
        let mut grid = Self::blank(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                if f(r, c) {
                    grid.mark(r, c);
                }
            }
        }
        Ok(grid)
    }

    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(GridError::InvalidDimensions("grid has no rows".into()));
        };
        let cols = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::MalformedGrid {
                    line: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        Self::from_fn(rows.len(), cols, |r, c| rows[r][c])
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when rows == cols.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Cell at (`row`, `col`); anything outside the grid reads as unset.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let index = row * self.cols + col;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Copy of one row, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<Vec<bool>> {
        (row < self.rows).then(|| (0..self.cols).map(|c| self.get(row, c)).collect())
    }

    /// Nested-vector copy of the whole grid.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.get(r, c)).collect())
            .collect()
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        // Padding bits in the last byte are never written, so they stay zero.
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of set cells inside the half-open window.
    pub fn count_set_in(
        &self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
    ) -> usize {
        let mut count = 0;
        for r in rows {
            for c in cols.clone() {
                if self.get(r, c) {
                    count += 1;
                }
            }
        }
        count
    }

    /// New grid with every cell flipped.
    pub fn inverted(&self) -> Self {
        let mut data: Vec<u8> = self.data.iter().map(|b| !b).collect();
        let total = self.rows * self.cols;
        let tail = total % 8;
        if tail != 0
            && let Some(last) = data.last_mut()
        {
            *last &= (1u8 << tail) - 1;
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// New grid holding the `rows × cols` window whose top-left is (`top`, `left`).
    pub fn crop(&self, top: usize, left: usize, rows: usize, cols: usize) -> Result<Self> {
        if top + rows > self.rows || left + cols > self.cols {
            return Err(GridError::InvalidDimensions(format!(
                "crop {}x{} at ({}, {}) exceeds {}x{} grid",
                rows, cols, top, left, self.rows, self.cols
            )));
        }
        Self::from_fn(rows, cols, |r, c| self.get(top + r, left + c))
    }

    fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; (rows * cols).div_ceil(8)],
        }
    }

    fn mark(&mut self, row: usize, col: usize) {
        let index = row * self.cols + col;
        self.data[index / 8] |= 1 << (index % 8);
    }
}

fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimensions(format!(
            "grid must be at least 1x1, got {}x{}",
            rows, cols
        )));
    }
    Ok(())
}
