//! Quiet-zone removal.
//!
//! [`has_border`] is a heuristic: a capture whose first row and first column
//! happen to be fully set is treated as bordered even when it is not. Pass an
//! explicit trim to [`trim_border`] when the layout is known.

use crate::debug::trace;
use crate::error::{GridError, Result};
use crate::models::BinaryGrid;

/// Remove `amount` rows from top and bottom and `amount` columns from left
/// and right. Zero returns an unchanged copy.
pub fn trim_border(grid: &BinaryGrid, amount: usize) -> Result<BinaryGrid> {
    if amount == 0 {
        return Ok(grid.clone());
    }
    let remove = amount.saturating_mul(2);
    if remove >= grid.rows() || remove >= grid.cols() {
        return Err(GridError::InvalidDimensions(format!(
            "border trim {} leaves nothing of a {}x{} grid",
            amount,
            grid.rows(),
            grid.cols()
        )));
    }
    grid.crop(amount, amount, grid.rows() - remove, grid.cols() - remove)
}

/// True when every cell of the first row and of the first column is set.
pub fn has_border(grid: &BinaryGrid) -> bool {
    (0..grid.cols()).all(|c| grid.get(0, c)) && (0..grid.rows()).all(|r| grid.get(r, 0))
}

/// Trim `amount` only when [`has_border`] reports a border.
///
/// Returns the resulting grid and whether trimming happened.
pub fn auto_trim(grid: &BinaryGrid, amount: usize) -> Result<(BinaryGrid, bool)> {
    if has_border(grid) {
        trace!("border detected, trimming {} on each side", amount);
        Ok((trim_border(grid, amount)?, amount > 0))
    } else {
        Ok((grid.clone(), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(size: usize, frame: usize) -> BinaryGrid {
        BinaryGrid::from_fn(size, size, |r, c| {
            r < frame || c < frame || r >= size - frame || c >= size - frame || (r * c) % 5 == 1
        })
        .unwrap()
    }

    #[test]
    fn test_trim_border_shape() {
        let grid = framed(10, 2);
        let trimmed = trim_border(&grid, 2).unwrap();
        assert_eq!((trimmed.rows(), trimmed.cols()), (6, 6));
        assert_eq!(trimmed.get(0, 0), grid.get(2, 2));
        assert_eq!(trimmed.get(5, 5), grid.get(7, 7));
    }

    #[test]
    fn test_trim_zero_is_identity() {
        let grid = framed(6, 1);
        assert_eq!(trim_border(&grid, 0).unwrap(), grid);
    }

    #[test]
    fn test_trim_must_leave_a_cell() {
        let grid = BinaryGrid::filled(5, 8, true).unwrap();
        assert!(trim_border(&grid, 2).is_ok());
        assert!(matches!(
            trim_border(&grid, 3),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(trim_border(&grid, usize::MAX).is_err());
    }

    #[test]
    fn test_has_border() {
        assert!(has_border(&framed(8, 1)));
        let open = BinaryGrid::from_fn(8, 8, |r, c| r == 0 && c > 0).unwrap();
        assert!(!has_border(&open));
    }

    #[test]
    fn test_auto_trim_without_border_is_identity() {
        let grid = BinaryGrid::from_fn(7, 7, |r, c| (r + c) % 2 == 1).unwrap();
        let (out, trimmed) = auto_trim(&grid, 2).unwrap();
        assert!(!trimmed);
        assert_eq!(out, grid);
    }

    #[test]
    fn test_auto_trim_with_border() {
        let grid = framed(12, 3);
        let (out, trimmed) = auto_trim(&grid, 3).unwrap();
        assert!(trimmed);
        assert_eq!((out.rows(), out.cols()), (6, 6));
    }
}
