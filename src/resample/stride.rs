//! Stride sampling of integer-scaled captures

use crate::error::{GridError, Result};
use crate::models::BinaryGrid;

/// Keep one cell per `stride × stride` tile, the one at
/// (`row_offset`, `col_offset`) inside the tile.
///
/// Useful for captures rendered at an integer number of pixels per module:
/// stride 3 with offsets (1, 1) samples each module's centre pixel.
pub fn sample_stride(
    grid: &BinaryGrid,
    stride: usize,
    row_offset: usize,
    col_offset: usize,
) -> Result<BinaryGrid> {
    if stride == 0 {
        return Err(GridError::InvalidDimensions("stride must be at least 1".into()));
    }
    if row_offset >= stride || col_offset >= stride {
        return Err(GridError::InvalidDimensions(format!(
            "offsets ({}, {}) must be smaller than stride {}",
            row_offset, col_offset, stride
        )));
    }
    let rows = kept(grid.rows(), stride, row_offset);
    let cols = kept(grid.cols(), stride, col_offset);
    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimensions(format!(
            "stride {} with offsets ({}, {}) keeps nothing of a {}x{} grid",
            stride,
            row_offset,
            col_offset,
            grid.rows(),
            grid.cols()
        )));
    }
    BinaryGrid::from_fn(rows, cols, |r, c| {
        grid.get(r * stride + row_offset, c * stride + col_offset)
    })
}

fn kept(len: usize, stride: usize, offset: usize) -> usize {
    if offset >= len {
        0
    } else {
        (len - offset).div_ceil(stride)
    }
}
