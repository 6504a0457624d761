//! Block-vote resampling of oversized captures down to a module grid
//!
//! Each target cell covers the source rows `[floor(i*S/T), floor((i+1)*S/T))`
//! and the matching column span. Bounds are derived from the index alone, so
//! the spans along an axis tile the source exactly once with no drift.

pub mod border;
pub mod stride;

use std::ops::Range;

use crate::debug::trace;
use crate::error::{GridError, Result};
use crate::models::BinaryGrid;

pub use border::{auto_trim, has_border, trim_border};
pub use stride::sample_stride;

/// Decision rule turning a block's set-cell count into one module.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VoteRule {
    /// Set when `set / total > threshold`; the threshold lies in (0, 1).
    Above(f64),
    /// Set when set cells are at least as many as unset ones (ties are set).
    #[default]
    Majority,
}

impl VoteRule {
    /// Reject thresholds outside the open interval (0, 1), NaN included.
    pub fn validate(&self) -> Result<()> {
        match *self {
            VoteRule::Above(t) if !(t > 0.0 && t < 1.0) => Err(GridError::InvalidThreshold(t)),
            _ => Ok(()),
        }
    }

    /// Decide a block; an empty block is always unset.
    pub fn decide(&self, set: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        match *self {
            VoteRule::Above(t) => set as f64 / total as f64 > t,
            VoteRule::Majority => set >= total - set,
        }
    }
}

/// Source span covered by target index `index` along one axis.
///
/// Computed with integer arithmetic (`floor(i*S/T)` is exact) and clamped to
/// `source_len`. When `target_len > source_len` some spans are empty.
pub fn block_bounds(source_len: usize, target_len: usize, index: usize) -> Range<usize> {
    let start = (index * source_len / target_len).min(source_len);
    let end = ((index + 1) * source_len / target_len).min(source_len);
    start..end
}

/// Resample `source` to a square `target_size × target_size` grid.
///
/// `border_trim` rows/columns are removed from every edge first. Blocks that
/// clamp to zero source cells resolve to unset.
pub fn resample(
    source: &BinaryGrid,
    target_size: usize,
    border_trim: usize,
    rule: VoteRule,
) -> Result<BinaryGrid> {
    resample_to(source, target_size, target_size, border_trim, rule)
}

/// Rectangular variant of [`resample`].
pub fn resample_to(
    source: &BinaryGrid,
    target_rows: usize,
    target_cols: usize,
    border_trim: usize,
    rule: VoteRule,
) -> Result<BinaryGrid> {
    if target_rows == 0 || target_cols == 0 {
        return Err(GridError::InvalidDimensions(format!(
            "target size must be at least 1x1, got {}x{}",
            target_rows, target_cols
        )));
    }
    rule.validate()?;
    let trimmed = trim_border(source, border_trim)?;

    let src_rows = trimmed.rows();
    let src_cols = trimmed.cols();
    trace!(
        "resample {}x{} (trim {}) -> {}x{} with {:?}",
        source.rows(),
        source.cols(),
        border_trim,
        target_rows,
        target_cols,
        rule
    );

    let col_spans: Vec<Range<usize>> = (0..target_cols)
        .map(|j| block_bounds(src_cols, target_cols, j))
        .collect();

    let mut empty_blocks = 0usize;
    let mut cells = Vec::with_capacity(target_rows);
    for i in 0..target_rows {
        let row_span = block_bounds(src_rows, target_rows, i);
        let mut row = Vec::with_capacity(target_cols);
        for col_span in &col_spans {
            let total = row_span.len() * col_span.len();
            if total == 0 {
                empty_blocks += 1;
            }
            let set = trimmed.count_set_in(row_span.clone(), col_span.clone());
            row.push(rule.decide(set, total));
        }
        cells.push(row);
    }

    if empty_blocks > 0 {
        trace!(
            "{} empty blocks resolved to unset (source {}x{} smaller than target)",
            empty_blocks, src_rows, src_cols
        );
    }

    BinaryGrid::from_rows(cells)
}
