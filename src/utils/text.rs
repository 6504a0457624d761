//! Comma-separated text form of a grid: one line per row, `1` for set.

use std::fs;
use std::path::Path;

use crate::error::{GridError, Result};
use crate::models::BinaryGrid;

/// Parse rows of comma-separated cells.
///
/// Blank lines are skipped and surrounding whitespace (including a `\r`) is
/// stripped from each line. A token that is exactly `1` is set; any other
/// token, `" 1"` included, is unset. Every row must match the first row's width.
pub fn parse_grid(text: &str) -> Result<BinaryGrid> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut expected = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row: Vec<bool> = line.split(',').map(|tok| tok == "1").collect();
        if rows.is_empty() {
            expected = row.len();
        } else if row.len() != expected {
            return Err(GridError::MalformedGrid {
                line: idx + 1,
                expected,
                found: row.len(),
            });
        }
        rows.push(row);
    }

    BinaryGrid::from_rows(rows)
}

/// Inverse of [`parse_grid`]; every row ends with `\n`.
pub fn serialize_grid(grid: &BinaryGrid) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() * 2));
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if c > 0 {
                out.push(',');
            }
            out.push(if grid.get(r, c) { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// Read and parse a text grid file.
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<BinaryGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GridError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(&text)
}

/// Serialize a grid and write it to `path`, replacing any existing file.
pub fn write_grid<P: AsRef<Path>>(path: P, grid: &BinaryGrid) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serialize_grid(grid)).map_err(|source| GridError::Io {
        path: path.to_path_buf(),
        source,
    })
}
