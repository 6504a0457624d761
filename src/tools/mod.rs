//! Helpers shared by the CLI and benchmarks

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::BinaryGrid;
use crate::utils::raster::is_raster_path;

/// Summary statistics for a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Count of set cells.
    pub set_cells: usize,
    /// Total cells in the grid.
    pub total_cells: usize,
    /// Ratio of set cells to total cells.
    pub set_ratio: f64,
}

/// Count set cells and their share of the grid.
pub fn grid_stats(grid: &BinaryGrid) -> GridStats {
    let set = grid.count_set();
    let total = grid.rows() * grid.cols();
    GridStats {
        rows: grid.rows(),
        cols: grid.cols(),
        set_cells: set,
        total_cells: total,
        set_ratio: set as f64 / total as f64,
    }
}

/// Derive the text output path next to `input`.
///
/// `scan.txt` maps to `scan-<suffix>.txt`. Any other extension is kept in the
/// name, so `scan.png` maps to `scan-png-<suffix>.txt` and never collides
/// with the output of a `scan.txt` in the same directory.
pub fn sibling_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string());
    let name = match input.extension().map(|ext| ext.to_string_lossy()) {
        Some(ext) if !ext.eq_ignore_ascii_case("txt") => {
            format!("{}-{}-{}.txt", stem, ext, suffix)
        }
        _ => format!("{}-{}.txt", stem, suffix),
    };
    input.with_file_name(name)
}

/// Sorted list of grid inputs (`.txt` or raster images) directly inside
/// `root`. Files whose stem already ends in `-<skip_suffix>` are left out so
/// reruns do not pick up their own output.
pub fn collect_grid_files(root: &Path, skip_suffix: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let marker = format!("-{}", skip_suffix);

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            let is_text = path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("txt"))
                .unwrap_or(false);
            is_text || is_raster_path(path)
        })
        .filter(|path| {
            path.file_stem()
                .map(|stem| !stem.to_string_lossy().ends_with(&marker))
                .unwrap_or(true)
        })
        .collect();
    files.sort();
    files
}
