//! Block-character terminal preview

use crate::models::BinaryGrid;

const SET: &str = "██";
const UNSET: &str = "  ";

/// Terminal preview, two characters per cell so modules look square.
pub fn preview(grid: &BinaryGrid) -> String {
    let mut out = String::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            out.push_str(if grid.get(r, c) { SET } else { UNSET });
        }
        out.push('\n');
    }
    out
}
