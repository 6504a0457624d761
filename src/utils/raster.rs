//! Raster projection of grids and the pixel-sampling decoder
//!
//! Rendering draws each cell as a solid `cell_size × cell_size` block, black
//! for set and white for unset. Decoding goes the other way one pixel per
//! cell: dark pixels (luma below the threshold) become set cells.

use std::path::Path;

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::debug::trace;
use crate::error::{GridError, Result};
use crate::models::BinaryGrid;

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([255]);

/// Default luma cut-off for [`decode_raster`], the midpoint of 8-bit gray.
pub const DEFAULT_LUMA_THRESHOLD: u8 = 128;

/// Render a grid to an 8-bit grayscale image of
/// `(cols * cell_size) × (rows * cell_size)` pixels.
pub fn render_grid(grid: &BinaryGrid, cell_size: u32) -> Result<GrayImage> {
    let (width, height) = render_extent(grid, cell_size)?;

    let mut img = GrayImage::from_pixel(width, height, WHITE);
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if !grid.get(r, c) {
                continue;
            }
            let x0 = c as u32 * cell_size;
            let y0 = r as u32 * cell_size;
            for dy in 0..cell_size {
                for dx in 0..cell_size {
                    img.put_pixel(x0 + dx, y0 + dy, BLACK);
                }
            }
        }
    }
    Ok(img)
}

/// Render and save; the file format follows the path's extension.
pub fn save_grid_image<P: AsRef<Path>>(path: P, grid: &BinaryGrid, cell_size: u32) -> Result<()> {
    let path = path.as_ref();
    let img = render_grid(grid, cell_size)?;
    img.save(path).map_err(|source| GridError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(
        "wrote {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

/// Sample every pixel of a grayscale image into a grid cell.
///
/// Rows are converted in parallel; the result is identical to a sequential
/// scan.
pub fn decode_raster(img: &GrayImage, luma_threshold: u8) -> Result<BinaryGrid> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions(format!(
            "image is {}x{} pixels",
            width, height
        )));
    }

    // The container may be longer than the image; only the first
    // width*height samples are pixels.
    let pixels = &img.as_raw()[..width * height];
    let rows: Vec<Vec<bool>> = pixels
        .par_chunks(width)
        .map(|line| line.iter().map(|&luma| luma < luma_threshold).collect::<Vec<bool>>())
        .collect();

    BinaryGrid::from_rows(rows)
}

/// Open a raster file of any supported format and decode it.
pub fn load_grid_image<P: AsRef<Path>>(path: P, luma_threshold: u8) -> Result<BinaryGrid> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|source| GridError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_luma8();
    trace!(
        "decoded {} as {}x{} luma",
        path.display(),
        img.width(),
        img.height()
    );
    decode_raster(&img, luma_threshold)
}

/// True when the extension names a raster format handled by `image`.
pub fn is_raster_path(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Pixel size `(width, height)` that [`render_grid`] would produce.
///
/// Fails for a zero cell size or an image wider or taller than `u32::MAX`.
pub fn render_extent(grid: &BinaryGrid, cell_size: u32) -> Result<(u32, u32)> {
    if cell_size == 0 {
        return Err(GridError::InvalidDimensions("cell size must be at least 1".into()));
    }
    Ok((
        pixel_extent(grid.cols(), cell_size)?,
        pixel_extent(grid.rows(), cell_size)?,
    ))
}

fn pixel_extent(cells: usize, cell_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|n| n.checked_mul(cell_size))
        .ok_or_else(|| {
            GridError::InvalidDimensions(format!(
                "{} cells of {} px exceed the image size limit",
                cells, cell_size
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_size_and_colors() {
        let grid = BinaryGrid::from_fn(2, 3, |r, c| r == 0 && c == 2).unwrap();
        let img = render_grid(&grid, 4).unwrap();
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(8, 0)[0], 0);
        assert_eq!(img.get_pixel(11, 3)[0], 0);
        assert_eq!(img.get_pixel(7, 0)[0], 255);
        assert_eq!(img.get_pixel(8, 4)[0], 255);
    }

    #[test]
    fn test_render_rejects_zero_cell() {
        let grid = BinaryGrid::filled(1, 1, true).unwrap();
        assert!(render_grid(&grid, 0).is_err());
    }

    #[test]
    fn test_render_extent_matches_render() {
        let grid = BinaryGrid::filled(3, 5, false).unwrap();
        assert_eq!(render_extent(&grid, 7).unwrap(), (35, 21));
        assert!(render_extent(&grid, 0).is_err());
        assert!(render_extent(&grid, u32::MAX).is_err());
    }

    #[test]
    fn test_decode_ignores_trailing_container_bytes() {
        // Two spare samples past the 2x2 image.
        let img = GrayImage::from_raw(2, 2, vec![0, 255, 255, 0, 0, 0]).unwrap();
        let grid = decode_raster(&img, DEFAULT_LUMA_THRESHOLD).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![true, false], vec![false, true]]);
    }

    #[test]
    fn test_decode_dark_is_set() {
        let mut img = GrayImage::from_pixel(3, 2, WHITE);
        img.put_pixel(1, 0, BLACK);
        img.put_pixel(2, 1, Luma([127]));
        img.put_pixel(0, 1, Luma([128]));
        let grid = decode_raster(&img, DEFAULT_LUMA_THRESHOLD).unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![vec![false, true, false], vec![false, false, true]]
        );
    }

    #[test]
    fn test_decode_of_render_upsamples() {
        let grid = BinaryGrid::from_fn(3, 3, |r, c| (r + c) % 2 == 0).unwrap();
        let img = render_grid(&grid, 2).unwrap();
        let decoded = decode_raster(&img, DEFAULT_LUMA_THRESHOLD).unwrap();
        assert_eq!((decoded.rows(), decoded.cols()), (6, 6));
        assert_eq!(decoded.get(5, 5), grid.get(2, 2));
        assert_eq!(decoded.get(2, 0), grid.get(1, 0));
    }

    #[test]
    fn test_is_raster_path() {
        assert!(is_raster_path(Path::new("qr.png")));
        assert!(is_raster_path(Path::new("scan.JPG")));
        assert!(!is_raster_path(Path::new("grid.txt")));
    }
}
