use std::path::Path;

use crate::config::{BorderMode, PipelineConfig};
use crate::debug::trace;
use crate::error::{GridError, Result};
use crate::models::BinaryGrid;
use crate::resample::{auto_trim, resample, trim_border};
use crate::utils::preview::preview;
use crate::utils::raster::{is_raster_path, load_grid_image, render_extent, save_grid_image};
use crate::utils::text::{read_grid, write_grid};

/// Outcome of one [`run`].
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Dimensions of the loaded grid (rows, cols).
    pub source_dims: (usize, usize),
    /// Dimensions after border handling (rows, cols).
    pub trimmed_dims: (usize, usize),
    /// Border cells removed from each edge.
    pub border_removed: usize,
    /// The resampled grid.
    pub grid: BinaryGrid,
}

/// Load a grid from a raster image or a text file, chosen by extension.
pub fn load_grid(path: &Path, luma_threshold: u8) -> Result<BinaryGrid> {
    if is_raster_path(path) {
        load_grid_image(path, luma_threshold)
    } else {
        read_grid(path)
    }
}

/// Load, optionally invert, strip the border, resample and write.
///
/// Inputs whose extension names a raster format are decoded from pixels;
/// everything else is read as a text grid. Target size, vote rule and cell
/// size are checked before the input is opened, and the rendered image size
/// before any output is written, so a rejected run leaves no files behind.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    if config.target_size == 0 {
        return Err(GridError::InvalidDimensions(
            "target size must be at least 1".into(),
        ));
    }
    config.rule.validate()?;
    if config.image_output.is_some() && config.cell_size == 0 {
        return Err(GridError::InvalidDimensions(
            "cell size must be at least 1".into(),
        ));
    }

    let loaded = load_grid(&config.input, config.luma_threshold)?;
    let source_dims = (loaded.rows(), loaded.cols());
    trace!(
        "loaded {} as {}x{}",
        config.input.display(),
        source_dims.0,
        source_dims.1
    );

    let source = if config.invert {
        loaded.inverted()
    } else {
        loaded
    };

    let (trimmed, border_removed) = match config.border {
        BorderMode::None => (source, 0),
        BorderMode::Fixed(amount) => (trim_border(&source, amount)?, amount),
        BorderMode::Auto(amount) => {
            let (grid, trimmed) = auto_trim(&source, amount)?;
            (grid, if trimmed { amount } else { 0 })
        }
    };
    let trimmed_dims = (trimmed.rows(), trimmed.cols());

    let grid = resample(&trimmed, config.target_size, 0, config.rule)?;
    if config.image_output.is_some() {
        render_extent(&grid, config.cell_size)?;
    }

    if let Some(path) = &config.output {
        write_grid(path, &grid)?;
    }
    if let Some(path) = &config.image_output {
        save_grid_image(path, &grid, config.cell_size)?;
    }
    if config.show_preview {
        print!("{}", preview(&grid));
    }

    Ok(PipelineReport {
        source_dims,
        trimmed_dims,
        border_removed,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample::VoteRule;
    use crate::utils::text::serialize_grid;
    use std::fs;

    fn scratch() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn test_run_text_to_text() {
        let dir = scratch();
        let input = dir.path().join("capture.txt");
        let output = dir.path().join("modules.txt");
        // 2x2 modules drawn at 3 px each inside a 1 px set border.
        let capture = BinaryGrid::from_fn(8, 8, |r, c| {
            r == 0 || c == 0 || r == 7 || c == 7 || ((r - 1) / 3 + (c - 1) / 3) % 2 == 0
        })
        .unwrap();
        fs::write(&input, serialize_grid(&capture)).unwrap();

        let mut config = PipelineConfig::new(&input);
        config.output = Some(output.clone());
        config.border = BorderMode::Auto(1);
        config.target_size = 2;

        let report = run(&config).unwrap();
        assert_eq!(report.source_dims, (8, 8));
        assert_eq!(report.trimmed_dims, (6, 6));
        assert_eq!(report.border_removed, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "1,0\n0,1\n");
    }

    #[test]
    fn test_invalid_threshold_writes_nothing() {
        let dir = scratch();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "1,0\n0,1\n").unwrap();

        let mut config = PipelineConfig::new(&input);
        config.output = Some(output.clone());
        config.rule = VoteRule::Above(2.0);

        assert!(matches!(run(&config), Err(GridError::InvalidThreshold(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_zero_cell_size_writes_nothing() {
        let dir = scratch();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        let image = dir.path().join("out.png");
        fs::write(&input, "1,0\n0,1\n").unwrap();

        let mut config = PipelineConfig::new(&input);
        config.target_size = 2;
        config.output = Some(output.clone());
        config.image_output = Some(image.clone());
        config.cell_size = 0;

        assert!(matches!(
            run(&config),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(!output.exists());
        assert!(!image.exists());
    }

    #[test]
    fn test_oversized_render_writes_nothing() {
        let dir = scratch();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "1,0\n0,1\n").unwrap();

        let mut config = PipelineConfig::new(&input);
        config.target_size = 2;
        config.output = Some(output.clone());
        config.image_output = Some(dir.path().join("out.png"));
        config.cell_size = u32::MAX;

        assert!(matches!(
            run(&config),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_zero_target_rejected_before_loading() {
        let dir = scratch();
        let mut config = PipelineConfig::new(dir.path().join("nope.txt"));
        config.target_size = 0;
        assert!(matches!(
            run(&config),
            Err(GridError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_missing_input_is_io_failure() {
        let dir = scratch();
        let config = PipelineConfig::new(dir.path().join("nope.txt"));
        assert!(matches!(run(&config), Err(GridError::Io { .. })));
    }
}
