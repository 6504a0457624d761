//! Pipeline configuration
//!
//! Everything a run needs is carried in [`PipelineConfig`]. Env vars only
//! seed defaults through [`PipelineConfig::from_env_defaults`]; the resampler
//! itself never reads the environment.

use std::path::PathBuf;

use crate::resample::VoteRule;
use crate::utils::raster::DEFAULT_LUMA_THRESHOLD;

/// Canonical module count of a version-3 QR symbol.
pub const DEFAULT_TARGET_SIZE: usize = 29;
/// Pixels per module when rendering.
pub const DEFAULT_CELL_SIZE: u32 = 10;
/// Border removed when auto-detection fires and no amount is given.
pub const DEFAULT_AUTO_BORDER: usize = 9;

fn parse_env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
}

/// How the quiet zone is handled before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Keep every source cell.
    #[default]
    None,
    /// Always remove this many cells from each edge.
    Fixed(usize),
    /// Remove this many cells only when the first row and column are all set.
    Auto(usize),
}

/// Explicit record driving [`crate::pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Text grid or raster image to read.
    pub input: PathBuf,
    /// Where the resampled text grid is written.
    pub output: Option<PathBuf>,
    /// Optional rendered image of the result.
    pub image_output: Option<PathBuf>,
    /// Pixels per module for `image_output`.
    pub cell_size: u32,
    /// Luma cut-off used when `input` is a raster.
    pub luma_threshold: u8,
    /// Flip every cell right after loading.
    pub invert: bool,
    /// Quiet-zone handling.
    pub border: BorderMode,
    /// Side length of the square result.
    pub target_size: usize,
    /// Block decision rule.
    pub rule: VoteRule,
    /// Print a block-character preview of the result.
    pub show_preview: bool,
}

impl PipelineConfig {
    /// Config with built-in defaults for everything but the input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            image_output: None,
            cell_size: DEFAULT_CELL_SIZE,
            luma_threshold: DEFAULT_LUMA_THRESHOLD,
            invert: false,
            border: BorderMode::None,
            target_size: DEFAULT_TARGET_SIZE,
            rule: VoteRule::Majority,
            show_preview: false,
        }
    }

    /// Like [`PipelineConfig::new`] but seeded from `GRID_TARGET_SIZE`,
    /// `GRID_THRESHOLD`, `GRID_CELL_SIZE` and `GRID_AUTO_BORDER`.
    ///
    /// Unparseable values fall back to the built-in default.
    pub fn from_env_defaults(input: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(input);
        if let Some(size) = parse_env_usize("GRID_TARGET_SIZE").filter(|&s| s > 0) {
            config.target_size = size;
        }
        if let Some(t) = parse_env_f64("GRID_THRESHOLD") {
            config.rule = VoteRule::Above(t);
        }
        config.cell_size = parse_env_u32("GRID_CELL_SIZE", DEFAULT_CELL_SIZE).max(1);
        if std::env::var_os("GRID_AUTO_BORDER").is_some() {
            let amount = parse_env_usize("GRID_AUTO_BORDER").unwrap_or(DEFAULT_AUTO_BORDER);
            config.border = BorderMode::Auto(amount);
        }
        config
    }
}
