//! qr_resample - binary grid tools for QR-style captures
//!
//! Loads a binary module grid from comma-separated text or a raster image,
//! strips the quiet zone, and reduces an oversampled capture to its canonical
//! N×N module grid by block voting. Results can be written back as text,
//! rendered to an image, or previewed in the terminal.
//!
//! ```
//! use qr_resample::{BinaryGrid, VoteRule, resample};
//!
//! // A 2x2 module pattern drawn at 3 px per module.
//! let capture = BinaryGrid::from_fn(6, 6, |r, c| (r / 3 + c / 3) % 2 == 0).unwrap();
//! let modules = resample(&capture, 2, 0, VoteRule::Majority).unwrap();
//! assert!(modules.get(0, 0));
//! assert!(!modules.get(0, 1));
//! ```

#![warn(missing_docs)]

/// Pipeline configuration record and env-var defaults
pub mod config;
mod debug;
/// Error taxonomy
pub mod error;
/// Core data structures (BinaryGrid)
pub mod models;
/// End-to-end load/trim/resample/write orchestration
pub mod pipeline;
/// Border trimming, stride sampling and block-vote resampling
pub mod resample;
/// Statistics and file discovery for the CLI
pub mod tools;
/// Text, raster and preview conversions
pub mod utils;

pub use config::{BorderMode, PipelineConfig};
pub use error::{GridError, Result};
pub use models::BinaryGrid;
pub use pipeline::{PipelineReport, load_grid, run};
pub use resample::{VoteRule, auto_trim, has_border, resample, resample_to, trim_border};
