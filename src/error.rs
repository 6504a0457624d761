use std::path::PathBuf;

/// Errors produced while loading, transforming or writing a grid.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// A text row does not have the same number of cells as the first row.
    #[error("malformed grid: line {line} has {found} cells, expected {expected}")]
    MalformedGrid {
        /// 1-based line number in the source text.
        line: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// A size parameter would produce an empty or negative dimension.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
    /// A vote threshold outside the open interval (0, 1).
    #[error("threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),
    /// Reading or writing a text grid failed.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Decoding or encoding a raster image failed.
    #[error("image failure on {}: {source}", path.display())]
    Image {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: image::ImageError,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
