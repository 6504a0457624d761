//! Grid serialization and display
//!
//! - Text form (comma-separated `0`/`1` rows)
//! - Raster rendering and pixel decoding
//! - Block-character terminal preview

pub mod preview;
pub mod raster;
pub mod text;
