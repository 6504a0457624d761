/// Bit-packed binary grid
pub mod grid;

pub use grid::BinaryGrid;
