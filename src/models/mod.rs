pub mod grid;
pub mod histogram;

pub use grid::Grid;
pub use histogram::Histogram;
