//! Spatial structures and environmental fields

pub mod forest_grid;
pub mod terrain;
pub mod wind_series;

// Re-export main types
pub use forest_grid::*;
pub use terrain::*;
pub use wind_series::*;
