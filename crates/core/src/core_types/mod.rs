//! Core types and utilities

pub mod cell;
pub mod condition;
pub mod error;
pub mod rng;
pub mod spatial;

pub use cell::{Cell, CellSnapshot};
pub use condition::Condition;
pub use error::{Result, WildfireError};
pub use rng::{sim_rng, SimRng};
pub use spatial::Position;
