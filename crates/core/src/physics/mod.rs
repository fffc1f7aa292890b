//! Fire spread rules
//!
//! The ignition decision couples terrain and wind: a burning tree looks at each fine
//! neighbor and a policy decides whether that neighbor catches.

pub mod ignition;

pub use ignition::*;
