//! Wildfire Spread Simulation Core Library
//!
//! A cellular fire-spread model over a discrete grid of trees. Each tree cell carries a
//! terrain elevation and a one-way fire condition (`Fine -> OnFire -> BurnedOut`). Every
//! tick a random-activation scheduler visits each tree once; burning trees decide whether
//! to ignite their von Neumann neighbors using a selectable ignition policy driven by
//! elevation and a pre-generated wind series.
//!
//! ## Components
//!
//! - [`ElevationField`]: Gaussian-smoothed synthetic terrain
//! - [`WindSeries`]: bounded time series of integer wind speed/direction samples
//! - [`Grid`] and [`Cell`]: tree placement, conditions and neighbor lookups
//! - [`RandomActivation`]: per-tick randomized activation order
//! - [`SpreadEngine`]: orchestration, ignition seeding and termination
//! - [`MetricsCollector`]: per-tick condition counts for reporting
//! - [`BatchRunner`]: parallel parameter sweeps over many seeded runs
//!
//! All randomness flows from one seeded [`SimRng`], so identical configurations produce
//! identical runs.

// Core types and utilities
pub mod core_types;

// Spatial structures and environmental fields
pub mod grid;

// Ignition rules
pub mod physics;

// Scheduling, orchestration and reporting
pub mod simulation;

// Re-export core types
pub use core_types::{sim_rng, Cell, CellSnapshot, Condition, Position, SimRng};
pub use core_types::{Result, WildfireError};

// Re-export grid and environment types
pub use grid::{ElevationConfig, ElevationField, Grid, WindConfig, WindSample, WindSeries};

// Re-export ignition types
pub use physics::{IgnitionPolicy, TickConditions};

// Re-export simulation types
pub use simulation::{
    BatchResult, BatchRunner, ConditionCounts, MetricsCollector, MetricsSample,
    RandomActivation, SimulationConfig, SpreadEngine,
};
