use std::ptr;
use std::sync::{Mutex, RwLock};

use wildfire_core::{IgnitionPolicy, SimulationConfig, SpreadEngine};

use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{clear_last_error, track_error};
use crate::queries::MetricsRecord;

/// Ignition rule selector for C callers. Policy constants use their defaults
/// (75-unit drop, 0.6 / 0.4 score weights).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildfirePolicy {
    /// Ignite unless the neighbor sits more than 75 units lower.
    ElevationThreshold = 0,
    /// Ignite when the wind/elevation score reaches the series threshold.
    WindScore = 1,
    /// Ignite every fine neighbor.
    Unconditional = 2,
}

impl From<WildfirePolicy> for IgnitionPolicy {
    fn from(policy: WildfirePolicy) -> Self {
        match policy {
            WildfirePolicy::ElevationThreshold => IgnitionPolicy::elevation_threshold(),
            WildfirePolicy::WindScore => IgnitionPolicy::wind_score(),
            WildfirePolicy::Unconditional => IgnitionPolicy::Unconditional,
        }
    }
}

/// C-compatible run configuration. Terrain and wind bounds use the core defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WildfireConfig {
    /// Grid rows
    pub height: usize,
    /// Grid columns
    pub width: usize,
    /// Probability that a slot holds a tree, in [0, 1]
    pub density: f64,
    /// Column whose trees start on fire
    pub ignition_column: usize,
    pub policy: WildfirePolicy,
    /// Tick budget and wind series length
    pub max_ticks: u64,
    pub seed: u64,
    /// Let freshly lit trees spread within the tick that lit them
    pub cascade_within_tick: bool,
}

impl From<WildfireConfig> for SimulationConfig {
    fn from(config: WildfireConfig) -> Self {
        SimulationConfig {
            height: config.height,
            width: config.width,
            density: config.density,
            ignition_column: config.ignition_column,
            policy: config.policy.into(),
            max_ticks: config.max_ticks,
            seed: config.seed,
            cascade_within_tick: config.cascade_within_tick,
            ..Default::default()
        }
    }
}

/// Default configuration: 100x100 grid, density 0.6, column 0 ignited, elevation rule.
#[no_mangle]
pub extern "C" fn wildfire_default_config() -> WildfireConfig {
    let defaults = SimulationConfig::default();
    WildfireConfig {
        height: defaults.height,
        width: defaults.width,
        density: defaults.density,
        ignition_column: defaults.ignition_column,
        policy: WildfirePolicy::ElevationThreshold,
        max_ticks: defaults.max_ticks,
        seed: defaults.seed,
        cascade_within_tick: defaults.cascade_within_tick,
    }
}

/// A spread engine shared with a renderer or host application.
///
/// The engine sits behind an `RwLock`: queries take the read lock, stepping takes the
/// write lock. The metrics snapshot handed out by `wildfire_get_metrics` is a reused
/// buffer behind a `Mutex`.
pub struct WildfireInstance {
    pub(crate) engine: RwLock<SpreadEngine>,
    /// Cached copy of the metrics series, reused across calls.
    pub(crate) metrics_snapshot: Mutex<Vec<MetricsRecord>>,
}

impl WildfireInstance {
    /// Creates a new instance for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `WildfireErrorCode::InvalidConfiguration` for out-of-range parameters.
    pub(crate) fn new(config: WildfireConfig) -> Result<Box<Self>, DefaultWildfireError> {
        let config = SimulationConfig::from(config);
        let engine = SpreadEngine::new(config)?;
        let capacity = usize::try_from(config.max_ticks).unwrap_or(0).min(10_000);

        Ok(Box::new(Self {
            engine: RwLock::new(engine),
            metrics_snapshot: Mutex::new(Vec::with_capacity(capacity)),
        }))
    }
}

/// Create a new instance and return it via out-parameter.
///
/// - Returns `WildfireErrorCode::Ok` (0) on success with a valid instance in `out_instance`
/// - Returns non-zero on failure with `out_instance` set to null
///
/// Call `wildfire_get_last_error()` for a human-readable description of a failure.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned instance and MUST call `wildfire_destroy` exactly once.
///
/// Example (C++)
/// ```cpp
/// WildfireConfig config = wildfire_default_config();
/// config.density = 0.65;
/// WildfireInstance* sim = nullptr;
/// if (wildfire_new(config, &sim) != WildfireErrorCode::Ok) {
///     fprintf(stderr, "%s\n", wildfire_get_last_error());
///     return;
/// }
/// // ... step and query ...
/// wildfire_destroy(sim);
/// ```
#[no_mangle]
pub unsafe extern "C" fn wildfire_new(
    config: WildfireConfig,
    out_instance: *mut *mut WildfireInstance,
) -> WildfireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_instance"));
    }

    match WildfireInstance::new(config) {
        Ok(instance) => {
            clear_last_error();
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            WildfireErrorCode::Ok
        }
        Err(error) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            track_error(&error)
        }
    }
}

/// Destroys an instance previously created by `wildfire_new`. Null is a no-op.
///
/// # Safety
///
/// - The pointer MUST have been created by `wildfire_new` and not already destroyed.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn wildfire_destroy(ptr: *mut WildfireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `wildfire_new` and is freed once.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
