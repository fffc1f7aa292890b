use std::ptr;

use wildfire_core::{Condition, ConditionCounts, MetricsSample, Position};

use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_engine};
use crate::instance::WildfireInstance;

/// Per-condition tree counts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WildfireCounts {
    pub fine: usize,
    pub on_fire: usize,
    pub burned_out: usize,
}

impl From<ConditionCounts> for WildfireCounts {
    fn from(counts: ConditionCounts) -> Self {
        Self {
            fine: counts.fine,
            on_fire: counts.on_fire,
            burned_out: counts.burned_out,
        }
    }
}

/// Slot state as seen by a renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCondition {
    /// No tree in this slot.
    Empty = 0,
    Fine = 1,
    OnFire = 2,
    BurnedOut = 3,
}

impl From<Condition> for CellCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Fine => Self::Fine,
            Condition::OnFire => Self::OnFire,
            Condition::BurnedOut => Self::BurnedOut,
        }
    }
}

/// Snapshot of one grid slot. `elevation` is 0 for empty slots.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    pub condition: CellCondition,
    pub elevation: f64,
}

/// One entry of the per-tick metrics series.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsRecord {
    /// Zero-based tick index
    pub tick: u64,
    pub fine: usize,
    pub on_fire: usize,
    pub burned_out: usize,
}

impl From<&MetricsSample> for MetricsRecord {
    fn from(sample: &MetricsSample) -> Self {
        Self {
            tick: sample.tick,
            fine: sample.counts.fine,
            on_fire: sample.counts.on_fire,
            burned_out: sample.counts.burned_out,
        }
    }
}

/// Write whether the fire is still burning to `out_running`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_running` must be a valid, non-null pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_is_running(
    ptr: *const WildfireInstance,
    out_running: *mut bool,
) -> WildfireErrorCode {
    if out_running.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_running"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let running = with_engine(instance, |engine| engine.is_running())?;
        unsafe {
            *out_running = running;
        }
        Ok(())
    })
}

/// Write the number of completed ticks to `out_ticks`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_ticks` must be a valid, non-null pointer to a `u64`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_ticks(
    ptr: *const WildfireInstance,
    out_ticks: *mut u64,
) -> WildfireErrorCode {
    if out_ticks.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_ticks"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let ticks = with_engine(instance, |engine| engine.ticks())?;
        unsafe {
            *out_ticks = ticks;
        }
        Ok(())
    })
}

/// Write the live per-condition counts to `out_counts`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_counts` must be a valid, non-null pointer to a `WildfireCounts`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_counts(
    ptr: *const WildfireInstance,
    out_counts: *mut WildfireCounts,
) -> WildfireErrorCode {
    if out_counts.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_counts"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let counts = with_engine(instance, |engine| engine.counts())?;
        unsafe {
            *out_counts = counts.into();
        }
        Ok(())
    })
}

/// Write the state of slot `(x, y)` to `out_cell`.
///
/// Returns `WildfireErrorCode::InvalidPosition` if `(x, y)` is off-grid.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_cell` must be a valid, non-null pointer to a `CellState`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_cell(
    ptr: *const WildfireInstance,
    x: usize,
    y: usize,
    out_cell: *mut CellState,
) -> WildfireErrorCode {
    if out_cell.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_cell"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let snapshot = with_engine(instance, |engine| engine.cell_at(Position::new(x, y)))??;
        let state = snapshot.map_or(
            CellState {
                condition: CellCondition::Empty,
                elevation: 0.0,
            },
            |cell| CellState {
                condition: cell.condition.into(),
                elevation: cell.elevation,
            },
        );
        unsafe {
            *out_cell = state;
        }
        Ok(())
    })
}

/// Return a borrowed pointer to a snapshot of the metrics series, oldest tick first.
///
/// - **DO NOT FREE THIS POINTER**. It stays valid until the next call to this function
///   on the same instance or `wildfire_destroy`.
/// - On error `out_array` is set to null and `out_len` to 0.
///
/// Thread-safe: takes the snapshot `Mutex` and the engine read lock.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_array` and `out_len` must be valid, non-null pointers.
///
/// # Example Usage (C++)
/// ```cpp
/// const MetricsRecord* series = nullptr;
/// uintptr_t len = 0;
/// if (wildfire_get_metrics(sim, &series, &len) == WildfireErrorCode::Ok) {
///     for (uintptr_t i = 0; i < len; i++) {
///         plot(series[i].tick, series[i].on_fire);
///     }
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn wildfire_get_metrics(
    ptr: *const WildfireInstance,
    out_array: *mut *const MetricsRecord,
    out_len: *mut usize,
) -> WildfireErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultWildfireError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut snapshot = instance
            .metrics_snapshot
            .lock()
            .map_err(|_| DefaultWildfireError::lock_poisoned("Mutex"))?;
        snapshot.clear();

        with_engine(instance, |engine| {
            snapshot.extend(engine.metrics().samples().iter().map(MetricsRecord::from));
        })?;

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != WildfireErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }

    result
}
