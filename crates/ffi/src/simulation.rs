use crate::error::{DefaultWildfireError, WildfireErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error, with_engine_mut};
use crate::instance::WildfireInstance;

/// Advance the simulation by one tick. No-op once the fire is out.
///
/// Thread-safe: acquires the `RwLock` write lock for the tick.
///
/// Returns
/// - `WildfireErrorCode::Ok` (0) on success
/// - `WildfireErrorCode::NullPointer` if `ptr` is null
/// - `WildfireErrorCode::InvalidConfiguration` if the wind series is exhausted
///
/// # Safety
///
/// `ptr` must be null or a live pointer returned by `wildfire_new`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_step(ptr: *const WildfireInstance) -> WildfireErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        with_engine_mut(instance, |engine| engine.step())??;
        Ok(())
    })
}

/// Step until the fire is out or the tick budget is spent, writing the completed tick
/// count to `out_ticks`.
///
/// # Safety
///
/// - `ptr` must be null or a live pointer returned by `wildfire_new`.
/// - `out_ticks` must be a valid, non-null pointer to a `u64`.
#[no_mangle]
pub unsafe extern "C" fn wildfire_run(
    ptr: *const WildfireInstance,
    out_ticks: *mut u64,
) -> WildfireErrorCode {
    if out_ticks.is_null() {
        return track_error(&DefaultWildfireError::null_pointer("out_ticks"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let ticks = with_engine_mut(instance, |engine| engine.run())??;
        unsafe {
            *out_ticks = ticks;
        }
        Ok(())
    })
}
