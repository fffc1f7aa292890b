use crate::error::{with_last_error_mut, DefaultWildfireError, FfiError, WildfireErrorCode};
use crate::instance::WildfireInstance;
use std::ffi::CString;
use wildfire_core::SpreadEngine;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FfiError`.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> WildfireErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WildfireErrorCode::Ok;
    });
}

/// Run an FFI body, recording its error (or clearing the last one) and returning the code.
pub(crate) fn handle_ffi_result_error<F>(body: F) -> WildfireErrorCode
where
    F: FnOnce() -> Result<(), DefaultWildfireError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            WildfireErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow an instance from a raw pointer.
///
/// The pointer must be null or come from `wildfire_new` and not have been destroyed.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const WildfireInstance,
) -> Result<&'a WildfireInstance, DefaultWildfireError> {
    // SAFETY: non-null pointers are required to originate from `wildfire_new`
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultWildfireError::null_pointer("ptr"))
}

/// Run `f` under the engine's read lock.
pub(crate) fn with_engine<F, T>(instance: &WildfireInstance, f: F) -> Result<T, DefaultWildfireError>
where
    F: FnOnce(&SpreadEngine) -> T,
{
    let engine = instance
        .engine
        .read()
        .map_err(|_| DefaultWildfireError::lock_poisoned("RwLock"))?;
    Ok(f(&engine))
}

/// Run `f` under the engine's write lock.
pub(crate) fn with_engine_mut<F, T>(
    instance: &WildfireInstance,
    f: F,
) -> Result<T, DefaultWildfireError>
where
    F: FnOnce(&mut SpreadEngine) -> T,
{
    let mut engine = instance
        .engine
        .write()
        .map_err(|_| DefaultWildfireError::lock_poisoned("RwLock"))?;
    Ok(f(&mut engine))
}
