//! C ABI for the wildfire spread engine.
//!
//! Lets an external renderer or host application create a run, step it, and read cell
//! snapshots, live counts and the metrics series between ticks. A C header is generated
//! at build time.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{wildfire_get_last_error, wildfire_get_last_error_code, WildfireErrorCode};
pub use instance::{
    wildfire_default_config, wildfire_destroy, wildfire_new, WildfireConfig, WildfireInstance,
    WildfirePolicy,
};
pub use queries::{
    wildfire_get_cell, wildfire_get_counts, wildfire_get_metrics, wildfire_get_ticks,
    wildfire_is_running, CellCondition, CellState, MetricsRecord, WildfireCounts,
};
pub use simulation::{wildfire_run, wildfire_step};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn small_config() -> WildfireConfig {
        WildfireConfig {
            height: 6,
            width: 6,
            density: 1.0,
            seed: 9,
            max_ticks: 100,
            ..wildfire_default_config()
        }
    }

    fn create(config: WildfireConfig) -> *mut WildfireInstance {
        let mut sim: *mut WildfireInstance = ptr::null_mut();
        let code = unsafe { wildfire_new(config, &mut sim) };
        assert_eq!(code, WildfireErrorCode::Ok);
        assert!(!sim.is_null());
        sim
    }

    #[test]
    fn create_step_query_destroy() {
        let sim = create(small_config());

        let mut counts = WildfireCounts::default();
        assert_eq!(unsafe { wildfire_get_counts(sim, &mut counts) }, WildfireErrorCode::Ok);
        assert_eq!(counts.fine + counts.on_fire + counts.burned_out, 36);
        assert_eq!(counts.on_fire, 6);

        assert_eq!(unsafe { wildfire_step(sim) }, WildfireErrorCode::Ok);

        let mut cell = CellState {
            condition: CellCondition::Empty,
            elevation: 0.0,
        };
        assert_eq!(unsafe { wildfire_get_cell(sim, 0, 0, &mut cell) }, WildfireErrorCode::Ok);
        assert_eq!(cell.condition, CellCondition::BurnedOut);
        assert!(cell.elevation > 0.0);

        let mut ticks = 0_u64;
        assert_eq!(unsafe { wildfire_run(sim, &mut ticks) }, WildfireErrorCode::Ok);
        assert!(ticks >= 1);

        let mut running = true;
        assert_eq!(unsafe { wildfire_is_running(sim, &mut running) }, WildfireErrorCode::Ok);
        assert!(!running);

        let mut series: *const MetricsRecord = ptr::null();
        let mut len = 0_usize;
        assert_eq!(
            unsafe { wildfire_get_metrics(sim, &mut series, &mut len) },
            WildfireErrorCode::Ok
        );
        assert_eq!(len as u64, ticks);
        let records = unsafe { std::slice::from_raw_parts(series, len) };
        assert_eq!(records[0].tick, 0);
        assert_eq!(records[len - 1].on_fire, 0);

        unsafe { wildfire_destroy(sim) };
    }

    #[test]
    fn invalid_config_reports_error() {
        let mut sim: *mut WildfireInstance = ptr::null_mut();
        let config = WildfireConfig {
            density: 1.5,
            ..small_config()
        };
        let code = unsafe { wildfire_new(config, &mut sim) };
        assert_eq!(code, WildfireErrorCode::InvalidConfiguration);
        assert!(sim.is_null());
        assert_eq!(wildfire_get_last_error_code(), WildfireErrorCode::InvalidConfiguration);

        let message = unsafe { CStr::from_ptr(wildfire_get_last_error()) };
        assert!(message.to_string_lossy().contains("density"));
    }

    #[test]
    fn off_grid_cell_is_invalid_position() {
        let sim = create(small_config());
        let mut cell = CellState {
            condition: CellCondition::Empty,
            elevation: 0.0,
        };
        assert_eq!(
            unsafe { wildfire_get_cell(sim, 6, 0, &mut cell) },
            WildfireErrorCode::InvalidPosition
        );

        // A later success clears the error
        let mut running = false;
        assert_eq!(unsafe { wildfire_is_running(sim, &mut running) }, WildfireErrorCode::Ok);
        assert!(wildfire_get_last_error().is_null());

        unsafe { wildfire_destroy(sim) };
    }

    #[test]
    fn null_pointers_are_rejected() {
        assert_eq!(unsafe { wildfire_step(ptr::null()) }, WildfireErrorCode::NullPointer);
        assert_eq!(
            unsafe { wildfire_new(small_config(), ptr::null_mut()) },
            WildfireErrorCode::NullPointer
        );

        let mut len = 5_usize;
        assert_eq!(
            unsafe { wildfire_get_metrics(ptr::null(), ptr::null_mut(), &mut len) },
            WildfireErrorCode::NullPointer
        );
        assert_eq!(len, 0);

        // Destroying null is a no-op
        unsafe { wildfire_destroy(ptr::null_mut()) };
    }
}
