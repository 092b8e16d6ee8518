//! Power actions the app shell can request.
//!
//! nRF52840 power modes:
//! - System ON: normal operation
//! - System OFF: deep sleep (~0.3 µA), left only through reset

use defmt::info;
use nrf_softdevice::raw;

/// Enter System OFF. With the SoftDevice enabled this must go through its
/// API rather than the POWER peripheral.
pub fn system_off() -> ! {
    info!("Power: system off");
    unsafe {
        raw::sd_power_system_off();
    }
    // sd_power_system_off only returns on error; fall back to a reset.
    restart()
}

/// Soft reset.
pub fn restart() -> ! {
    info!("Power: restart");
    cortex_m::peripheral::SCB::sys_reset()
}
