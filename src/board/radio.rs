//! BLE GAP scanner behind the library's [`NetworkScanner`] seam.
//!
//! The scanner app calls [`BoardScanner`], which only touches a shared
//! [`ScanTable`] and raises a signal. [`radio_task`] waits for that signal,
//! runs one SoftDevice scan window and records every advertisement into the
//! table, so the tick never waits on the radio.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::central;
use nrf_softdevice::Softdevice;
use temaos::config::SCAN_DURATION_SECS;
use temaos::radio::{Network, NetworkScanner, ScanStatus, ScanTable};

/// Results of the current or last scan.
static SCAN_TABLE: Mutex<CriticalSectionRawMutex, RefCell<ScanTable>> =
    Mutex::new(RefCell::new(ScanTable::new()));

/// Raised by the UI to start a scan.
static SCAN_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Handle the app uses; all state lives in the statics above.
pub struct BoardScanner;

impl NetworkScanner for BoardScanner {
    fn start_scan(&mut self) {
        SCAN_TABLE.lock(|t| t.borrow_mut().begin());
        SCAN_REQUEST.signal(());
    }

    fn status(&self) -> ScanStatus {
        SCAN_TABLE.lock(|t| t.borrow().status())
    }

    fn network(&self, index: usize) -> Option<Network> {
        SCAN_TABLE.lock(|t| t.borrow().network(index))
    }

    fn clear(&mut self) {
        SCAN_TABLE.lock(|t| t.borrow_mut().clear());
    }
}

/// One scan window. Returns false if the SoftDevice refused the scan.
async fn scan(sd: &Softdevice) -> bool {
    info!("BLE scan starting ({} s window)", SCAN_DURATION_SECS);

    let config = central::ScanConfig {
        // Active scan to retrieve scan-response data (device names).
        active: true,
        ..Default::default()
    };

    let window = Timer::after(Duration::from_secs(SCAN_DURATION_SECS));
    let scanning = central::scan(sd, &config, |params| {
        let data =
            unsafe { core::slice::from_raw_parts(params.data.p_data, params.data.len as usize) };
        let room = SCAN_TABLE.lock(|t| t.borrow_mut().record(params.peer_addr.addr, params.rssi, data));
        // Return None to keep scanning, Some(()) to stop.
        if room {
            None
        } else {
            Some(())
        }
    });

    match select(scanning, window).await {
        Either::First(Ok(())) => true,
        Either::First(Err(_e)) => {
            warn!("BLE scan ended with error");
            false
        }
        // Window closed; dropping the scan future stops the radio.
        Either::Second(()) => true,
    }
}

/// Serve scan requests forever.
#[embassy_executor::task]
pub async fn radio_task(sd: &'static Softdevice) -> ! {
    loop {
        SCAN_REQUEST.wait().await;
        let ok = scan(sd).await;
        SCAN_TABLE.lock(|t| t.borrow_mut().finish(ok));
    }
}
