//! Network scanner seam.
//!
//! The scanner app only sees [`NetworkScanner`]: start a scan, poll its
//! status, read results by index. On the board the scan itself runs in the
//! radio task and fills a [`ScanTable`]; the app never waits on it.

pub mod adv_parser;

use crate::config::SCAN_MAX_RESULTS;
use heapless::{String, Vec};

/// Progress of the most recent scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanStatus {
    /// No scan requested since the last clear.
    Idle,
    Running,
    Failed,
    /// Finished with this many results.
    Done(usize),
}

/// One scan result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub name: String<32>,
    /// Signal strength in dBm.
    pub rssi: i8,
}

pub trait NetworkScanner {
    /// Request a new scan; previous results are dropped.
    fn start_scan(&mut self);

    fn status(&self) -> ScanStatus;

    /// Result `index` of a finished scan, strongest first.
    fn network(&self, index: usize) -> Option<Network>;

    /// Drop results and return to [`ScanStatus::Idle`].
    fn clear(&mut self);
}

/// Accumulates advertisements during a scan, one entry per address.
pub struct ScanTable {
    entries: Vec<([u8; 6], Network), SCAN_MAX_RESULTS>,
    status: ScanStatus,
}

impl Default for ScanTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanTable {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            status: ScanStatus::Idle,
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    /// Start collecting a new scan.
    pub fn begin(&mut self) {
        self.entries.clear();
        self.status = ScanStatus::Running;
    }

    /// Record one advertisement. Repeats from the same address update
    /// the RSSI and fill in a name seen later (scan responses). Returns
    /// false once the table is full.
    pub fn record(&mut self, addr: [u8; 6], rssi: i8, adv_data: &[u8]) -> bool {
        let name = adv_parser::extract_device_name(adv_data);
        if let Some((_, known)) = self.entries.iter_mut().find(|(a, _)| *a == addr) {
            known.rssi = rssi;
            if let Some(name) = name {
                known.name = name;
            }
            return true;
        }
        let network = Network {
            name: name.unwrap_or_else(|| adv_parser::address_label(&addr)),
            rssi,
        };
        self.entries.push((addr, network)).is_ok()
    }

    /// Close the scan, sorting results strongest first.
    pub fn finish(&mut self, ok: bool) {
        if ok {
            self.entries.sort_unstable_by(|a, b| b.1.rssi.cmp(&a.1.rssi));
            self.status = ScanStatus::Done(self.entries.len());
            info!("scan: {} results", self.entries.len());
        } else {
            self.entries.clear();
            self.status = ScanStatus::Failed;
            warn!("scan: failed");
        }
    }

    pub fn network(&self, index: usize) -> Option<Network> {
        self.entries.get(index).map(|(_, n)| n.clone())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.status = ScanStatus::Idle;
    }
}

/// Scanner for builds without a radio: every scan fails.
pub struct NoRadio;

impl NetworkScanner for NoRadio {
    fn start_scan(&mut self) {}

    fn status(&self) -> ScanStatus {
        ScanStatus::Failed
    }

    fn network(&self, _index: usize) -> Option<Network> {
        None
    }

    fn clear(&mut self) {}
}
