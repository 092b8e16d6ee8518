//! Network scanner screen. The scan runs elsewhere; this only polls it.

use crate::app::Flow;
use crate::config::{SCAN_NAME_CHARS, SCAN_PER_PAGE};
use crate::input::{Button, Input};
use crate::menu::page_count;
use crate::radio::{NetworkScanner, ScanStatus};
use crate::render::{self, Canvas};
use core::fmt::Write;
use heapless::String;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScannerView {
    page: usize,
}

/// Name cut to [`SCAN_NAME_CHARS`] characters, with ".." when shortened.
pub fn display_name(name: &str) -> String<{ SCAN_NAME_CHARS + 2 }> {
    let mut out = String::new();
    let mut chars = name.chars();
    for c in chars.by_ref().take(SCAN_NAME_CHARS) {
        let _ = out.push(c);
    }
    if chars.next().is_some() {
        let _ = out.push_str("..");
    }
    out
}

impl ScannerView {
    pub const fn new() -> Self {
        Self { page: 0 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn update<N: NetworkScanner, D: Canvas>(&mut self, scanner: &mut N, input: &Input, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            scanner.clear();
            self.page = 0;
            return Flow::Exit;
        }
        if input.is_click(Button::Select) && scanner.status() != ScanStatus::Running {
            info!("scan: requested");
            scanner.start_scan();
            self.page = 0;
        }

        let status = scanner.status();
        let found = match status {
            ScanStatus::Done(n) => n,
            _ => 0,
        };
        let pages = page_count(found, SCAN_PER_PAGE);
        if pages > 1 {
            if input.is_click(Button::Left) {
                self.page = (self.page + pages - 1) % pages;
            }
            if input.is_click(Button::Right) {
                self.page = (self.page + 1) % pages;
            }
        }
        self.page = self.page.min(pages - 1);

        render::clear(display);
        render::header(display, "WiFi scan");
        match status {
            ScanStatus::Idle => render::text(display, 0, 2, "Press SEL to scan"),
            ScanStatus::Running => render::text(display, 0, 2, "Scanning..."),
            ScanStatus::Failed => {
                render::text(display, 0, 2, "Scan failed");
                render::text(display, 0, 3, "SEL: retry");
            }
            ScanStatus::Done(0) => render::text(display, 0, 2, "No networks"),
            ScanStatus::Done(n) => {
                let line = render::label_value("Found: ", n as i64);
                render::text(display, 0, 2, line.as_str());
                let first = self.page * SCAN_PER_PAGE;
                for row in 0..SCAN_PER_PAGE {
                    let Some(network) = scanner.network(first + row) else {
                        break;
                    };
                    let y = 3 + row as i32;
                    render::text(display, 0, y, display_name(network.name.as_str()).as_str());
                    let rssi = render::label_value("", network.rssi as i64);
                    render::text(display, 100, y, rssi.as_str());
                }
                if pages > 1 {
                    let mut indicator: String<8> = String::new();
                    let _ = write!(indicator, "({}/{})", self.page + 1, pages);
                    render::text(display, 92, 0, indicator.as_str());
                }
            }
        }
        render::text(display, 0, 7, "SEL: refresh");
        render::text(display, 100, 7, "EXIT");
        Flow::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::{Network, ScanTable};
    use crate::render::FrameBuffer;

    /// Scanner whose scans finish as soon as the test says so.
    struct FakeScanner {
        table: ScanTable,
        starts: usize,
    }

    impl NetworkScanner for FakeScanner {
        fn start_scan(&mut self) {
            self.starts += 1;
            self.table.begin();
        }
        fn status(&self) -> ScanStatus {
            self.table.status()
        }
        fn network(&self, index: usize) -> Option<Network> {
            self.table.network(index)
        }
        fn clear(&mut self) {
            self.table.clear();
        }
    }

    fn advert(name: &str) -> std::vec::Vec<u8> {
        let mut data = std::vec![name.len() as u8 + 1, 0x09];
        data.extend_from_slice(name.as_bytes());
        data
    }

    fn click(b: Button) -> Input {
        Input::idle().with_click(b)
    }

    #[test]
    fn long_names_are_cut() {
        assert_eq!(display_name("short").as_str(), "short");
        assert_eq!(display_name("a-very-long-network-name").as_str(), "a-very-long-net..");
        assert_eq!(display_name("exactly15chars!").as_str(), "exactly15chars!");
    }

    #[test]
    fn select_starts_one_scan_and_pages_wrap() {
        let mut scanner = FakeScanner {
            table: ScanTable::new(),
            starts: 0,
        };
        let mut view = ScannerView::new();
        let mut fb = FrameBuffer::new();
        view.update(&mut scanner, &click(Button::Select), &mut fb);
        view.update(&mut scanner, &click(Button::Select), &mut fb);
        assert_eq!(scanner.starts, 1);

        for i in 0..6u8 {
            scanner.table.record([i; 6], -40 - i as i8, &advert("net"));
        }
        scanner.table.finish(true);
        view.update(&mut scanner, &click(Button::Left), &mut fb);
        assert_eq!(view.page(), 1);
        view.update(&mut scanner, &click(Button::Right), &mut fb);
        assert_eq!(view.page(), 0);
    }

    #[test]
    fn exit_clears_results() {
        let mut scanner = FakeScanner {
            table: ScanTable::new(),
            starts: 0,
        };
        scanner.table.begin();
        scanner.table.finish(true);
        let mut view = ScannerView::new();
        let mut fb = FrameBuffer::new();
        assert_eq!(view.update(&mut scanner, &click(Button::Exit), &mut fb), Flow::Exit);
        assert_eq!(scanner.status(), ScanStatus::Idle);
    }
}
