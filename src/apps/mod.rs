//! Mini applications reachable from the Apps menu.
//!
//! Each app owns a small state record, applies one [`Input`] per tick and
//! redraws its whole screen. Exit always returns [`Flow::Exit`]; the app
//! shell decides where that leads.
//!
//! [`Input`]: crate::input::Input
//! [`Flow::Exit`]: crate::app::Flow::Exit

pub mod counter;
pub mod drawpad;
pub mod editor;
pub mod files;
pub mod multiply;
pub mod scanner;
pub mod stopwatch;
pub mod system_info;
pub mod temp;
pub mod timer;

use crate::render::{self, Canvas};

/// Key hints along the bottom row, with "EXIT" on the right.
pub(crate) fn footer<D: Canvas>(display: &mut D, hint: &str) {
    render::text(display, 0, 7, hint);
    render::text(display, 100, 7, "EXIT");
}

/// `MM:SS` from milliseconds, minutes wrapping at 60.
pub(crate) fn format_mm_ss(ms: u64) -> heapless::String<8> {
    use core::fmt::Write;
    let mut s = heapless::String::new();
    let _ = write!(s, "{:02}:{:02}", (ms / 60_000) % 60, (ms / 1000) % 60);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_ss_wraps_minutes() {
        assert_eq!(format_mm_ss(0).as_str(), "00:00");
        assert_eq!(format_mm_ss(61_999).as_str(), "01:01");
        assert_eq!(format_mm_ss(3_600_000).as_str(), "00:00");
    }
}
