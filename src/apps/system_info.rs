//! About screen.

use super::footer;
use crate::app::Flow;
use crate::config::{BOARD_NAME, FIRMWARE_VERSION};
use crate::input::{Button, Input};
use crate::render::{self, Canvas};
use core::fmt::Write;
use heapless::String;

/// Uptime as `H:MM:SS`.
pub fn format_uptime(now_ms: u64) -> String<16> {
    let secs = now_ms / 1000;
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60);
    s
}

pub fn update<D: Canvas>(input: &Input, now_ms: u64, file_count: usize, display: &mut D) -> Flow {
    if input.is_click(Button::Exit) {
        return Flow::Exit;
    }

    render::clear(display);
    render::header(display, "System info");
    let mut line: String<32> = String::new();
    let _ = write!(line, "Version: {}", FIRMWARE_VERSION);
    render::text(display, 0, 2, line.as_str());
    line.clear();
    let _ = write!(line, "Board: {}", BOARD_NAME);
    render::text(display, 0, 3, line.as_str());
    line.clear();
    let _ = write!(line, "Uptime: {}", format_uptime(now_ms));
    render::text(display, 0, 4, line.as_str());
    let files = render::label_value("Files: ", file_count as i64);
    render::text(display, 0, 5, files.as_str());
    footer(display, "");
    Flow::Stay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameBuffer;

    #[test]
    fn uptime_format() {
        assert_eq!(format_uptime(0).as_str(), "0:00:00");
        assert_eq!(format_uptime(3_725_999).as_str(), "1:02:05");
    }

    #[test]
    fn exit_leaves() {
        let mut fb = FrameBuffer::new();
        assert_eq!(update(&Input::idle(), 0, 2, &mut fb), Flow::Stay);
        assert!(fb.lit_count() > 0);
        assert_eq!(update(&Input::idle().with_click(Button::Exit), 0, 2, &mut fb), Flow::Exit);
    }
}
