//! Stopwatch with centisecond display.

use super::{footer, format_mm_ss};
use crate::app::Flow;
use crate::clock::elapsed;
use crate::input::{Button, Input};
use crate::render::{self, Canvas, TextSize};
use core::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    /// Time accumulated before the current run.
    banked_ms: u64,
    /// Start of the current run, if running.
    started_at: Option<u64>,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            banked_ms: 0,
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.started_at {
            Some(start) => self.banked_ms + elapsed(now_ms, start),
            None => self.banked_ms,
        }
    }

    pub fn update<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        if input.is_click(Button::Select) {
            match self.started_at.take() {
                Some(start) => self.banked_ms += elapsed(now_ms, start),
                None => self.started_at = Some(now_ms),
            }
        }
        if input.is_click(Button::Up) {
            self.banked_ms = 0;
            if self.started_at.is_some() {
                self.started_at = Some(now_ms);
            }
        }

        let ms = self.elapsed_ms(now_ms);
        let mut time: heapless::String<12> = heapless::String::new();
        let _ = write!(time, "{}.{:02}", format_mm_ss(ms), (ms % 1000) / 10);

        render::clear(display);
        render::header(display, "Stopwatch");
        render::text_sized(display, 2, 3, time.as_str(), TextSize::Huge);
        render::text(display, 0, 6, "SEL: start/stop");
        footer(display, "UP: reset");
        Flow::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameBuffer;

    fn press(sw: &mut Stopwatch, b: Button, now: u64) {
        let mut fb = FrameBuffer::new();
        sw.update(&Input::idle().with_click(b), now, &mut fb);
    }

    #[test]
    fn pause_keeps_accumulated_time() {
        let mut sw = Stopwatch::new();
        press(&mut sw, Button::Select, 1000);
        press(&mut sw, Button::Select, 1500);
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(9000), 500);
        press(&mut sw, Button::Select, 10_000);
        assert_eq!(sw.elapsed_ms(10_250), 750);
    }

    #[test]
    fn reset_while_running_restarts_from_zero() {
        let mut sw = Stopwatch::new();
        press(&mut sw, Button::Select, 0);
        press(&mut sw, Button::Up, 4000);
        assert!(sw.is_running());
        assert_eq!(sw.elapsed_ms(4100), 100);
    }

    #[test]
    fn exit_leaves() {
        let mut sw = Stopwatch::new();
        let mut fb = FrameBuffer::new();
        let flow = sw.update(&Input::idle().with_click(Button::Exit), 0, &mut fb);
        assert_eq!(flow, Flow::Exit);
    }
}
