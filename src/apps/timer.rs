//! Countdown timer, set in whole minutes.

use super::{footer, format_mm_ss};
use crate::app::Flow;
use crate::clock::elapsed;
use crate::input::{Button, Input};
use crate::render::{self, Canvas, TextSize};

/// Longest settable time (59:59).
pub const MAX_SECS: u64 = 3599;
const STEP_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    set_secs: u64,
    started_at: Option<u64>,
    alarm: bool,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            set_secs: 0,
            started_at: None,
            alarm: false,
        }
    }

    pub fn set_secs(&self) -> u64 {
        self.set_secs
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn alarm(&self) -> bool {
        self.alarm
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let total = self.set_secs * 1000;
        match self.started_at {
            Some(start) => total.saturating_sub(elapsed(now_ms, start)),
            None => total,
        }
    }

    pub fn update<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }

        if self.started_at.is_some() && self.remaining_ms(now_ms) == 0 {
            info!("timer: alarm");
            self.started_at = None;
            self.alarm = true;
        }

        if self.alarm {
            if input.is_click(Button::Select) {
                *self = Self::new();
            }
        } else {
            if input.is_click(Button::Select) {
                match self.started_at {
                    Some(_) => {
                        // Pausing keeps what is left, rounded down to seconds.
                        self.set_secs = self.remaining_ms(now_ms) / 1000;
                        self.started_at = None;
                    }
                    None if self.set_secs > 0 => self.started_at = Some(now_ms),
                    None => {}
                }
            }
            if input.is_click(Button::Up) {
                self.set_secs = (self.set_secs + STEP_SECS).min(MAX_SECS);
            }
            if input.is_click(Button::Down) {
                self.set_secs = self.set_secs.saturating_sub(STEP_SECS);
            }
        }

        render::clear(display);
        render::header(display, "Timer");
        if self.alarm {
            render::text_sized(display, 20, 3, "TIME!", TextSize::Huge);
            render::text(display, 0, 6, "SEL: reset");
            footer(display, "");
        } else {
            let left = format_mm_ss(self.remaining_ms(now_ms));
            render::text_sized(display, 20, 3, left.as_str(), TextSize::Huge);
            let hint = if self.is_running() { "SEL: pause" } else { "SEL: start" };
            render::text(display, 0, 6, hint);
            footer(display, "UP/DN: +/-1 min");
        }
        Flow::Stay
    }
}
