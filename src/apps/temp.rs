//! Celsius / Fahrenheit converter.

use super::footer;
use crate::app::Flow;
use crate::input::{Button, Input};
use crate::render::{self, Canvas};
use core::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TempConverter {
    pub celsius: f32,
    pub fahrenheit: f32,
    /// Up/Down edit Celsius when true, Fahrenheit otherwise.
    pub editing_celsius: bool,
}

impl Default for TempConverter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn c_to_f(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn f_to_c(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

impl TempConverter {
    pub const fn new() -> Self {
        Self {
            celsius: 0.0,
            fahrenheit: 32.0,
            editing_celsius: true,
        }
    }

    pub fn update<D: Canvas>(&mut self, input: &Input, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        let delta = match (input.is_click(Button::Up), input.is_click(Button::Down)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        if self.editing_celsius {
            self.celsius += delta;
            self.fahrenheit = c_to_f(self.celsius);
        } else {
            self.fahrenheit += delta;
            self.celsius = f_to_c(self.fahrenheit);
        }
        if input.is_click(Button::Select) {
            self.editing_celsius = !self.editing_celsius;
        }

        render::clear(display);
        render::header(display, "Temp converter");
        let mut line: heapless::String<24> = heapless::String::new();
        let _ = write!(line, "Celsius: {:.1}", self.celsius);
        render::text(display, 0, 2, line.as_str());
        line.clear();
        let _ = write!(line, "Fahrenheit: {:.1}", self.fahrenheit);
        render::text(display, 0, 3, line.as_str());
        let editing = if self.editing_celsius { "Editing Celsius" } else { "Editing Fahrenheit" };
        render::text(display, 0, 5, editing);
        render::text(display, 0, 6, "UP/DOWN: +/-1");
        footer(display, "SEL: swap");
        Flow::Stay
    }
}
