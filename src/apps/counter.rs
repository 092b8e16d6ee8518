//! Tally counter.

use super::footer;
use crate::app::Flow;
use crate::input::{Button, Input};
use crate::render::{self, Canvas, TextSize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    pub count: i32,
}

impl Counter {
    pub fn update<D: Canvas>(&mut self, input: &Input, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        if input.is_click(Button::Up) {
            self.count = self.count.saturating_add(1);
        }
        if input.is_click(Button::Down) {
            self.count = self.count.saturating_sub(1);
        }

        render::clear(display);
        render::header(display, "Counter");
        let value = render::label_value("", self.count as i64);
        render::text_sized(display, 0, 3, value.as_str(), TextSize::Huge);
        footer(display, "UP:+1 DOWN:-1");
        Flow::Stay
    }
}
