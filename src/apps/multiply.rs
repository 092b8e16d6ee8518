//! Multiplication table trainer.

use super::footer;
use crate::app::Flow;
use crate::config::SCREEN_WIDTH;
use crate::input::{Button, Input};
use crate::render::{self, Canvas, TextSize};
use core::fmt::Write;

const MIN: u32 = 1;
const MAX: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiplyTable {
    pub left: u32,
    pub right: u32,
}

impl Default for MultiplyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplyTable {
    pub const fn new() -> Self {
        Self { left: MIN, right: MIN }
    }

    pub fn product(&self) -> u32 {
        self.left * self.right
    }

    pub fn update<D: Canvas>(&mut self, input: &Input, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        if input.is_click(Button::Select) {
            *self = Self::new();
        }
        if input.is_click(Button::Up) {
            self.left = (self.left + 1).min(MAX);
        }
        if input.is_click(Button::Down) {
            self.left = self.left.saturating_sub(1).max(MIN);
        }
        if input.is_click(Button::Right) {
            self.right = (self.right + 1).min(MAX);
        }
        if input.is_click(Button::Left) {
            self.right = self.right.saturating_sub(1).max(MIN);
        }

        let mut sum: heapless::String<16> = heapless::String::new();
        let _ = write!(sum, "{} x {} = {}", self.left, self.right, self.product());
        let x = ((SCREEN_WIDTH - render::text_width(sum.as_str(), TextSize::Large)) / 2).max(0);

        render::clear(display);
        render::header(display, "Multiply table");
        render::text_sized(display, x, 3, sum.as_str(), TextSize::Large);
        render::text(display, 0, 6, "UP/DN: 1st L/R: 2nd");
        footer(display, "SEL: reset");
        Flow::Stay
    }
}
