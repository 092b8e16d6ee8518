//! Drawing pad on a 1-bit canvas that is kept between frames.

use crate::app::Flow;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{Button, Input};
use crate::render::{self, Canvas, FrameBuffer};
use core::fmt::Write;

/// Top row the cursor may reach; above it is the header.
pub const CANVAS_TOP: i32 = 11;
const BLINK_MS: u64 = 300;

pub struct DrawPad {
    canvas: FrameBuffer,
    cursor: (i32, i32),
}

impl Default for DrawPad {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawPad {
    pub const fn new() -> Self {
        Self {
            canvas: FrameBuffer::new(),
            cursor: (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
        }
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn update<D: Canvas>(&mut self, input: &Input, now_ms: u64, frame_ready: bool, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        let pen_down = input.is_hold(Button::Select);

        if input.is_hold(Button::Up) && input.is_hold(Button::Down) {
            self.canvas.clear_all();
        } else if frame_ready {
            let (px, py) = self.cursor;
            let (mut x, mut y) = self.cursor;
            if input.is_hold(Button::Up) {
                y = (y - 1).max(CANVAS_TOP);
            }
            if input.is_hold(Button::Down) {
                y = (y + 1).min(SCREEN_HEIGHT - 1);
            }
            if input.is_hold(Button::Left) {
                x = (x - 1).max(0);
            }
            if input.is_hold(Button::Right) {
                x = (x + 1).min(SCREEN_WIDTH - 1);
            }
            self.cursor = (x, y);
            if pen_down {
                render::line(&mut self.canvas, px, py, x, y);
            }
        }

        render::clear(display);
        self.canvas.blit_to(display);
        let (x, y) = self.cursor;
        let mut coords: heapless::String<16> = heapless::String::new();
        let _ = write!(coords, "X:{} Y:{}", x, y);
        render::text(display, 0, 0, "Draw");
        render::text(display, 66, 0, coords.as_str());
        render::hline(display, 0, SCREEN_WIDTH - 1, CANVAS_TOP - 2);
        if pen_down || now_ms % (2 * BLINK_MS) < BLINK_MS {
            render::dot(display, x, y);
        }
        Flow::Stay
    }
}
