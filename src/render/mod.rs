//! Drawing helpers shared by every screen.
//!
//! All helpers draw into any `DrawTarget<Color = BinaryColor>` (the SSD1306
//! buffer on target, [`FrameBuffer`] on the host). Text is addressed the way
//! the panel is organised: a pixel column and an 8-pixel row. Draw errors are
//! ignored; the display buffer cannot fail and a failed flush is retried next
//! frame.

pub mod bitmap;
pub mod dice;
pub mod framebuffer;

pub use framebuffer::FrameBuffer;

use crate::config::{HEADER_LINE_Y, ROW_HEIGHT, SCREEN_WIDTH};
use crate::menu::{page_count, MenuDef, MenuState};
use core::fmt::Write;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

/// Anything the UI can draw on.
pub trait Canvas: DrawTarget<Color = BinaryColor> {}

impl<T: DrawTarget<Color = BinaryColor>> Canvas for T {}

/// The three text scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    /// 6 px cell, 21 columns.
    Small,
    /// 9 px cell, 14 columns.
    Large,
    /// 10 px cell, 20 px tall.
    Huge,
}

impl TextSize {
    pub const fn char_width(self) -> i32 {
        match self {
            TextSize::Small => 6,
            TextSize::Large => 9,
            TextSize::Huge => 10,
        }
    }

    fn style(self) -> MonoTextStyle<'static, BinaryColor> {
        let font = match self {
            TextSize::Small => &FONT_6X10,
            TextSize::Large => &FONT_9X15,
            TextSize::Huge => &FONT_10X20,
        };
        MonoTextStyleBuilder::new()
            .font(font)
            .text_color(BinaryColor::On)
            .build()
    }
}

/// Width of `s` in pixels at `size`.
pub fn text_width(s: &str, size: TextSize) -> i32 {
    s.len() as i32 * size.char_width()
}

/// Blank the whole buffer.
pub fn clear<D: Canvas>(display: &mut D) {
    let _ = display.clear(BinaryColor::Off);
}

/// Small text with its top-left corner at pixel column `x`, text row `row`.
pub fn text<D: Canvas>(display: &mut D, x: i32, row: i32, s: &str) {
    text_at(display, x, row * ROW_HEIGHT, s, TextSize::Small);
}

/// Text of any size at text row `row`.
pub fn text_sized<D: Canvas>(display: &mut D, x: i32, row: i32, s: &str, size: TextSize) {
    text_at(display, x, row * ROW_HEIGHT, s, size);
}

/// Text with its top-left corner at an arbitrary pixel.
pub fn text_at<D: Canvas>(display: &mut D, x: i32, y: i32, s: &str, size: TextSize) {
    let _ = Text::with_baseline(s, Point::new(x, y), size.style(), Baseline::Top).draw(display);
}

/// Text horizontally centered on the screen.
pub fn text_centered<D: Canvas>(display: &mut D, row: i32, s: &str, size: TextSize) {
    let x = ((SCREEN_WIDTH - text_width(s, size)) / 2).max(0);
    text_sized(display, x, row, s, size);
}

/// Title on the first row with a separator line under it.
pub fn header<D: Canvas>(display: &mut D, title: &str) {
    text(display, 0, 0, title);
    hline(display, 0, SCREEN_WIDTH - 1, HEADER_LINE_Y);
}

pub fn line<D: Canvas>(display: &mut D, x0: i32, y0: i32, x1: i32, y1: i32) {
    let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

pub fn hline<D: Canvas>(display: &mut D, x0: i32, x1: i32, y: i32) {
    line(display, x0, y, x1, y);
}

pub fn vline<D: Canvas>(display: &mut D, x: i32, y0: i32, y1: i32) {
    line(display, x, y0, x, y1);
}

fn corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Rectangle {
    let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
    Rectangle::with_corners(Point::new(left, top), Point::new(right, bottom))
}

/// Filled rectangle between two inclusive corners.
pub fn fill_rect<D: Canvas>(display: &mut D, x0: i32, y0: i32, x1: i32, y1: i32) {
    let _ = corners(x0, y0, x1, y1)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display);
}

/// Outlined rectangle between two inclusive corners.
pub fn stroke_rect<D: Canvas>(display: &mut D, x0: i32, y0: i32, x1: i32, y1: i32) {
    let _ = corners(x0, y0, x1, y1)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

/// Single lit pixel.
pub fn dot<D: Canvas>(display: &mut D, x: i32, y: i32) {
    let _ = Pixel(Point::new(x, y), BinaryColor::On).draw(display);
}

/// Circle outline around a center.
pub fn circle<D: Canvas>(display: &mut D, cx: i32, cy: i32, radius: i32) {
    let diameter = (radius.max(0) * 2 + 1) as u32;
    let _ = Circle::with_center(Point::new(cx, cy), diameter)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

/// Filled disc around a center.
pub fn disc<D: Canvas>(display: &mut D, cx: i32, cy: i32, radius: i32) {
    let diameter = (radius.max(0) * 2 + 1) as u32;
    let _ = Circle::with_center(Point::new(cx, cy), diameter)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display);
}

/// Full-screen menu: title, page indicator, labels of the current page and
/// the cursor marker.
pub fn draw_menu<D: Canvas>(display: &mut D, menu: &MenuDef, state: &MenuState) {
    clear(display);
    header(display, menu.title);

    let pages = page_count(menu.len(), menu.per_page);
    if pages > 1 {
        let mut indicator: heapless::String<8> = heapless::String::new();
        let _ = write!(indicator, "({}/{})", state.page + 1, pages);
        text(display, 100, 0, indicator.as_str());
    }

    let start = state.page * menu.per_page;
    let labels = menu.items.iter().skip(start).take(menu.per_page);
    for (row, label) in labels.enumerate() {
        text(display, 10, 2 + row as i32, label);
    }
    text(display, 0, 2 + state.index as i32, ">");
}

/// Full-screen message in large text.
pub fn message_box<D: Canvas>(display: &mut D, message: &str) {
    clear(display);
    text_sized(display, 2, 3, message, TextSize::Large);
}

/// Terminal screen of a game: a large title, up to three detail lines and
/// the retry/quit hint.
pub fn game_over<D: Canvas>(display: &mut D, title: &str, details: &[&str]) {
    clear(display);
    text_centered(display, 1, title, TextSize::Large);
    for (i, detail) in details.iter().take(3).enumerate() {
        text_centered(display, 4 + i as i32, detail, TextSize::Small);
    }
    text(display, 0, 7, "SEL:retry EXIT:quit");
}

/// `"<label><value>"` formatted into a short line.
pub fn label_value(label: &str, value: i64) -> heapless::String<24> {
    let mut s = heapless::String::new();
    let _ = write!(s, "{}{}", label, value);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::GAMES_MENU;

    #[test]
    fn fill_rect_is_inclusive_and_order_independent() {
        let mut fb = FrameBuffer::new();
        fill_rect(&mut fb, 5, 5, 2, 2);
        assert_eq!(fb.lit_count(), 16);
        assert!(fb.pixel(2, 2));
        assert!(fb.pixel(5, 5));
        assert!(!fb.pixel(6, 5));
    }

    #[test]
    fn stroke_rect_leaves_inside_dark() {
        let mut fb = FrameBuffer::new();
        stroke_rect(&mut fb, 0, 0, 9, 9);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(9, 9));
        assert!(!fb.pixel(4, 4));
        assert_eq!(fb.lit_count(), 36);
    }

    #[test]
    fn menu_draws_cursor_and_page_indicator() {
        let mut fb = FrameBuffer::new();
        let state = MenuState {
            index: 2,
            page: 0,
            max_items: 5,
            max_pages: 2,
        };
        draw_menu(&mut fb, &GAMES_MENU, &state);
        assert!(fb.any_lit_in(0, 0, 60, 9), "title");
        assert!(fb.any_lit_in(100, 0, 127, 9), "page indicator");
        assert!(fb.any_lit_in(0, 32, 5, 40), "cursor on row 4");
        assert!(!fb.any_lit_in(0, 16, 5, 23), "no cursor on row 2");
    }

    #[test]
    fn single_page_menu_has_no_indicator() {
        let mut fb = FrameBuffer::new();
        draw_menu(&mut fb, &crate::menu::MAIN_MENU, &MenuState::new());
        assert!(!fb.any_lit_in(100, 0, 127, 9));
    }

    #[test]
    fn label_value_formats() {
        assert_eq!(label_value("Score: ", 42).as_str(), "Score: 42");
        assert_eq!(label_value("", -3).as_str(), "-3");
    }
}
