//! In-memory 128x64 1-bit raster in SSD1306 page format.
//!
//! Byte `page * 128 + x` holds the eight pixels `(x, page*8 .. page*8+8)`,
//! least significant bit on top. This is also the layout of a decoded
//! `.tos` image, so an image can be copied in as-is.

use crate::config::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};
use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub struct FrameBuffer {
    bytes: [u8; FRAME_BYTES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let index = (y / 8 * SCREEN_WIDTH + x) as usize;
        Some((index, 1 << (y % 8)))
    }

    /// Whether the pixel is lit; off-screen pixels read as dark.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((i, bit)) => self.bytes[i] & bit != 0,
            None => false,
        }
    }

    /// Set or clear one pixel; off-screen writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((i, bit)) = Self::locate(x, y) {
            if on {
                self.bytes[i] |= bit;
            } else {
                self.bytes[i] &= !bit;
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.bytes = [0; FRAME_BYTES];
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Replace the raster with page-format bytes. Missing trailing bytes
    /// are dark; extra bytes are ignored.
    pub fn load_pages(&mut self, pages: &[u8]) {
        self.clear_all();
        let n = pages.len().min(FRAME_BYTES);
        self.bytes[..n].copy_from_slice(&pages[..n]);
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Whether any pixel in the inclusive rectangle is lit.
    pub fn any_lit_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        (y0..=y1).any(|y| (x0..=x1).any(|x| self.pixel(x, y)))
    }

    /// Copy every lit pixel onto another target.
    pub fn blit_to<D>(&self, target: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let lit = (0..SCREEN_HEIGHT).flat_map(move |y| {
            (0..SCREEN_WIDTH)
                .filter(move |&x| self.pixel(x, y))
                .map(move |x| Pixel(Point::new(x, y), BinaryColor::On))
        });
        let _ = target.draw_iter(lit);
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
