//! Page-format sprite blitting and the built-in sprites.
//!
//! A sprite `w` pixels wide is stored as `ceil(h / 8)` bands of `w` bytes;
//! each byte is one column of eight pixels, least significant bit on top.

use super::Canvas;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A page-format 1-bit sprite.
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub data: &'static [u8],
}

impl Sprite {
    /// Draw with the top-left corner at `(x, y)`. Only set bits are drawn.
    pub fn draw<D: Canvas>(&self, display: &mut D, x: i32, y: i32) {
        draw_bitmap(display, x, y, self.data, self.width, self.height);
    }
}

/// Blit raw page-format data. Bytes short of `w * ceil(h/8)` are treated
/// as dark.
pub fn draw_bitmap<D: Canvas>(display: &mut D, x: i32, y: i32, data: &[u8], w: u32, h: u32) {
    let w = w as usize;
    let h = h as usize;
    let pages = h.div_ceil(8);
    let lit = (0..pages).flat_map(move |page| {
        (0..w).flat_map(move |col| {
            let byte = data.get(page * w + col).copied().unwrap_or(0);
            (0..8usize)
                .filter(move |&bit| byte & (1u8 << bit) != 0 && page * 8 + bit < h)
                .map(move |bit| {
                    Pixel(
                        Point::new(x + col as i32, y + (page * 8 + bit) as i32),
                        BinaryColor::On,
                    )
                })
        })
    });
    let _ = display.draw_iter(lit);
}

// Dino runner sprites.

pub const DINO_STAND_L: Sprite = Sprite {
    width: 16,
    height: 16,
    data: &[
        0xC0, 0x00, 0x00, 0x00, 0x00, 0x80, 0x80, 0xC0, 0xFE, 0xFF, 0xFD, 0xBF, 0xAF, 0x2F, 0x2F,
        0x0E, 0x03, 0x07, 0x1E, 0x1E, 0xFF, 0xBF, 0x1F, 0x3F, 0x7F, 0x4F, 0x07, 0x00, 0x01, 0x00,
        0x00, 0x00,
    ],
};

pub const DINO_STAND_R: Sprite = Sprite {
    width: 16,
    height: 16,
    data: &[
        0xC0, 0x00, 0x00, 0x00, 0x00, 0x80, 0x80, 0xC0, 0xFE, 0xFF, 0xFD, 0xBF, 0xAF, 0x2F, 0x2F,
        0x0E, 0x03, 0x07, 0x1E, 0x1E, 0x7F, 0x5F, 0x1F, 0x3F, 0xFF, 0x8F, 0x07, 0x00, 0x01, 0x00,
        0x00, 0x00,
    ],
};

pub const DINO_DEAD: Sprite = Sprite {
    width: 16,
    height: 16,
    data: &[
        0xC0, 0x00, 0x00, 0x00, 0x00, 0x80, 0x80, 0xC0, 0xFE, 0xF1, 0xF5, 0xB1, 0xBF, 0x2F, 0x2F,
        0x0E, 0x03, 0x07, 0x1E, 0x1E, 0xFF, 0xBF, 0x1F, 0x3F, 0xFF, 0x8F, 0x07, 0x00, 0x01, 0x00,
        0x00, 0x00,
    ],
};

pub const DINO_CROUCH_L: Sprite = Sprite {
    width: 16,
    height: 8,
    data: &[
        0x03, 0x06, 0x6C, 0x5C, 0x1C, 0xFE, 0xBE, 0x1E, 0x7E, 0x5E, 0x0E, 0x1C, 0x3E, 0x2A, 0x2E,
        0x0E,
    ],
};

pub const DINO_CROUCH_R: Sprite = Sprite {
    width: 16,
    height: 8,
    data: &[
        0x03, 0x06, 0xEC, 0x9C, 0x1C, 0x7E, 0x5E, 0x1E, 0x7E, 0x5E, 0x0E, 0x1C, 0x3E, 0x2A, 0x2E,
        0x0E,
    ],
};

pub const CACTUS_SMALL: Sprite = Sprite {
    width: 16,
    height: 16,
    data: &[
        0x00, 0x00, 0x00, 0xE0, 0xC0, 0x00, 0xF8, 0xFC, 0xFC, 0xF8, 0x80, 0xFC, 0xFE, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x03, 0x07, 0x06, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x01, 0x00, 0x00,
        0x00, 0x00,
    ],
};

pub const CACTUS_BIG: Sprite = Sprite {
    width: 24,
    height: 16,
    data: &[
        0xF0, 0x00, 0xFC, 0xFE, 0xFE, 0xC0, 0x7C, 0x00, 0xF0, 0x00, 0xF8, 0xFC, 0x60, 0x3E, 0x00,
        0x80, 0x00, 0xF8, 0x80, 0xF8, 0xFC, 0xF8, 0x30, 0x1F, 0x03, 0x07, 0xFF, 0xFF, 0xFF, 0x00,
        0x00, 0x00, 0x01, 0x03, 0xFF, 0xFF, 0x00, 0x1F, 0x30, 0xFF, 0x60, 0x3C, 0x01, 0xFF, 0xFF,
        0xFF, 0x00, 0x00,
    ],
};

pub const BIRD_L: Sprite = Sprite {
    width: 24,
    height: 16,
    data: &[
        0x30, 0x38, 0x3C, 0x3C, 0x3F, 0x3F, 0x7F, 0x7C, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0,
        0xF0, 0xE0, 0xE0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x7F, 0xFF, 0x7F, 0x1F, 0x0F, 0x0F, 0x0F, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03,
        0x03, 0x03, 0x00,
    ],
};

pub const BIRD_R: Sprite = Sprite {
    width: 24,
    height: 16,
    data: &[
        0x00, 0x80, 0xC0, 0xE0, 0xF0, 0xF0, 0xF0, 0xC0, 0x0F, 0xFE, 0xF8, 0xF8, 0xF0, 0xE0, 0xC0,
        0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x03, 0x03, 0x03, 0x03,
        0x03, 0x07, 0x0E, 0x1F, 0x7F, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC, 0xFC, 0xF8, 0xF8, 0x78,
        0x68, 0x68, 0x68,
    ],
};
