//! Die face drawing.

use super::{disc, stroke_rect, Canvas};

/// Pip radius in pixels.
const PIP_RADIUS: i32 = 2;

/// Pip centers for a face of `size` at `(x, y)`, standard layout.
pub fn pip_positions(x: i32, y: i32, size: i32, value: u8) -> heapless::Vec<(i32, i32), 6> {
    let off = size / 4;
    let (l, c, r) = (x + off, x + size / 2, x + size - off);
    let (t, m, b) = (y + off, y + size / 2, y + size - off);
    let spots = [(l, t), (r, t), (l, m), (c, m), (r, m), (l, b), (r, b)];
    let used: &[usize] = match value {
        1 => &[3],
        2 => &[0, 6],
        3 => &[0, 3, 6],
        4 => &[0, 1, 5, 6],
        5 => &[0, 1, 3, 5, 6],
        6 => &[0, 1, 2, 4, 5, 6],
        _ => &[],
    };
    used.iter().map(|&i| spots[i]).collect()
}

/// Square outline with the pips for `value` (1..=6; other values draw an
/// empty face).
pub fn draw_dice_face<D: Canvas>(display: &mut D, x: i32, y: i32, size: i32, value: u8) {
    stroke_rect(display, x, y, x + size, y + size);
    for (px, py) in pip_positions(x, y, size, value) {
        disc(display, px, py, PIP_RADIUS);
    }
}
