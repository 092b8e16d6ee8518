//! A single six-sided die.

use super::{Game, TickContext};
use crate::input::Button;
use crate::render::dice::draw_dice_face;
use crate::render::{self, Canvas, TextSize};
use rand::rngs::SmallRng;
use rand::Rng;

const FACE_X: i32 = 48;
const FACE_Y: i32 = 25;
const FACE_SIZE: i32 = 32;

pub struct Dice {
    value: u8,
    rolled: bool,
}

impl Dice {
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn rolled(&self) -> bool {
        self.rolled
    }

    pub fn roll(&mut self, rng: &mut SmallRng) {
        self.value = rng.gen_range(1..=6);
        self.rolled = true;
        debug!("dice: rolled {}", self.value);
    }
}

impl Game for Dice {
    fn new(_rng: &mut SmallRng, _now_ms: u64) -> Self {
        Self {
            value: 1,
            rolled: false,
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.input.is_click(Button::Select) {
            self.roll(ctx.rng);
        }
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        render::header(display, "Dice");
        if self.rolled {
            draw_dice_face(display, FACE_X, FACE_Y, FACE_SIZE, self.value);
        } else {
            render::text_centered(display, 3, "SEL to roll", TextSize::Small);
        }
    }

    /// Dice never ends; Exit leaves.
    fn is_over(&self) -> bool {
        false
    }

    fn score(&self) -> u32 {
        self.value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::{frame, rng};
    use crate::input::Input;

    #[test]
    fn rolls_stay_in_range_and_mark_rolled() {
        let mut r = rng();
        let mut d = Dice::new(&mut r, 0);
        assert!(!d.rolled());
        let mut seen = [false; 7];
        for t in 0..300 {
            d.update(&mut frame(&mut r, Input::idle().with_click(Button::Select), t));
            assert!((1..=6).contains(&d.value()));
            seen[d.value() as usize] = true;
        }
        assert!(d.rolled());
        assert!(seen[1..].iter().all(|s| *s));
    }

    #[test]
    fn idle_tick_keeps_the_face() {
        let mut r = rng();
        let mut d = Dice::new(&mut r, 0);
        d.roll(&mut r);
        let v = d.value();
        d.update(&mut frame(&mut r, Input::idle(), 5));
        assert_eq!(d.value(), v);
    }
}
