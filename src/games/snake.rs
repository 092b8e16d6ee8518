//! Snake on a 4-pixel grid below the score bar.

use super::{Game, TickContext};
use crate::clock::elapsed;
use crate::config::{HEADER_LINE_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Button;
use crate::render::{self, Canvas};
use heapless::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

/// Grid cell size in pixels.
pub const CELL: i32 = 4;
/// Body capacity.
pub const MAX_LEN: usize = 80;
/// Top edge of the playfield.
pub const FIELD_TOP: i32 = 12;

const START_LEN: usize = 4;
const START_DELAY_MS: u64 = 150;
const MIN_DELAY_MS: u64 = 80;
const DELAY_STEP_MS: u64 = 3;
const FOOD_POINTS: u32 = 10;

pub struct Snake {
    /// Segment positions in pixels, head first.
    body: Vec<(i32, i32), MAX_LEN>,
    /// Direction of the last committed move.
    heading: (i32, i32),
    /// Direction the next move will take.
    pending: (i32, i32),
    food: (i32, i32),
    move_delay_ms: u64,
    last_move_ms: u64,
    score: u32,
    game_over: bool,
}

impl Snake {
    pub fn body(&self) -> &[(i32, i32)] {
        &self.body
    }

    pub fn head(&self) -> (i32, i32) {
        self.body[0]
    }

    pub fn move_delay_ms(&self) -> u64 {
        self.move_delay_ms
    }

    fn place_food(&mut self, rng: &mut SmallRng) {
        // A few tries to avoid the body; a crowded board accepts overlap.
        for _ in 0..8 {
            let spot = (
                rng.gen_range(0..SCREEN_WIDTH / CELL) * CELL,
                rng.gen_range(FIELD_TOP / CELL..SCREEN_HEIGHT / CELL) * CELL,
            );
            self.food = spot;
            if !self.body.contains(&spot) {
                break;
            }
        }
    }

    fn steer(&mut self, ctx: &TickContext<'_>) {
        let wanted = if ctx.input.is_click(Button::Up) {
            (0, -1)
        } else if ctx.input.is_click(Button::Down) {
            (0, 1)
        } else if ctx.input.is_click(Button::Left) {
            (-1, 0)
        } else if ctx.input.is_click(Button::Right) {
            (1, 0)
        } else {
            return;
        };
        let reverse = (-self.heading.0, -self.heading.1);
        if wanted != reverse {
            self.pending = wanted;
        }
    }

    /// One grid step. Nothing is committed unless the new head is clear.
    fn advance(&mut self, rng: &mut SmallRng) {
        let (hx, hy) = self.head();
        let next = (hx + self.pending.0 * CELL, hy + self.pending.1 * CELL);

        let outside = next.0 < 0
            || next.0 >= SCREEN_WIDTH
            || next.1 < FIELD_TOP
            || next.1 >= SCREEN_HEIGHT;
        if outside || self.body.contains(&next) {
            self.game_over = true;
            return;
        }

        self.heading = self.pending;
        let eats = next == self.food;
        if !eats || self.body.is_full() {
            self.body.pop();
        }
        let _ = self.body.insert(0, next);

        if eats {
            self.score += FOOD_POINTS;
            self.move_delay_ms = self
                .move_delay_ms
                .saturating_sub(DELAY_STEP_MS)
                .max(MIN_DELAY_MS);
            self.place_food(rng);
        }
    }
}

impl Game for Snake {
    fn new(rng: &mut SmallRng, now_ms: u64) -> Self {
        let mut body = Vec::new();
        for i in 0..START_LEN as i32 {
            let _ = body.push((64 - i * CELL, 32));
        }
        let mut snake = Self {
            body,
            heading: (1, 0),
            pending: (1, 0),
            food: (0, FIELD_TOP),
            move_delay_ms: START_DELAY_MS,
            last_move_ms: now_ms,
            score: 0,
            game_over: false,
        };
        snake.place_food(rng);
        snake
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.steer(ctx);
        if elapsed(ctx.now_ms, self.last_move_ms) > self.move_delay_ms {
            self.last_move_ms = ctx.now_ms;
            self.advance(ctx.rng);
        }
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());
        render::hline(display, 0, SCREEN_WIDTH - 1, HEADER_LINE_Y + 1);

        for &(x, y) in self.body.iter() {
            render::fill_rect(display, x, y, x + CELL - 1, y + CELL - 1);
        }
        let (fx, fy) = self.food;
        render::stroke_rect(display, fx, fy, fx + CELL - 1, fy + CELL - 1);
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}
