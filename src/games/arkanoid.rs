//! Brick breaker.

use super::{Game, TickContext};
use crate::config::SCREEN_WIDTH;
use crate::input::Button;
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;

pub const BRICK_ROWS: usize = 5;
pub const BRICK_COLS: usize = 10;

const PADDLE_WIDTH: i32 = 24;
const PADDLE_START_X: i32 = 54;
const PADDLE_Y: i32 = 62;
const PADDLE_STEP: i32 = 4;
const BALL_SIZE: f32 = 2.0;
const TOP_WALL: f32 = 12.0;
/// Ball past this y is lost.
const LOSS_Y: f32 = 65.0;
const BRICK_LEFT: i32 = 2;
const BRICK_TOP: i32 = 12;
const BRICK_PITCH_X: i32 = 12;
const BRICK_PITCH_Y: i32 = 5;
const BRICK_POINTS: u32 = 10;

pub struct Arkanoid {
    paddle_x: i32,
    ball_x: f32,
    ball_y: f32,
    vel_x: f32,
    vel_y: f32,
    bricks: [[bool; BRICK_COLS]; BRICK_ROWS],
    score: u32,
    game_over: bool,
}

impl Arkanoid {
    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().flatten().filter(|b| **b).count()
    }

    pub fn ball(&self) -> (f32, f32) {
        (self.ball_x, self.ball_y)
    }

    pub fn paddle_x(&self) -> i32 {
        self.paddle_x
    }

    /// Brick cell under the ball, if it is inside the grid.
    fn brick_at(x: f32, y: f32) -> Option<(usize, usize)> {
        // Integer division truncates toward zero, as in the grid layout.
        let col = (x as i32 - BRICK_LEFT) / BRICK_PITCH_X;
        let row = (y as i32 - BRICK_TOP) / BRICK_PITCH_Y;
        if (0..BRICK_COLS as i32).contains(&col) && (0..BRICK_ROWS as i32).contains(&row) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    fn physics(&mut self) {
        self.ball_x += self.vel_x;
        self.ball_y += self.vel_y;

        if self.ball_x <= 0.0 || self.ball_x >= (SCREEN_WIDTH - 1) as f32 - BALL_SIZE {
            self.vel_x = -self.vel_x;
        }
        if self.ball_y <= TOP_WALL {
            self.vel_y = -self.vel_y;
        }

        let paddle_left = self.paddle_x as f32;
        let paddle_right = (self.paddle_x + PADDLE_WIDTH) as f32;
        if self.ball_y + BALL_SIZE >= PADDLE_Y as f32
            && self.ball_y <= (PADDLE_Y + 1) as f32
            && self.ball_x + BALL_SIZE >= paddle_left
            && self.ball_x <= paddle_right
        {
            self.vel_y = -libm::fabsf(self.vel_y);
        }

        if let Some((row, col)) = Self::brick_at(self.ball_x, self.ball_y) {
            if self.bricks[row][col] {
                self.bricks[row][col] = false;
                self.vel_y = -self.vel_y;
                self.score += BRICK_POINTS;
            }
        }

        if self.ball_y >= LOSS_Y {
            self.game_over = true;
        }
    }
}

impl Game for Arkanoid {
    fn new(_rng: &mut SmallRng, _now_ms: u64) -> Self {
        Self {
            paddle_x: PADDLE_START_X,
            ball_x: 64.0,
            ball_y: 55.0,
            vel_x: 1.0,
            vel_y: 1.0,
            bricks: [[true; BRICK_COLS]; BRICK_ROWS],
            score: 0,
            game_over: false,
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !ctx.frame_ready {
            return;
        }
        if ctx.input.is_hold(Button::Left) {
            self.paddle_x -= PADDLE_STEP;
        }
        if ctx.input.is_hold(Button::Right) {
            self.paddle_x += PADDLE_STEP;
        }
        self.paddle_x = self.paddle_x.clamp(0, SCREEN_WIDTH - PADDLE_WIDTH);
        self.physics();
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());

        for (row, bricks) in self.bricks.iter().enumerate() {
            for (col, alive) in bricks.iter().enumerate() {
                if *alive {
                    let x = col as i32 * BRICK_PITCH_X + BRICK_LEFT;
                    let y = row as i32 * BRICK_PITCH_Y + BRICK_TOP;
                    render::fill_rect(display, x, y, x + 8, y + 3);
                }
            }
        }

        render::fill_rect(
            display,
            self.paddle_x,
            PADDLE_Y,
            self.paddle_x + PADDLE_WIDTH - 1,
            PADDLE_Y + 1,
        );
        let (bx, by) = (self.ball_x as i32, self.ball_y as i32);
        render::fill_rect(display, bx, by, bx + BALL_SIZE as i32 - 1, by + BALL_SIZE as i32 - 1);
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}
