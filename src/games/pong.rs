//! Pong against a proportional-chase CPU paddle. First to five wins.

use super::{random_tenths, Game, TickContext};
use crate::config::{PONG_WINNING_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Button;
use crate::render::{self, Canvas};
use core::fmt::Write;
use rand::rngs::SmallRng;

const PADDLE_HEIGHT: f32 = 16.0;
const PADDLE_WIDTH: i32 = 2;
const PADDLE_STEP: f32 = 2.0;
const PADDLE_MIN_Y: f32 = 12.0;
const PADDLE_MAX_Y: f32 = 48.0;
const LEFT_PADDLE_X: i32 = 0;
const RIGHT_PADDLE_X: i32 = SCREEN_WIDTH - PADDLE_WIDTH;
const BALL_SIZE: f32 = 3.0;
const SERVE_SPEED: f32 = 1.5;
const TOP_WALL: f32 = 12.0;
/// Fraction of the gap the CPU paddle closes per frame.
const CPU_GAIN: f32 = 0.1;

pub struct Pong {
    player_y: f32,
    cpu_y: f32,
    ball_x: f32,
    ball_y: f32,
    vel_x: f32,
    vel_y: f32,
    player_score: u32,
    cpu_score: u32,
    game_over: bool,
}

impl Pong {
    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.cpu_score)
    }

    pub fn ball(&self) -> (f32, f32) {
        (self.ball_x, self.ball_y)
    }

    pub fn ball_velocity(&self) -> (f32, f32) {
        (self.vel_x, self.vel_y)
    }

    pub fn cpu_y(&self) -> f32 {
        self.cpu_y
    }

    fn serve(&mut self, direction: f32, rng: &mut SmallRng) {
        self.ball_x = (SCREEN_WIDTH / 2) as f32;
        self.ball_y = (SCREEN_HEIGHT / 2) as f32;
        self.vel_x = SERVE_SPEED * direction;
        self.vel_y = random_tenths(rng);
    }

    fn chase(&mut self) {
        let target = self.ball_y - PADDLE_HEIGHT / 2.0;
        self.cpu_y += (target - self.cpu_y) * CPU_GAIN;
        self.cpu_y = self.cpu_y.clamp(PADDLE_MIN_Y, PADDLE_MAX_Y);
    }

    /// Vertical speed after a paddle hit: proportional to how far from the
    /// paddle center the ball landed.
    fn deflect(paddle_y: f32, ball_y: f32) -> f32 {
        let offset = (paddle_y + PADDLE_HEIGHT / 2.0) - ball_y;
        -(offset / (PADDLE_HEIGHT / 2.0)) * 2.0
    }

    fn physics(&mut self, rng: &mut SmallRng) {
        self.ball_x += self.vel_x;
        self.ball_y += self.vel_y;

        if self.ball_y <= TOP_WALL || self.ball_y >= SCREEN_HEIGHT as f32 - BALL_SIZE {
            self.vel_y = -self.vel_y;
        }

        let touches = |paddle_y: f32, ball_y: f32| ball_y >= paddle_y && ball_y <= paddle_y + PADDLE_HEIGHT;
        if (1.0..=3.0).contains(&self.ball_x) && touches(self.player_y, self.ball_y) {
            self.vel_x = libm::fabsf(self.vel_x);
            self.vel_y = Self::deflect(self.player_y, self.ball_y);
        }
        if (124.0..=126.0).contains(&self.ball_x) && touches(self.cpu_y, self.ball_y) {
            self.vel_x = -libm::fabsf(self.vel_x);
            self.vel_y = Self::deflect(self.cpu_y, self.ball_y);
        }

        if self.ball_x < 0.0 {
            self.cpu_score += 1;
            self.point_scored(-1.0, rng);
        } else if self.ball_x > (SCREEN_WIDTH - 1) as f32 {
            self.player_score += 1;
            self.point_scored(1.0, rng);
        }
    }

    fn point_scored(&mut self, serve_direction: f32, rng: &mut SmallRng) {
        if self.player_score >= PONG_WINNING_SCORE || self.cpu_score >= PONG_WINNING_SCORE {
            self.game_over = true;
        } else {
            self.serve(serve_direction, rng);
        }
    }
}

impl Game for Pong {
    fn new(rng: &mut SmallRng, _now_ms: u64) -> Self {
        let mut pong = Self {
            player_y: 24.0,
            cpu_y: 24.0,
            ball_x: 0.0,
            ball_y: 0.0,
            vel_x: 0.0,
            vel_y: 0.0,
            player_score: 0,
            cpu_score: 0,
            game_over: false,
        };
        pong.serve(1.0, rng);
        pong
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !ctx.frame_ready {
            return;
        }
        if ctx.input.is_hold(Button::Up) {
            self.player_y -= PADDLE_STEP;
        }
        if ctx.input.is_hold(Button::Down) {
            self.player_y += PADDLE_STEP;
        }
        self.player_y = self.player_y.clamp(PADDLE_MIN_Y, PADDLE_MAX_Y);
        self.chase();
        self.physics(ctx.rng);
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let mut score: heapless::String<12> = heapless::String::new();
        let _ = write!(score, "{} : {}", self.player_score, self.cpu_score);
        render::text_centered(display, 0, score.as_str(), render::TextSize::Small);
        render::hline(display, 0, SCREEN_WIDTH - 1, TOP_WALL as i32 - 1);

        for y in (TOP_WALL as i32..SCREEN_HEIGHT).step_by(4) {
            render::dot(display, SCREEN_WIDTH / 2, y);
        }

        let paddle = |display: &mut D, x: i32, y: f32| {
            let top = y as i32;
            render::fill_rect(display, x, top, x + PADDLE_WIDTH - 1, top + PADDLE_HEIGHT as i32 - 1);
        };
        paddle(display, LEFT_PADDLE_X, self.player_y);
        paddle(display, RIGHT_PADDLE_X, self.cpu_y);

        let (bx, by) = (self.ball_x as i32, self.ball_y as i32);
        let size = BALL_SIZE as i32;
        render::fill_rect(display, bx, by, bx + size - 1, by + size - 1);
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.player_score
    }

    fn render_game_over<D: Canvas>(&self, display: &mut D) {
        let title = if self.player_score >= PONG_WINNING_SCORE {
            "YOU WIN!"
        } else {
            "CPU WINS"
        };
        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "{} : {}", self.player_score, self.cpu_score);
        render::game_over(display, title, &[line.as_str()]);
    }
}
