//! Endless runner: jump cacti, duck birds.

use super::{Aabb, Game, TickContext};
use crate::clock::elapsed;
use crate::config::{DINO_MAX_CATCHUP_STEPS, DINO_STEP_UNIT_MS, SCREEN_WIDTH};
use crate::input::Button;
use crate::render::bitmap::{
    BIRD_L, BIRD_R, CACTUS_BIG, CACTUS_SMALL, DINO_CROUCH_L, DINO_CROUCH_R, DINO_DEAD,
    DINO_STAND_L, DINO_STAND_R,
};
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;
use rand::Rng;

/// Resting y of the dino's top edge.
pub const FLOOR_Y: f32 = 47.0;
pub const JUMP_SPEED: f32 = -2.8;
pub const GRAVITY: f32 = 0.17;
pub const FAST_FALL_SPEED: f32 = 3.2;

const DINO_X: f32 = 0.0;
const DINO_SIZE: f32 = 16.0;
const GROUND_Y: i32 = 63;
const OBSTACLE_SPAWN_X: i32 = SCREEN_WIDTH;
const OBSTACLE_GONE_X: i32 = -24;
const CACTUS_TOP: f32 = 48.0;
const BIRD_TOP: f32 = 35.0;

const SCORE_PERIOD_MS: u64 = 100;
const LEG_PERIOD_MS: u64 = 130;
const WING_PERIOD_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    SmallCactus,
    BigCactus,
    Bird,
}

impl Obstacle {
    fn random(rng: &mut SmallRng) -> Self {
        match rng.gen_range(0..3) {
            0 => Obstacle::SmallCactus,
            1 => Obstacle::BigCactus,
            _ => Obstacle::Bird,
        }
    }

    fn hit_box(self, x: i32) -> Aabb {
        let width = if self == Obstacle::BigCactus { 24.0 } else { 16.0 };
        let top = if self == Obstacle::Bird { BIRD_TOP } else { CACTUS_TOP };
        Aabb::new(x as f32, top, width, 16.0)
    }
}

/// Step delay in units of [`DINO_STEP_UNIT_MS`]: 6 at score 0 falling
/// linearly to 2 at score 500, clamped to `2..=6`.
pub fn step_units(score: u32) -> u64 {
    let mapped = 6 - (score.min(500) as i64 * 4) / 500;
    mapped.clamp(2, 6) as u64
}

pub struct Dino {
    y: f32,
    speed: f32,
    jumping: bool,
    crouching: bool,
    obstacle: Obstacle,
    obstacle_x: i32,
    score: u32,
    last_score_ms: u64,
    last_step_ms: u64,
    legs_flip: bool,
    last_leg_ms: u64,
    wings_flip: bool,
    last_wing_ms: u64,
    game_over: bool,
}

impl Dino {
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    fn on_ground(&self) -> bool {
        self.y >= FLOOR_Y
    }

    fn hit_box(&self) -> Aabb {
        if self.crouching {
            // Ducking keeps only the lower half.
            Aabb::new(DINO_X, self.y + DINO_SIZE / 2.0, DINO_SIZE, DINO_SIZE / 2.0)
        } else {
            Aabb::new(DINO_X, self.y, DINO_SIZE, DINO_SIZE)
        }
    }

    /// One world step: scroll the obstacle, integrate the jump, test for a
    /// hit.
    fn step(&mut self, rng: &mut SmallRng) {
        self.obstacle_x -= 1;
        if self.obstacle_x < OBSTACLE_GONE_X {
            self.obstacle_x = OBSTACLE_SPAWN_X;
            self.obstacle = Obstacle::random(rng);
        }

        if self.jumping || !self.on_ground() {
            self.y += self.speed;
            self.speed += GRAVITY;
            if self.on_ground() {
                self.y = FLOOR_Y;
                self.speed = 0.0;
                self.jumping = false;
            }
        }

        if self.hit_box().overlaps(&self.obstacle.hit_box(self.obstacle_x)) {
            self.game_over = true;
        }
    }

    fn animate(&mut self, now_ms: u64) {
        if elapsed(now_ms, self.last_leg_ms) >= LEG_PERIOD_MS {
            self.last_leg_ms = now_ms;
            self.legs_flip = !self.legs_flip;
        }
        if self.obstacle == Obstacle::Bird && elapsed(now_ms, self.last_wing_ms) >= WING_PERIOD_MS {
            self.last_wing_ms = now_ms;
            self.wings_flip = !self.wings_flip;
        }
    }
}

impl Game for Dino {
    fn new(rng: &mut SmallRng, now_ms: u64) -> Self {
        Self {
            y: FLOOR_Y,
            speed: 0.0,
            jumping: false,
            crouching: false,
            obstacle: Obstacle::random(rng),
            obstacle_x: OBSTACLE_SPAWN_X,
            score: 0,
            last_score_ms: now_ms,
            last_step_ms: now_ms,
            legs_flip: false,
            last_leg_ms: now_ms,
            wings_flip: false,
            last_wing_ms: now_ms,
            game_over: false,
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;
        let jump = input.is_click(Button::Up) || input.is_click(Button::Select);
        if jump && self.on_ground() && !self.jumping {
            self.speed = JUMP_SPEED;
            self.jumping = true;
        }
        self.crouching = input.is_hold(Button::Down);
        if self.crouching && !self.on_ground() {
            self.speed = FAST_FALL_SPEED;
        }

        if elapsed(ctx.now_ms, self.last_score_ms) >= SCORE_PERIOD_MS {
            self.last_score_ms = ctx.now_ms;
            self.score += 1;
        }

        let delay = step_units(self.score) * DINO_STEP_UNIT_MS;
        let mut steps = 0;
        while elapsed(ctx.now_ms, self.last_step_ms) >= delay && !self.game_over {
            self.last_step_ms += delay;
            self.step(ctx.rng);
            steps += 1;
            if steps == DINO_MAX_CATCHUP_STEPS {
                self.last_step_ms = ctx.now_ms;
                break;
            }
        }

        self.animate(ctx.now_ms);
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());
        render::hline(display, 0, SCREEN_WIDTH - 1, GROUND_Y);

        let y = self.y as i32;
        let dino = if self.game_over {
            &DINO_DEAD
        } else if self.crouching {
            if self.legs_flip {
                &DINO_CROUCH_R
            } else {
                &DINO_CROUCH_L
            }
        } else if self.jumping || self.legs_flip {
            &DINO_STAND_L
        } else {
            &DINO_STAND_R
        };
        let dino_y = if self.crouching && !self.game_over { y + 8 } else { y };
        dino.draw(display, DINO_X as i32, dino_y);

        let x = self.obstacle_x;
        match self.obstacle {
            Obstacle::SmallCactus => CACTUS_SMALL.draw(display, x, CACTUS_TOP as i32),
            Obstacle::BigCactus => CACTUS_BIG.draw(display, x, CACTUS_TOP as i32),
            Obstacle::Bird => {
                let bird = if self.wings_flip { &BIRD_R } else { &BIRD_L };
                bird.draw(display, x, BIRD_TOP as i32);
            }
        }
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}
