//! Flappy Bird with a ring of five recycled pipes.

use super::{Aabb, Game, TickContext};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Button;
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;
use rand::Rng;

pub const PIPE_COUNT: usize = 5;
pub const PIPE_WIDTH: i32 = 20;
pub const PIPE_GAP: i32 = 20;

const BIRD_X: i32 = 20;
const BIRD_SIZE: i32 = 4;
const GRAVITY: f32 = 0.2;
const FLAP_SPEED: f32 = -2.5;
const SCROLL: i32 = 2;
const PIPE_SPACING: i32 = 50;
const FIELD_TOP: i32 = 12;
const LOWEST_Y: f32 = 60.0;
const GAP_MIN: i32 = 20;
const GAP_MAX: i32 = 44;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pipe {
    pub x: i32,
    /// Top edge of the opening.
    pub gap_y: i32,
    pub passed: bool,
}

impl Pipe {
    fn top_box(&self) -> Aabb {
        Aabb::new(
            self.x as f32,
            FIELD_TOP as f32,
            PIPE_WIDTH as f32,
            (self.gap_y - FIELD_TOP) as f32,
        )
    }

    fn bottom_box(&self) -> Aabb {
        let top = self.gap_y + PIPE_GAP;
        Aabb::new(
            self.x as f32,
            top as f32,
            PIPE_WIDTH as f32,
            (SCREEN_HEIGHT - top) as f32,
        )
    }
}

pub struct Flappy {
    bird_y: f32,
    velocity: f32,
    pipes: [Pipe; PIPE_COUNT],
    score: u32,
    game_over: bool,
}

fn random_gap(rng: &mut SmallRng) -> i32 {
    rng.gen_range(GAP_MIN..GAP_MAX)
}

impl Flappy {
    pub fn bird_y(&self) -> f32 {
        self.bird_y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    fn bird_box(&self) -> Aabb {
        Aabb::new(BIRD_X as f32, self.bird_y, BIRD_SIZE as f32, BIRD_SIZE as f32)
    }

    /// Right-most pipe x, scanned in slot order at the time of the call.
    fn max_x(&self) -> i32 {
        let mut max_x = 0;
        for pipe in self.pipes.iter() {
            if pipe.x > max_x {
                max_x = pipe.x;
            }
        }
        max_x
    }

    fn scroll(&mut self, rng: &mut SmallRng) {
        for i in 0..PIPE_COUNT {
            self.pipes[i].x -= SCROLL;
            if self.pipes[i].x < -PIPE_WIDTH {
                let x = self.max_x() + PIPE_SPACING;
                self.pipes[i] = Pipe {
                    x,
                    gap_y: random_gap(rng),
                    passed: false,
                };
            }
            let pipe = &mut self.pipes[i];
            if !pipe.passed && pipe.x < BIRD_X {
                pipe.passed = true;
                self.score += 1;
            }
        }
    }

    fn check_collisions(&mut self) {
        if self.bird_y < FIELD_TOP as f32 || self.bird_y > LOWEST_Y {
            self.game_over = true;
            return;
        }
        let bird = self.bird_box();
        let hit = self
            .pipes
            .iter()
            .any(|p| bird.overlaps(&p.top_box()) || bird.overlaps(&p.bottom_box()));
        if hit {
            self.game_over = true;
        }
    }
}

impl Game for Flappy {
    fn new(rng: &mut SmallRng, _now_ms: u64) -> Self {
        let mut pipes = [Pipe {
            x: 0,
            gap_y: GAP_MIN,
            passed: false,
        }; PIPE_COUNT];
        for (i, pipe) in pipes.iter_mut().enumerate() {
            pipe.x = SCREEN_WIDTH + i as i32 * PIPE_SPACING;
            pipe.gap_y = random_gap(rng);
        }
        Self {
            bird_y: 32.0,
            velocity: 0.0,
            pipes,
            score: 0,
            game_over: false,
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.input.is_click(Button::Select) || ctx.input.is_click(Button::Up) {
            self.velocity = FLAP_SPEED;
        }
        if !ctx.frame_ready {
            return;
        }
        self.velocity += GRAVITY;
        self.bird_y += self.velocity;
        self.scroll(ctx.rng);
        self.check_collisions();
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());
        render::hline(display, 0, SCREEN_WIDTH - 1, FIELD_TOP - 1);

        for pipe in self.pipes.iter() {
            if pipe.x >= SCREEN_WIDTH || pipe.x + PIPE_WIDTH < 0 {
                continue;
            }
            let right = pipe.x + PIPE_WIDTH - 1;
            render::fill_rect(display, pipe.x, FIELD_TOP, right, pipe.gap_y - 1);
            render::fill_rect(display, pipe.x, pipe.gap_y + PIPE_GAP, right, SCREEN_HEIGHT - 1);
        }

        let y = self.bird_y as i32;
        render::fill_rect(display, BIRD_X, y, BIRD_X + BIRD_SIZE - 1, y + BIRD_SIZE - 1);
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::{frame, rng};
    use crate::input::Input;

    #[test]
    fn pipes_start_off_screen_fifty_apart() {
        let mut r = rng();
        let f = Flappy::new(&mut r, 0);
        let xs: heapless::Vec<i32, PIPE_COUNT> = f.pipes().iter().map(|p| p.x).collect();
        assert_eq!(xs.as_slice(), &[128, 178, 228, 278, 328]);
        assert!(f.pipes().iter().all(|p| (GAP_MIN..GAP_MAX).contains(&p.gap_y)));
    }

    #[test]
    fn flap_then_gravity() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        f.update(&mut frame(&mut r, Input::idle().with_click(Button::Select), 20));
        assert!((f.velocity() - (FLAP_SPEED + GRAVITY)).abs() < 1e-6);
        assert!(f.bird_y() < 32.0);
    }

    #[test]
    fn falling_to_the_floor_ends_the_game() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        let mut now = 0;
        while !f.is_over() && now < 10_000 {
            now += 20;
            f.update(&mut frame(&mut r, Input::idle(), now));
        }
        assert!(f.is_over());
        assert!(f.bird_y() > LOWEST_Y);
    }

    #[test]
    fn pipe_edge_crossing_scores_once() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        f.pipes[0].x = 21;
        f.scroll(&mut r);
        assert_eq!(f.score(), 1);
        assert!(f.pipes[0].passed);
        f.scroll(&mut r);
        assert_eq!(f.score(), 1);
    }

    #[test]
    fn recycled_pipe_goes_behind_the_last_one() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        for (i, pipe) in f.pipes.iter_mut().enumerate() {
            pipe.x = 100 + i as i32 * 10;
            pipe.passed = true;
        }
        f.pipes[0].x = -19;
        f.scroll(&mut r);
        // Slot 0 recycles against the others before they have scrolled.
        assert_eq!(f.pipes[0].x, 140 + PIPE_SPACING);
        assert!(!f.pipes[0].passed);
    }

    #[test]
    fn touching_a_pipe_is_fatal() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        f.pipes[0] = Pipe {
            x: 10,
            gap_y: 40,
            passed: true,
        };
        f.bird_y = 30.0;
        f.check_collisions();
        assert!(f.is_over());
    }

    #[test]
    fn flying_through_the_gap_is_safe() {
        let mut r = rng();
        let mut f = Flappy::new(&mut r, 0);
        f.pipes[0] = Pipe {
            x: 10,
            gap_y: 30,
            passed: true,
        };
        f.bird_y = 36.0;
        f.check_collisions();
        assert!(!f.is_over());
    }
}
