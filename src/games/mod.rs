//! Real-time games.
//!
//! Every game implements [`Game`] and is driven by [`run`], which gives all
//! of them the same per-tick shape:
//!
//! 1. terminal check - a finished game shows its game-over screen until
//!    Select restarts it;
//! 2. input to intent and a gated physics step (inside [`Game::update`]);
//! 3. a full redraw.
//!
//! Exit always leaves, whatever the phase.

pub mod arkanoid;
pub mod asteroids;
pub mod dice;
pub mod dino;
pub mod flappy;
pub mod pong;
pub mod snake;
pub mod tetris;

use crate::app::Flow;
use crate::input::{Button, Input};
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;

/// Everything a game may look at during one tick.
pub struct TickContext<'a> {
    pub input: Input,
    pub now_ms: u64,
    /// The shared 20 ms frame clock fired this tick.
    pub frame_ready: bool,
    pub rng: &'a mut SmallRng,
}

pub trait Game: Sized {
    /// Fresh state for a new round.
    fn new(rng: &mut SmallRng, now_ms: u64) -> Self;

    /// Apply input and advance physics if this tick's gate allows it.
    fn update(&mut self, ctx: &mut TickContext<'_>);

    /// Draw the whole playfield (the buffer is already cleared).
    fn render<D: Canvas>(&self, display: &mut D);

    fn is_over(&self) -> bool;

    fn score(&self) -> u32;

    fn render_game_over<D: Canvas>(&self, display: &mut D) {
        let line = render::label_value("Score: ", self.score() as i64);
        render::game_over(display, "GAME OVER", &[line.as_str()]);
    }
}

/// One tick of any game.
pub fn run<G: Game, D: Canvas>(game: &mut G, ctx: &mut TickContext<'_>, display: &mut D) -> Flow {
    if ctx.input.is_click(Button::Exit) {
        return Flow::Exit;
    }

    if game.is_over() {
        if ctx.input.is_click(Button::Select) {
            *game = G::new(ctx.rng, ctx.now_ms);
            debug!("game: retry");
            render::clear(display);
            game.render(display);
        } else {
            game.render_game_over(display);
        }
        return Flow::Stay;
    }

    game.update(ctx);
    render::clear(display);
    game.render(display);
    if game.is_over() {
        info!("game: over with score {}", game.score());
    }
    Flow::Stay
}

/// Axis-aligned box, edges as `left <= x < right`, `top <= y < bottom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Euclidean distance between two points.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    libm::sqrtf(dx * dx + dy * dy)
}

/// Random value in `[-1.0, 1.0]` with a 0.1 step.
pub fn random_tenths(rng: &mut SmallRng) -> f32 {
    use rand::Rng;
    rng.gen_range(-10..=10) as f32 / 10.0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 5.0, 5.0)));
        assert!(a.overlaps(&Aabb::new(9.5, 9.5, 5.0, 5.0)));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn random_tenths_in_range() {
        let mut rng = testing::rng();
        for _ in 0..200 {
            let v = random_tenths(&mut rng);
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
