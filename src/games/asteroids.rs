//! Asteroids: rotate, thrust, shoot, split.

use super::{distance, random_tenths, Game, TickContext};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Button;
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;
use rand::Rng;

pub const MAX_ASTEROIDS: usize = 10;
pub const MAX_BULLETS: usize = 5;

const TURN_RATE: f32 = 0.1;
const THRUST: f32 = 0.1;
const DAMPING: f32 = 0.98;
const BULLET_SPEED: f32 = 3.0;
const SHIP_RADIUS: f32 = 2.0;
const SHIP_NOSE: f32 = 5.0;
const SHIP_TAIL: f32 = 3.0;
const FIELD_TOP: f32 = 12.0;
const WAVE_SIZE: usize = 3;
const LARGE: u8 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 0 = small, 2 = large.
    pub size: u8,
    pub active: bool,
}

impl Asteroid {
    pub fn radius(&self) -> f32 {
        (self.size as f32 + 1.0) * 4.0
    }

    /// Asteroids wrap with a margin so they slide fully off before
    /// reappearing.
    fn drift(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < -10.0 {
            self.x = 138.0;
        } else if self.x > 138.0 {
            self.x = -10.0;
        }
        if self.y < 2.0 {
            self.y = 73.0;
        } else if self.y > 73.0 {
            self.y = 2.0;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub active: bool,
}

pub struct Asteroids {
    ship_x: f32,
    ship_y: f32,
    ship_vx: f32,
    ship_vy: f32,
    /// Heading in radians, 0 = nose up.
    angle: f32,
    thrusting: bool,
    asteroids: [Asteroid; MAX_ASTEROIDS],
    bullets: [Bullet; MAX_BULLETS],
    score: u32,
    game_over: bool,
}

impl Asteroids {
    pub fn ship(&self) -> (f32, f32) {
        (self.ship_x, self.ship_y)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn active_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.active).count()
    }

    fn spawn_wave(&mut self, rng: &mut SmallRng) {
        let mut spawned = 0;
        for slot in self.asteroids.iter_mut().filter(|a| !a.active) {
            if spawned == WAVE_SIZE {
                break;
            }
            *slot = Asteroid {
                x: rng.gen_range(0..SCREEN_WIDTH) as f32,
                y: rng.gen_range(0..20) as f32,
                vx: random_tenths(rng),
                vy: rng.gen_range(1..10) as f32 / 10.0,
                size: LARGE,
                active: true,
            };
            spawned += 1;
        }
    }

    fn fire(&mut self) {
        let (sin, cos) = (libm::sinf(self.angle), libm::cosf(self.angle));
        if let Some(bullet) = self.bullets.iter_mut().find(|b| !b.active) {
            *bullet = Bullet {
                x: self.ship_x,
                y: self.ship_y,
                vx: sin * BULLET_SPEED,
                vy: -cos * BULLET_SPEED,
                active: true,
            };
        }
    }

    fn fly(&mut self) {
        if self.thrusting {
            self.ship_vx += libm::sinf(self.angle) * THRUST;
            self.ship_vy -= libm::cosf(self.angle) * THRUST;
        }
        self.ship_vx *= DAMPING;
        self.ship_vy *= DAMPING;
        self.ship_x += self.ship_vx;
        self.ship_y += self.ship_vy;

        let right = (SCREEN_WIDTH - 1) as f32;
        let bottom = (SCREEN_HEIGHT - 1) as f32;
        if self.ship_x < 0.0 {
            self.ship_x = right;
        } else if self.ship_x > right {
            self.ship_x = 0.0;
        }
        if self.ship_y < FIELD_TOP {
            self.ship_y = bottom;
        } else if self.ship_y > bottom {
            self.ship_y = FIELD_TOP;
        }
    }

    fn move_bullets(&mut self) {
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            bullet.x += bullet.vx;
            bullet.y += bullet.vy;
            let off_screen = bullet.x < 0.0
                || bullet.x >= SCREEN_WIDTH as f32
                || bullet.y < 0.0
                || bullet.y >= SCREEN_HEIGHT as f32;
            if off_screen {
                bullet.active = false;
            }
        }
    }

    /// Replace `rock` by up to two smaller children in free slots.
    fn split(&mut self, rock: Asteroid, rng: &mut SmallRng) {
        if rock.size == 0 {
            return;
        }
        let mut children = 0;
        for slot in self.asteroids.iter_mut().filter(|a| !a.active) {
            if children == 2 {
                break;
            }
            *slot = Asteroid {
                x: rock.x,
                y: rock.y,
                vx: rock.vx + random_tenths(rng),
                vy: rock.vy + random_tenths(rng),
                size: rock.size - 1,
                active: true,
            };
            children += 1;
        }
    }

    fn resolve_hits(&mut self, rng: &mut SmallRng) {
        for b in 0..MAX_BULLETS {
            if !self.bullets[b].active {
                continue;
            }
            for a in 0..MAX_ASTEROIDS {
                let rock = self.asteroids[a];
                if !rock.active {
                    continue;
                }
                let bullet = self.bullets[b];
                if distance(bullet.x, bullet.y, rock.x, rock.y) < rock.radius() {
                    self.bullets[b].active = false;
                    self.asteroids[a].active = false;
                    self.score += (3 - rock.size as u32) * 10;
                    self.split(rock, rng);
                    break;
                }
            }
        }
    }

    fn ship_hit(&self) -> bool {
        self.asteroids.iter().filter(|a| a.active).any(|a| {
            distance(self.ship_x, self.ship_y, a.x, a.y) < a.radius() + SHIP_RADIUS
        })
    }

    fn step(&mut self, rng: &mut SmallRng) {
        self.fly();
        self.move_bullets();
        for rock in self.asteroids.iter_mut().filter(|a| a.active) {
            rock.drift();
        }
        self.resolve_hits(rng);
        if self.ship_hit() {
            self.game_over = true;
            return;
        }
        if self.active_asteroids() == 0 {
            debug!("asteroids: new wave");
            self.spawn_wave(rng);
        }
    }
}

impl Game for Asteroids {
    fn new(rng: &mut SmallRng, _now_ms: u64) -> Self {
        let mut game = Self {
            ship_x: 64.0,
            ship_y: 50.0,
            ship_vx: 0.0,
            ship_vy: 0.0,
            angle: 0.0,
            thrusting: false,
            asteroids: [Asteroid::default(); MAX_ASTEROIDS],
            bullets: [Bullet::default(); MAX_BULLETS],
            score: 0,
            game_over: false,
        };
        game.spawn_wave(rng);
        game
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.input.is_click(Button::Select) {
            self.fire();
        }
        if !ctx.frame_ready {
            return;
        }
        if ctx.input.is_hold(Button::Left) {
            self.angle -= TURN_RATE;
        }
        if ctx.input.is_hold(Button::Right) {
            self.angle += TURN_RATE;
        }
        self.thrusting = ctx.input.is_hold(Button::Up);
        self.step(ctx.rng);
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());

        let (sin, cos) = (libm::sinf(self.angle), libm::cosf(self.angle));
        // Rotate a ship-local point (x right, y down) into screen space.
        let at = |lx: f32, ly: f32| {
            (
                (self.ship_x + lx * cos - ly * sin) as i32,
                (self.ship_y + lx * sin + ly * cos) as i32,
            )
        };
        let segment = |display: &mut D, (x0, y0): (i32, i32), (x1, y1): (i32, i32)| {
            render::line(display, x0, y0, x1, y1);
        };
        let nose = at(0.0, -SHIP_NOSE);
        let left = at(-SHIP_TAIL, SHIP_TAIL);
        let right = at(SHIP_TAIL, SHIP_TAIL);
        segment(display, nose, left);
        segment(display, left, right);
        segment(display, right, nose);
        if self.thrusting {
            let flame = at(0.0, SHIP_TAIL + 4.0);
            segment(display, at(-1.0, SHIP_TAIL + 1.0), flame);
            segment(display, at(1.0, SHIP_TAIL + 1.0), flame);
        }

        for rock in self.asteroids.iter().filter(|a| a.active) {
            render::circle(display, rock.x as i32, rock.y as i32, rock.radius() as i32);
        }
        for bullet in self.bullets.iter().filter(|b| b.active) {
            render::dot(display, bullet.x as i32, bullet.y as i32);
        }
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}
