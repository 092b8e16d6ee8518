//! Tetris on a 10x16 well.

use super::{Game, TickContext};
use crate::clock::elapsed;
use crate::input::Button;
use crate::render::{self, Canvas};
use rand::rngs::SmallRng;
use rand::Rng;

pub const FIELD_W: usize = 10;
pub const FIELD_H: usize = 16;

/// Cell size in pixels.
const BLOCK: i32 = 3;
const FIELD_LEFT: i32 = 40;
const FIELD_TOP: i32 = 14;

const LINE_POINTS: u32 = 100;
const SOFT_DROP_MS: u64 = 50;
const BASE_DROP_MS: u64 = 500;
const MIN_DROP_MS: u64 = 100;

/// The seven tetrominoes as four cell offsets. Offset #1 is the rotation
/// pivot.
const PIECES: [[(i32, i32); 4]; 7] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)], // I
    [(1, 0), (1, 1), (1, 2), (2, 2)], // L
    [(2, 0), (2, 1), (2, 2), (1, 2)], // J
    [(1, 1), (2, 1), (2, 0), (3, 0)], // S
    [(1, 0), (2, 0), (2, 1), (3, 1)], // Z
    [(1, 1), (0, 1), (2, 1), (1, 2)], // T
    [(1, 1), (2, 1), (1, 2), (2, 2)], // O
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Piece {
    kind: u8,
    cells: [(i32, i32); 4],
    x: i32,
    y: i32,
}

impl Piece {
    fn spawn(kind: u8) -> Self {
        Self {
            kind,
            cells: PIECES[kind as usize],
            x: FIELD_W as i32 / 2 - 2,
            y: 0,
        }
    }

    fn absolute(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().map(move |&(cx, cy)| (self.x + cx, self.y + cy))
    }

    fn rotated(&self) -> Self {
        let (px, py) = self.cells[1];
        let mut turned = *self;
        for cell in turned.cells.iter_mut() {
            let (x, y) = *cell;
            *cell = (px - (y - py), py + (x - px));
        }
        turned
    }

    fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

pub struct Tetris {
    /// 0 = empty, otherwise piece kind + 1.
    field: [[u8; FIELD_W]; FIELD_H],
    current: Piece,
    next_kind: u8,
    last_drop_ms: u64,
    score: u32,
    game_over: bool,
}

impl Tetris {
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.field[y][x]
    }

    /// Delay between gravity steps at the current score.
    pub fn drop_delay_ms(&self, soft_drop: bool) -> u64 {
        if soft_drop {
            return SOFT_DROP_MS;
        }
        let by_level = (self.score as u64 / 100) * 50;
        BASE_DROP_MS.saturating_sub(by_level).max(MIN_DROP_MS)
    }

    fn collides(&self, piece: &Piece) -> bool {
        piece.absolute().any(|(x, y)| {
            x < 0
                || x >= FIELD_W as i32
                || y >= FIELD_H as i32
                || (y >= 0 && self.field[y as usize][x as usize] != 0)
        })
    }

    /// Lock the falling piece into the field.
    fn place(&mut self) {
        let piece = self.current;
        for (x, y) in piece.absolute() {
            if y >= 0 {
                self.field[y as usize][x as usize] = piece.kind + 1;
            }
        }
    }

    /// Remove full rows bottom-up; returns how many were cleared.
    fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = FIELD_H;
        while y > 0 {
            let row = y - 1;
            if self.field[row].iter().all(|&c| c != 0) {
                for above in (1..=row).rev() {
                    self.field[above] = self.field[above - 1];
                }
                self.field[0] = [0; FIELD_W];
                cleared += 1;
                // Same row again: it now holds what was above.
            } else {
                y -= 1;
            }
        }
        self.score += cleared * LINE_POINTS;
        cleared
    }

    fn spawn_next(&mut self, rng: &mut SmallRng) {
        self.current = Piece::spawn(self.next_kind);
        self.next_kind = rng.gen_range(0..PIECES.len() as u8);
        if self.collides(&self.current) {
            self.game_over = true;
        }
    }

    fn try_move(&mut self, candidate: Piece) -> bool {
        if self.collides(&candidate) {
            return false;
        }
        self.current = candidate;
        true
    }

    fn gravity(&mut self, rng: &mut SmallRng) {
        let down = self.current.shifted(0, 1);
        if !self.try_move(down) {
            self.place();
            let lines = self.clear_lines();
            if lines > 0 {
                debug!("tetris: cleared {} lines", lines);
            }
            self.spawn_next(rng);
        }
    }
}

impl Game for Tetris {
    fn new(rng: &mut SmallRng, now_ms: u64) -> Self {
        let first = rng.gen_range(0..PIECES.len() as u8);
        let next = rng.gen_range(0..PIECES.len() as u8);
        Self {
            field: [[0; FIELD_W]; FIELD_H],
            current: Piece::spawn(first),
            next_kind: next,
            last_drop_ms: now_ms,
            score: 0,
            game_over: false,
        }
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;
        if input.is_click(Button::Left) {
            self.try_move(self.current.shifted(-1, 0));
        }
        if input.is_click(Button::Right) {
            self.try_move(self.current.shifted(1, 0));
        }
        if input.is_click(Button::Up) {
            self.try_move(self.current.rotated());
        }

        let delay = self.drop_delay_ms(input.is_hold(Button::Down));
        if elapsed(ctx.now_ms, self.last_drop_ms) > delay {
            self.last_drop_ms = ctx.now_ms;
            self.gravity(ctx.rng);
        }
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        let score = render::label_value("Score: ", self.score as i64);
        render::text(display, 0, 0, score.as_str());

        let right = FIELD_LEFT + FIELD_W as i32 * BLOCK;
        let bottom = FIELD_TOP + FIELD_H as i32 * BLOCK;
        render::stroke_rect(display, FIELD_LEFT - 1, FIELD_TOP - 1, right, bottom);

        let block = |display: &mut D, x: i32, y: i32, left: i32, top: i32| {
            let px = left + x * BLOCK;
            let py = top + y * BLOCK;
            render::fill_rect(display, px, py, px + BLOCK - 2, py + BLOCK - 2);
        };

        for (y, row) in self.field.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c != 0 {
                    block(display, x as i32, y as i32, FIELD_LEFT, FIELD_TOP);
                }
            }
        }
        if !self.game_over {
            for (x, y) in self.current.absolute() {
                if y >= 0 {
                    block(display, x, y, FIELD_LEFT, FIELD_TOP);
                }
            }
        }

        let preview_left = right + 10;
        render::text_at(display, preview_left, FIELD_TOP, "Next:", render::TextSize::Small);
        for &(x, y) in PIECES[self.next_kind as usize].iter() {
            block(display, x, y, preview_left, FIELD_TOP + 12);
        }
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

    fn empty(rng: &mut SmallRng) -> Tetris {
        Tetris::new(rng, 0)
    }

    #[test]
    fn single_line_clear_scores_100_and_shifts_down() {
        let mut r = rng();
        let mut t = empty(&mut r);
        for x in 0..FIELD_W {
            t.field[FIELD_H - 1][x] = 1;
        }
        t.field[FIELD_H - 2][3] = 5;
        assert_eq!(t.clear_lines(), 1);
        assert_eq!(t.score(), 100);
        assert_eq!(t.cell(3, FIELD_H - 1), 5);
        assert!((0..FIELD_W).all(|x| x == 3 || t.cell(x, FIELD_H - 1) == 0));
    }

    #[test]
    fn double_line_clear_scores_200() {
        let mut r = rng();
        let mut t = empty(&mut r);
        for x in 0..FIELD_W {
            t.field[FIELD_H - 1][x] = 2;
            t.field[FIELD_H - 2][x] = 3;
        }
        t.field[FIELD_H - 3][0] = 7;
        assert_eq!(t.clear_lines(), 2);
        assert_eq!(t.score(), 200);
        assert_eq!(t.cell(0, FIELD_H - 1), 7);
    }

    #[test]
    fn split_full_rows_are_both_cleared() {
        let mut r = rng();
        let mut t = empty(&mut r);
        for x in 0..FIELD_W {
            t.field[FIELD_H - 1][x] = 1;
            t.field[FIELD_H - 3][x] = 1;
        }
        t.field[FIELD_H - 2][4] = 6;
        assert_eq!(t.clear_lines(), 2);
        assert_eq!(t.cell(4, FIELD_H - 1), 6);
    }

    #[test]
    fn placing_a_piece_that_completes_a_row_clears_it() {
        let mut r = rng();
        let mut t = empty(&mut r);
        // Bottom row full except the four columns an I piece will cover.
        for x in 4..FIELD_W {
            t.field[FIELD_H - 1][x] = 1;
        }
        t.current = Piece {
            kind: 0,
            cells: PIECES[0],
            x: 0,
            y: FIELD_H as i32 - 2,
        };
        t.gravity(&mut r);
        assert_eq!(t.score(), 100);
        assert!((0..FIELD_W).all(|x| t.cell(x, FIELD_H - 1) == 0));
    }

    #[test]
    fn rotation_turns_about_second_cell() {
        let p = Piece::spawn(0);
        let r = p.rotated();
        // Horizontal I about (1,1) becomes vertical through x = 1.
        assert_eq!(r.cells, [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn rotation_blocked_by_wall_is_rejected() {
        let mut r = rng();
        let mut t = empty(&mut r);
        t.current = Piece {
            kind: 0,
            cells: [(1, 0), (1, 1), (1, 2), (1, 3)],
            x: -1,
            y: 2,
        };
        t.update(&mut frame(&mut r, Input::idle().with_click(Button::Up), 1));
        assert_eq!(t.current.cells, [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn walls_stop_sideways_moves() {
        let mut r = rng();
        let mut t = empty(&mut r);
        for i in 0..12 {
            t.update(&mut frame(&mut r, Input::idle().with_click(Button::Left), i));
        }
        assert!(t.current.absolute().all(|(x, _)| x >= 0));
        assert!(t.current.absolute().any(|(x, _)| x == 0));
    }

    #[test]
    fn spawn_collision_ends_the_game() {
        let mut r = rng();
        let mut t = empty(&mut r);
        for y in 0..3 {
            for x in 0..FIELD_W - 1 {
                t.field[y][x] = 1;
            }
        }
        t.spawn_next(&mut r);
        assert!(t.is_over());
    }

    #[test]
    fn drop_delay_speeds_up_with_score() {
        let mut r = rng();
        let mut t = empty(&mut r);
        assert_eq!(t.drop_delay_ms(false), 500);
        assert_eq!(t.drop_delay_ms(true), 50);
        t.score = 300;
        assert_eq!(t.drop_delay_ms(false), 350);
        t.score = 5000;
        assert_eq!(t.drop_delay_ms(false), 100);
    }
}
