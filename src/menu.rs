//! Multi-page menu navigation and the static menu tables.
//!
//! A menu is a flat list of labels shown `per_page` at a time. The cursor
//! is `(page, index)` with `index` relative to the page; the page count is
//! re-derived from the item count on every navigation call so a short last
//! page always uses its real size.

use crate::config::{LONG_MENU_PER_PAGE, MAIN_MENU_PER_PAGE, SHORT_MENU_PER_PAGE};
use crate::input::{Button, Input};

/// Number of pages needed for `item_count` items (at least one).
pub fn page_count(item_count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    item_count.div_ceil(per_page).max(1)
}

/// Cursor state of one menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    /// Cursor row within the current page.
    pub index: usize,
    /// Current page.
    pub page: usize,
    /// Items on the current page (as of the last navigation).
    pub max_items: usize,
    /// Page count (as of the last navigation).
    pub max_pages: usize,
}

impl MenuState {
    pub const fn new() -> Self {
        Self {
            index: 0,
            page: 0,
            max_items: 0,
            max_pages: 1,
        }
    }

    /// Cursor back to the first item.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Items on `page` for a list of `item_count`.
    pub fn items_on_page(page: usize, item_count: usize, per_page: usize) -> usize {
        let start = page * per_page;
        item_count.saturating_sub(start).min(per_page)
    }

    /// Absolute item number under the cursor.
    pub fn selected(&self, per_page: usize) -> usize {
        self.page * per_page + self.index
    }

    /// Apply this tick's navigation clicks.
    ///
    /// Up/Down wrap across page boundaries and around the whole list;
    /// Left/Right flip pages (only when there is more than one) and put the
    /// cursor on the first row.
    pub fn navigate(&mut self, input: &Input, item_count: usize, per_page: usize) {
        self.max_pages = page_count(item_count, per_page);
        if self.page >= self.max_pages {
            self.page = self.max_pages - 1;
        }
        self.clamp_index(item_count, per_page);

        if input.is_click(Button::Up) {
            self.step_up(item_count, per_page);
        } else if input.is_click(Button::Down) {
            self.step_down(item_count, per_page);
        } else if input.is_click(Button::Left) && self.max_pages > 1 {
            self.page = (self.page + self.max_pages - 1) % self.max_pages;
            self.index = 0;
        } else if input.is_click(Button::Right) && self.max_pages > 1 {
            self.page = (self.page + 1) % self.max_pages;
            self.index = 0;
        }

        self.max_items = Self::items_on_page(self.page, item_count, per_page);
    }

    fn clamp_index(&mut self, item_count: usize, per_page: usize) {
        let on_page = Self::items_on_page(self.page, item_count, per_page);
        if self.index >= on_page {
            self.index = on_page.saturating_sub(1);
        }
    }

    fn step_up(&mut self, item_count: usize, per_page: usize) {
        if self.index > 0 {
            self.index -= 1;
        } else if self.page > 0 {
            self.page -= 1;
            self.index = per_page.saturating_sub(1);
        } else {
            self.page = self.max_pages - 1;
            let on_last = Self::items_on_page(self.page, item_count, per_page);
            self.index = on_last.saturating_sub(1);
        }
    }

    fn step_down(&mut self, item_count: usize, per_page: usize) {
        let on_page = Self::items_on_page(self.page, item_count, per_page);
        if self.index + 1 < on_page {
            self.index += 1;
        } else if self.page + 1 < self.max_pages {
            self.page += 1;
            self.index = 0;
        } else {
            self.page = 0;
            self.index = 0;
        }
    }
}

/// A static menu: title, labels and page size.
pub struct MenuDef {
    pub title: &'static str,
    pub items: &'static [&'static str],
    pub per_page: usize,
}

impl MenuDef {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub const MAIN_MENU: MenuDef = MenuDef {
    title: "Main menu",
    items: &["Power off", "Restart", "Mini apps", "Settings"],
    per_page: MAIN_MENU_PER_PAGE,
};

pub const SETTINGS_MENU: MenuDef = MenuDef {
    title: "Settings",
    items: &["Calibrate", "About", "Back"],
    per_page: SHORT_MENU_PER_PAGE,
};

pub const MINI_APPS_MENU: MenuDef = MenuDef {
    title: "Mini apps",
    items: &["Games", "Apps", "Back"],
    per_page: SHORT_MENU_PER_PAGE,
};

pub const APPS_MENU: MenuDef = MenuDef {
    title: "Apps",
    items: &[
        "Stopwatch",
        "WiFi scan",
        "Timer",
        "File manager",
        "Draw pad",
        "Temp conv",
        "Counter",
        "Text editor",
        "Multiply table",
        "Reader",
        "Back",
    ],
    per_page: LONG_MENU_PER_PAGE,
};

pub const GAMES_MENU: MenuDef = MenuDef {
    title: "Games",
    items: &[
        "Tetris",
        "Snake",
        "Flappy Bird",
        "Arkanoid",
        "Dino",
        "Asteroids",
        "Pong",
        "Dice",
        "Back",
    ],
    per_page: LONG_MENU_PER_PAGE,
};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
