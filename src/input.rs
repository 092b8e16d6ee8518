//! Button sampling: debouncing, press edges and held levels.
//!
//! Six buttons (active-low on the board, but this module only sees
//! "pressed" booleans):
//!   - UP / DOWN / LEFT / RIGHT - navigation and game control
//!   - SELECT                   - confirm / action
//!   - EXIT                     - back
//!
//! [`ButtonSampler::tick`] runs once per loop, before any handler looks at
//! the buttons, and produces one immutable [`Input`] snapshot.

/// Logical buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
    Exit,
}

impl Button {
    /// All buttons, in the order raw levels are passed to the sampler.
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Select,
        Button::Exit,
    ];

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Button state for one loop iteration.
///
/// A click is the press edge: true in exactly one snapshot per physical
/// press. A hold is the debounced level: true in every snapshot while the
/// button is down, including the one carrying the click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    clicks: u8,
    holds: u8,
}

impl Input {
    /// No buttons pressed.
    pub const fn idle() -> Self {
        Self { clicks: 0, holds: 0 }
    }

    /// A press edge of `button` (which also counts as held).
    pub const fn with_click(self, button: Button) -> Self {
        Self {
            clicks: self.clicks | button.mask(),
            holds: self.holds | button.mask(),
        }
    }

    /// `button` held down without a new edge.
    pub const fn with_hold(self, button: Button) -> Self {
        Self {
            clicks: self.clicks,
            holds: self.holds | button.mask(),
        }
    }

    pub fn is_click(&self, button: Button) -> bool {
        self.clicks & button.mask() != 0
    }

    pub fn is_hold(&self, button: Button) -> bool {
        self.holds & button.mask() != 0
    }

    /// Any press edge at all (activity tracking).
    pub fn any_click(&self) -> bool {
        self.clicks != 0
    }

    /// Any button down at all.
    pub fn any_hold(&self) -> bool {
        self.holds != 0
    }
}

#[derive(Clone, Copy)]
struct Debounced {
    level: bool,
    candidate: bool,
    since_ms: u64,
}

impl Debounced {
    const RELEASED: Self = Self {
        level: false,
        candidate: false,
        since_ms: 0,
    };

    /// Returns true on the debounced press edge.
    fn update(&mut self, raw: bool, now_ms: u64, debounce_ms: u64) -> bool {
        if raw != self.candidate {
            self.candidate = raw;
            self.since_ms = now_ms;
        }
        if self.candidate != self.level && now_ms.saturating_sub(self.since_ms) >= debounce_ms {
            self.level = self.candidate;
            return self.level;
        }
        false
    }
}

/// Debounces raw button levels into [`Input`] snapshots.
pub struct ButtonSampler {
    buttons: [Debounced; 6],
    debounce_ms: u64,
}

impl ButtonSampler {
    /// `debounce_ms` is how long a raw level must be stable before it counts.
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            buttons: [Debounced::RELEASED; 6],
            debounce_ms,
        }
    }

    /// Sample every button once. `pressed` is indexed like [`Button::ALL`].
    pub fn tick(&mut self, pressed: [bool; 6], now_ms: u64) -> Input {
        let mut input = Input::idle();
        for (i, button) in Button::ALL.iter().enumerate() {
            let state = &mut self.buttons[i];
            if state.update(pressed[i], now_ms, self.debounce_ms) {
                input = input.with_click(*button);
            } else if state.level {
                input = input.with_hold(*button);
            }
        }
        input
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
