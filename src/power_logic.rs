//! Display auto-off policy, kept free of hardware so it can be tested on
//! the host.

use crate::clock::elapsed;

/// Decide whether the screen should be on given the inactivity policy.
pub fn screen_should_be_on(auto_off_enabled: bool, idle_ms: u64, auto_off_timeout_ms: u64) -> bool {
    !(auto_off_enabled && idle_ms >= auto_off_timeout_ms)
}

/// Panel power change to apply this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenChange {
    None,
    TurnOn,
    TurnOff,
}

/// Tracks button activity and switches the panel off after a quiet spell.
pub struct ScreenPower {
    auto_off_enabled: bool,
    timeout_ms: u64,
    last_activity_ms: u64,
    on: bool,
}

impl ScreenPower {
    pub const fn new(auto_off_enabled: bool, timeout_ms: u64) -> Self {
        Self {
            auto_off_enabled,
            timeout_ms,
            last_activity_ms: 0,
            on: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Feed one tick. `active` is true while any button is down.
    ///
    /// The press that wakes a dark screen reports [`ScreenChange::TurnOn`];
    /// callers drop that tick's input so the wake press does nothing else.
    pub fn observe(&mut self, active: bool, now_ms: u64) -> ScreenChange {
        if active {
            self.last_activity_ms = now_ms;
        }
        let want_on = screen_should_be_on(
            self.auto_off_enabled,
            elapsed(now_ms, self.last_activity_ms),
            self.timeout_ms,
        );
        match (self.on, want_on) {
            (false, true) => {
                self.on = true;
                info!("power: screen on");
                ScreenChange::TurnOn
            }
            (true, false) => {
                self.on = false;
                info!("power: screen off after {} ms idle", self.timeout_ms);
                ScreenChange::TurnOff
            }
            _ => ScreenChange::None,
        }
    }
}
