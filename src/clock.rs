//! Frame pacing for the physics of the fast games.

/// Milliseconds between `since` and `now`, zero if the clock went backwards.
pub fn elapsed(now_ms: u64, since_ms: u64) -> u64 {
    now_ms.saturating_sub(since_ms)
}

/// Fires at most once per interval.
///
/// The next interval starts at the moment the clock fired, so a late poll
/// delays the following frame rather than producing a burst.
pub struct FrameClock {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl FrameClock {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// True when a frame is due. The first poll is always due.
    pub fn is_ready(&mut self, now_ms: u64) -> bool {
        match self.last_ms {
            Some(last) if elapsed(now_ms, last) < self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}
