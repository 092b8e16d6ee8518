//! GPIO button levels.
//!
//! Six physical buttons (active-low with internal pull-up):
//!   - UP / DOWN / LEFT / RIGHT
//!   - SELECT
//!   - EXIT
//!
//! Debouncing happens in [`temaos::input::ButtonSampler`]; this module only
//! reads raw levels once per loop.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

pub struct Buttons {
    pins: [Input<'static>; 6],
}

impl Buttons {
    /// Pins in [`temaos::input::Button::ALL`] order.
    pub fn new(pins: [AnyPin; 6]) -> Self {
        Self {
            pins: pins.map(|pin| Input::new(pin, Pull::Up)),
        }
    }

    /// Pressed state of every button, in the sampler's order.
    pub fn read(&self) -> [bool; 6] {
        core::array::from_fn(|i| self.pins[i].is_low())
    }
}
