//! SSD1306 OLED display wrapper.
//!
//! The buffered driver is itself an `embedded-graphics` draw target, so the
//! app renders straight into the driver's buffer and the loop flushes it.

use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        defmt::warn!("display: init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

/// Push the frame the app just drew.
pub fn present<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = display.flush();
}

/// Switch the panel on or off; the buffer is kept either way.
pub fn set_power<I2C>(display: &mut Display<I2C>, on: bool)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = display.set_display_on(on);
}
