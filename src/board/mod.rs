//! Board support for the nRF52840 handheld.
//!
//! The library never touches hardware; this module connects it to the
//! panel, the buttons, the internal flash and the radio.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 6 tactile switches, active-low with pull-ups
//! - **Flash**: file table persisted with `sequential-storage`
//! - **Radio**: SoftDevice BLE scanner behind `NetworkScanner`
//! - **Power**: system off and reset

pub mod buttons;
pub mod display;
pub mod flash;
pub mod power;
pub mod radio;
