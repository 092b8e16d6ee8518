//! temaos - pocket console firmware core.
//!
//! Everything above the hardware lives here: the activity state machine,
//! the menus, the mini apps, the games, the file reader and the drawing
//! helpers. The library only needs an `embedded-graphics` draw target, a
//! [`storage::Storage`] and a [`radio::NetworkScanner`], so all of it runs
//! and tests on the host.
//!
//! Usage: `cargo test --lib` / `cargo test --test integration`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and provides the board side (panel, buttons, flash, radio, power).

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible in every module.
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Core
// ═══════════════════════════════════════════════════════════════════════════

pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod power_logic;

// ═══════════════════════════════════════════════════════════════════════════
// Screens
// ═══════════════════════════════════════════════════════════════════════════

pub mod app;
pub mod apps;
pub mod games;
pub mod reader;
pub mod render;

// ═══════════════════════════════════════════════════════════════════════════
// Collaborators
// ═══════════════════════════════════════════════════════════════════════════

pub mod radio;
pub mod storage;

pub use error::Error;
