//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, geometry and storage
//! layout live here so they can be tuned in one place.

// Firmware identity

/// Version string shown on the system info screen.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Board name shown on the system info screen.
pub const BOARD_NAME: &str = "nRF52840";

// Display

/// Panel width in pixels.
pub const SCREEN_WIDTH: i32 = 128;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: i32 = 64;

/// Height of one text row (one SSD1306 page).
pub const ROW_HEIGHT: i32 = 8;

/// Y coordinate of the separator line under a screen header.
pub const HEADER_LINE_Y: i32 = 10;

/// Size of a full-screen 1-bit raster in page format.
pub const FRAME_BYTES: usize = (SCREEN_WIDTH * SCREEN_HEIGHT / 8) as usize;

/// Enable automatic OLED screen power-off after inactivity.
pub const SCREEN_AUTO_OFF_ENABLED: bool = true;

/// Inactivity timeout before OLED is turned off (seconds).
pub const SCREEN_AUTO_OFF_TIMEOUT_SECS: u64 = 120;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button LEFT    → P0.24
//   Button RIGHT   → P0.25
//   Button SELECT  → P0.02
//   Button EXIT    → P0.03
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

// Timing

/// Main loop period (ms). The frame clock below is checked every loop.
pub const LOOP_PERIOD_MS: u64 = 10;

/// Frame clock interval for the physics of the fast games (ms).
pub const FRAME_INTERVAL_MS: u64 = 20;

/// How long the boot splash stays up (ms).
pub const BOOT_SPLASH_MS: u64 = 2000;

/// Default duration of a message box (ms).
pub const MESSAGE_MS: u64 = 2000;

/// Auto-repeat period for held Up/Down in the reader (ms).
pub const HOLD_REPEAT_MS: u64 = 150;

/// Delay between showing a power message and acting on it (ms).
pub const POWER_ACTION_DELAY_MS: u64 = 1000;

// Menus

/// Items shown per page in the main menu.
pub const MAIN_MENU_PER_PAGE: usize = 4;

/// Items shown per page in short menus (settings, mini apps).
pub const SHORT_MENU_PER_PAGE: usize = 3;

/// Items shown per page in the app and game lists.
pub const LONG_MENU_PER_PAGE: usize = 5;

// Reader

/// Characters per rendered text line.
pub const READER_LINE_CHARS: usize = 21;

/// Text lines per page below the title row.
pub const READER_PAGE_LINES: usize = 7;

/// File entries per screen in the reader list.
pub const READER_LIST_ROWS: usize = 6;

/// Capacity of the page-offset history used for paging back.
pub const READER_HISTORY_CAP: usize = 150;

// Storage

/// Maximum number of files in the store.
pub const MAX_FILES: usize = 8;

/// Maximum length of a file name (bytes).
pub const MAX_FILE_NAME: usize = 32;

/// Maximum size of one file (bytes). Large enough for a full-screen `.tos`
/// image (1024 hex literals).
pub const MAX_FILE_BYTES: usize = 6144;

/// Largest flash item; a file slot is persisted as several chunks.
pub const FLASH_CHUNK_BYTES: usize = 2048;

/// Flash page index where the file store starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 232;

/// Number of flash pages reserved for the file store.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 16;

/// File the text editor loads and saves.
pub const NOTE_FILE_NAME: &str = "note.txt";

/// Maximum length of the editor note.
pub const NOTE_MAX_CHARS: usize = 120;

// Scanner (BLE advertisers)

/// Duration of one scan window (seconds).
pub const SCAN_DURATION_SECS: u64 = 5;

/// Maximum number of advertisers kept from one scan.
pub const SCAN_MAX_RESULTS: usize = 16;

/// Networks listed per page in the scanner.
pub const SCAN_PER_PAGE: usize = 4;

/// Longest network name shown before it is cut and suffixed with "..".
pub const SCAN_NAME_CHARS: usize = 15;

// Games

/// Step unit of the dino runner: the step delay is a multiple of this (ms).
pub const DINO_STEP_UNIT_MS: u64 = 4;

/// Upper bound on dino steps run in one loop when catching up.
pub const DINO_MAX_CATCHUP_STEPS: u32 = 16;

/// Points at which a pong match ends.
pub const PONG_WINNING_SCORE: u32 = 5;
