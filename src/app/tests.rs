//! Unit tests for the activity state machine.
//!
//! These drive [`App`] tick by tick against an in-memory store and frame
//! buffer, the same way the board loop does.

use super::*;
use crate::config::NOTE_FILE_NAME;
use crate::radio::NoRadio;
use crate::render::FrameBuffer;
use crate::storage::RamFs;

struct Rig {
    app: App<RamFs, NoRadio>,
    fb: FrameBuffer,
    now: u64,
}

impl Rig {
    /// App past the boot splash, sitting in the main menu.
    fn booted(fs: RamFs) -> Self {
        let mut rig = Rig {
            app: App::new(fs, NoRadio, 1),
            fb: FrameBuffer::new(),
            now: 0,
        };
        rig.app.tick(&Input::idle(), 0, &mut rig.fb);
        rig.wait(BOOT_SPLASH_MS);
        assert_eq!(rig.app.current(), Activity::MainMenu);
        rig
    }

    fn press(&mut self, button: Button) -> Request {
        self.now += 10;
        self.app.tick(&Input::idle().with_click(button), self.now, &mut self.fb)
    }

    fn presses(&mut self, buttons: &[Button]) {
        for &b in buttons {
            self.press(b);
        }
    }

    /// Idle ticks for `ms`; returns the first request raised.
    fn wait(&mut self, ms: u64) -> Request {
        let until = self.now + ms;
        while self.now < until {
            self.now += 10;
            let request = self.app.tick(&Input::idle(), self.now, &mut self.fb);
            if request != Request::None {
                return request;
            }
        }
        Request::None
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Boot and menus
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn boot_splash_ignores_buttons_until_deadline() {
    let mut app = App::new(RamFs::new(), NoRadio, 1);
    let mut fb = FrameBuffer::new();
    app.tick(&Input::idle(), 100, &mut fb);
    app.tick(&Input::idle().with_click(Button::Select), 1000, &mut fb);
    assert_eq!(app.current(), Activity::Boot);
    app.tick(&Input::idle(), 100 + BOOT_SPLASH_MS, &mut fb);
    assert_eq!(app.current(), Activity::MainMenu);
}

#[test]
fn menus_reach_a_game_and_exit_walks_back() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Down, Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::MiniApps);
    rig.press(Button::Select);
    assert_eq!(rig.app.current(), Activity::Games);

    // Up from the top lands on "Back", once more on "Dice".
    rig.presses(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Dice);
    assert!(matches!(rig.app.game(), GameSlot::Dice(_)));

    rig.press(Button::Exit);
    assert_eq!(rig.app.current(), Activity::Games);
    assert!(matches!(rig.app.game(), GameSlot::Empty));
    assert_eq!(rig.app.menu_state(Activity::Games).map(|m| m.selected(5)), Some(7));

    rig.press(Button::Exit);
    assert_eq!(rig.app.current(), Activity::MiniApps);
    assert_eq!(rig.app.menu_state(Activity::Games), Some(&MenuState::new()));
}

#[test]
fn back_item_returns_to_parent() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Down, Button::Down, Button::Select, Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Apps);
    rig.presses(&[Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::MiniApps);
    // The mini apps cursor still sits on "Apps"; "Back" is one below.
    rig.presses(&[Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::MainMenu);
}

#[test]
fn exit_from_an_app_returns_to_apps_list() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Down, Button::Down, Button::Select, Button::Down, Button::Select]);
    rig.press(Button::Select);
    assert_eq!(rig.app.current(), Activity::Stopwatch);
    assert_eq!(rig.app.previous(), Activity::Apps);
    rig.press(Button::Exit);
    assert_eq!(rig.app.current(), Activity::Apps);
}

// ═══════════════════════════════════════════════════════════════════════════
// Messages and power
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn calibrate_blocks_handlers_for_two_seconds() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Settings);
    rig.press(Button::Select);
    assert_eq!(rig.app.message(), Some("Calibrating..."));

    // Exit is swallowed while the message is up.
    rig.press(Button::Exit);
    assert_eq!(rig.app.current(), Activity::Settings);
    rig.wait(MESSAGE_MS);
    assert_eq!(rig.app.message(), None);
    assert_eq!(rig.app.current(), Activity::Settings);
}

#[test]
fn about_opens_system_info_and_exit_returns_to_settings() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Up, Button::Select, Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::SystemInfo);
    rig.press(Button::Exit);
    assert_eq!(rig.app.current(), Activity::Settings);
}

#[test]
fn power_off_is_requested_after_the_message() {
    let mut rig = Rig::booted(RamFs::new());
    assert_eq!(rig.press(Button::Select), Request::None);
    assert_eq!(rig.app.message(), Some("Power off..."));
    assert_eq!(rig.wait(POWER_ACTION_DELAY_MS + 10), Request::PowerOff);
    assert_eq!(rig.app.message(), None);
}

#[test]
fn restart_is_requested_after_the_message() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Down, Button::Select]);
    assert_eq!(rig.wait(POWER_ACTION_DELAY_MS + 10), Request::Restart);
}

// ═══════════════════════════════════════════════════════════════════════════
// Store-backed apps
// ═══════════════════════════════════════════════════════════════════════════

fn open_apps(rig: &mut Rig) {
    rig.presses(&[Button::Down, Button::Down, Button::Select, Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Apps);
}

#[test]
fn reader_on_empty_store_shows_notice_and_stays_in_apps() {
    let mut rig = Rig::booted(RamFs::new());
    open_apps(&mut rig);
    // Up lands on "Back", once more on "Reader".
    rig.presses(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.message(), Some("No files :("));
    assert_eq!(rig.app.current(), Activity::Apps);
    rig.wait(MESSAGE_MS);
    assert_eq!(rig.app.current(), Activity::Apps);
}

#[test]
fn reader_opens_when_files_exist() {
    let mut fs = RamFs::new();
    fs.write("a.txt", b"hello").unwrap();
    let mut rig = Rig::booted(fs);
    open_apps(&mut rig);
    rig.presses(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Reader);
    rig.press(Button::Select);
    assert!(rig.app.reader().in_file_view());
}

#[test]
fn editor_save_shows_saved_and_writes_note() {
    let mut rig = Rig::booted(RamFs::new());
    open_apps(&mut rig);
    rig.presses(&[Button::Up, Button::Up, Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::TextEditor);
    rig.presses(&[Button::Right, Button::Right, Button::Select]);
    assert_eq!(rig.app.message(), Some("Saved!"));
    assert!(rig.app.storage().exists(NOTE_FILE_NAME));
    rig.wait(MESSAGE_MS);
    assert_eq!(rig.app.current(), Activity::TextEditor);
    assert_eq!(rig.app.editor().note(), "AA");
}

#[test]
fn apps_start_fresh_each_time_they_are_opened() {
    let mut rig = Rig::booted(RamFs::new());
    open_apps(&mut rig);
    // Counter is row 6: page 1, row 1.
    rig.presses(&[Button::Right, Button::Down, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Counter);
    rig.presses(&[Button::Up, Button::Up]);
    assert_eq!(rig.app.counter().count, 2);
    rig.presses(&[Button::Exit, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Counter);
    assert_eq!(rig.app.counter().count, 0);
}

#[test]
fn editor_picker_resets_but_saved_note_reloads() {
    let mut rig = Rig::booted(RamFs::new());
    open_apps(&mut rig);
    rig.presses(&[Button::Up, Button::Up, Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::TextEditor);
    rig.presses(&[Button::Up, Button::Right, Button::Select]);
    rig.wait(MESSAGE_MS);
    assert_eq!(rig.app.editor().candidate(), 'B');

    rig.presses(&[Button::Exit, Button::Select]);
    assert_eq!(rig.app.current(), Activity::TextEditor);
    assert_eq!(rig.app.editor().candidate(), 'A');
    assert_eq!(rig.app.editor().note(), "B");
}

#[test]
fn dice_keeps_its_last_roll_across_visits() {
    let mut rig = Rig::booted(RamFs::new());
    rig.presses(&[Button::Down, Button::Down, Button::Select, Button::Select]);
    rig.presses(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Dice);
    rig.press(Button::Select);
    let rolled = match rig.app.game() {
        GameSlot::Dice(d) => d.value(),
        _ => panic!("dice not running"),
    };

    rig.presses(&[Button::Exit, Button::Select]);
    assert_eq!(rig.app.current(), Activity::Dice);
    match rig.app.game() {
        GameSlot::Dice(d) => {
            assert!(d.rolled());
            assert_eq!(d.value(), rolled);
        }
        _ => panic!("dice not running"),
    }
}
