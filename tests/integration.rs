//! Integration tests for the temaos public API: the app shell driven tick by
//! tick against the in-memory store and frame buffer.

use temaos::app::{Activity, App, GameSlot, Request};
use temaos::config::{BOOT_SPLASH_MS, MESSAGE_MS, READER_HISTORY_CAP};
use temaos::input::{Button, ButtonSampler};
use temaos::radio::{Network, NetworkScanner, ScanStatus, ScanTable};
use temaos::render::FrameBuffer;
use temaos::storage::{catalog, RamFs, Storage};

/// Scanner that finishes with fixed results on the next poll.
#[derive(Default)]
struct InstantScanner {
    table: ScanTable,
}

impl NetworkScanner for InstantScanner {
    fn start_scan(&mut self) {
        self.table.begin();
        self.table.record([1; 6], -60, &[5, 0x09, b'h', b'o', b'm', b'e']);
        self.table.record([2; 6], -40, &[5, 0x09, b'c', b'a', b'f', b'e']);
        self.table.finish(true);
    }

    fn status(&self) -> ScanStatus {
        self.table.status()
    }

    fn network(&self, index: usize) -> Option<Network> {
        self.table.network(index)
    }

    fn clear(&mut self) {
        self.table.clear();
    }
}

struct Device {
    app: App<RamFs, InstantScanner>,
    sampler: ButtonSampler,
    fb: FrameBuffer,
    now: u64,
}

impl Device {
    fn power_on(fs: RamFs) -> Self {
        let mut dev = Device {
            app: App::new(fs, InstantScanner::default(), 42),
            sampler: ButtonSampler::new(0),
            fb: FrameBuffer::new(),
            now: 0,
        };
        dev.idle(BOOT_SPLASH_MS + 10);
        assert_eq!(dev.app.current(), Activity::MainMenu);
        dev
    }

    /// One loop iteration with raw button levels, like the board loop.
    fn step(&mut self, pressed: [bool; 6]) -> Request {
        self.now += 10;
        let input = self.sampler.tick(pressed, self.now);
        self.app.tick(&input, self.now, &mut self.fb)
    }

    /// Press and release a button.
    fn tap(&mut self, button: Button) {
        let mut raw = [false; 6];
        raw[button as usize] = true;
        self.step(raw);
        self.step([false; 6]);
    }

    fn taps(&mut self, buttons: &[Button]) {
        for &b in buttons {
            self.tap(b);
        }
    }

    fn idle(&mut self, ms: u64) {
        let until = self.now + ms;
        while self.now < until {
            self.step([false; 6]);
        }
    }

    fn open_apps(&mut self) {
        self.taps(&[Button::Down, Button::Down, Button::Select, Button::Down, Button::Select]);
        assert_eq!(self.app.current(), Activity::Apps);
    }

    fn open_games(&mut self) {
        self.taps(&[Button::Down, Button::Down, Button::Select, Button::Select]);
        assert_eq!(self.app.current(), Activity::Games);
    }
}

#[test]
fn dice_from_power_on() {
    let mut dev = Device::power_on(RamFs::new());
    dev.open_games();
    dev.taps(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(dev.app.current(), Activity::Dice);

    dev.tap(Button::Select);
    match dev.app.game() {
        GameSlot::Dice(d) => {
            assert!(d.rolled());
            assert!((1..=6).contains(&d.value()));
        }
        _ => panic!("dice not running"),
    }
    assert!(dev.fb.lit_count() > 0);
}

#[test]
fn pong_starts_fresh_each_time_it_is_entered() {
    let mut dev = Device::power_on(RamFs::new());
    dev.open_games();
    // Pong is row 6: page 1, row 1.
    dev.taps(&[Button::Right, Button::Down, Button::Select]);
    assert_eq!(dev.app.current(), Activity::Pong);
    dev.idle(500);
    dev.tap(Button::Exit);
    assert!(matches!(dev.app.game(), GameSlot::Empty));

    dev.tap(Button::Select);
    match dev.app.game() {
        GameSlot::Pong(p) => assert_eq!(p.scores(), (0, 0)),
        _ => panic!("pong not running"),
    }
}

#[test]
fn reader_pages_forward_and_back_over_the_seeded_welcome_file() {
    let mut fs = RamFs::new();
    catalog::install_defaults(&mut fs).unwrap();
    let mut dev = Device::power_on(fs);
    dev.open_apps();
    dev.taps(&[Button::Up, Button::Up, Button::Select]);
    assert_eq!(dev.app.current(), Activity::Reader);
    assert_eq!(dev.app.reader().file_count(), 2);

    dev.tap(Button::Select);
    assert_eq!(dev.app.reader().page_start(), Some(0));
    dev.tap(Button::Down);
    let second = dev.app.reader().page_start().unwrap();
    assert!(second > 0);
    assert_eq!(dev.app.reader().history_len(), 1);
    dev.tap(Button::Up);
    assert_eq!(dev.app.reader().page_start(), Some(0));
    assert_eq!(dev.app.reader().history_len(), 0);

    dev.tap(Button::Exit);
    assert!(!dev.app.reader().in_file_view());
    dev.tap(Button::Exit);
    assert_eq!(dev.app.current(), Activity::Apps);
}

#[test]
fn reader_history_keeps_the_most_recent_pages() {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!("line {}\n", i));
    }
    let mut fs = RamFs::new();
    fs.write("long.txt", text.as_bytes()).unwrap();

    let mut dev = Device::power_on(fs);
    dev.open_apps();
    dev.taps(&[Button::Up, Button::Up, Button::Select, Button::Select]);
    assert!(dev.app.reader().in_file_view());
    // 200 lines is 29 pages of 7; walking off the end stays on the last.
    for _ in 0..40 {
        dev.tap(Button::Down);
    }
    assert_eq!(dev.app.reader().history_len(), 28);
    assert!(dev.app.reader().history_len() <= READER_HISTORY_CAP);
    for _ in 0..28 {
        dev.tap(Button::Up);
    }
    assert_eq!(dev.app.reader().page_start(), Some(0));
}

#[test]
fn file_manager_delete_marks_store_dirty() {
    let mut fs = RamFs::new();
    catalog::install_defaults(&mut fs).unwrap();
    let mut dev = Device::power_on(fs);
    dev.open_apps();
    // File manager is row 3.
    dev.taps(&[Button::Down, Button::Down, Button::Down, Button::Select]);
    assert_eq!(dev.app.current(), Activity::FileManager);
    dev.taps(&[Button::Select, Button::Select]);
    assert_eq!(dev.app.message(), Some("Deleted"));
    assert_eq!(dev.app.storage().file_count(), 1);
    assert!(dev.app.storage().is_dirty());
    dev.idle(MESSAGE_MS);
    assert_eq!(dev.app.current(), Activity::FileManager);
}

#[test]
fn scanner_lists_strongest_first_and_exit_clears() {
    let mut dev = Device::power_on(RamFs::new());
    dev.open_apps();
    dev.taps(&[Button::Down, Button::Select]);
    assert_eq!(dev.app.current(), Activity::WifiScanner);
    dev.tap(Button::Select);
    assert_eq!(dev.app.scanner().status(), ScanStatus::Done(2));
    assert_eq!(dev.app.scanner().network(0).unwrap().name.as_str(), "cafe");
    dev.tap(Button::Exit);
    assert_eq!(dev.app.scanner().status(), ScanStatus::Idle);
    assert_eq!(dev.app.current(), Activity::Apps);
}

#[test]
fn held_button_clicks_only_once() {
    let mut dev = Device::power_on(RamFs::new());
    let mut raw = [false; 6];
    raw[Button::Down as usize] = true;
    for _ in 0..20 {
        dev.step(raw);
    }
    assert_eq!(dev.app.menu_state(Activity::MainMenu).unwrap().index, 1);
}
