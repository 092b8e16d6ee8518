//! Application shell: the activity state machine and its per-tick dispatch.
//!
//! [`App`] owns every screen's state record plus the two collaborators
//! (file store and network scanner). Each [`App::tick`] does exactly one of:
//!
//! - keep showing a pending message box until its deadline,
//! - run the handler of the current [`Activity`].
//!
//! Handlers report back through [`Flow`]; the shell turns `Exit` into a
//! transition to the previous screen and `Notice` into a message box. Power
//! actions leave the shell as a [`Request`] for the board to carry out.

#[cfg(test)]
mod tests;

use crate::apps::counter::Counter;
use crate::apps::drawpad::DrawPad;
use crate::apps::editor::TextEditor;
use crate::apps::files::FileManager;
use crate::apps::multiply::MultiplyTable;
use crate::apps::scanner::ScannerView;
use crate::apps::stopwatch::Stopwatch;
use crate::apps::system_info;
use crate::apps::temp::TempConverter;
use crate::apps::timer::Timer;
use crate::clock::{elapsed, FrameClock};
use crate::config::{BOOT_SPLASH_MS, FIRMWARE_VERSION, FRAME_INTERVAL_MS, MESSAGE_MS, POWER_ACTION_DELAY_MS};
use crate::games::arkanoid::Arkanoid;
use crate::games::asteroids::Asteroids;
use crate::games::dice::Dice;
use crate::games::dino::Dino;
use crate::games::flappy::Flappy;
use crate::games::pong::Pong;
use crate::games::snake::Snake;
use crate::games::tetris::Tetris;
use crate::games::{self, Game, TickContext};
use crate::input::{Button, Input};
use crate::menu::{MenuDef, MenuState, APPS_MENU, GAMES_MENU, MAIN_MENU, MINI_APPS_MENU, SETTINGS_MENU};
use crate::radio::NetworkScanner;
use crate::reader::ReaderState;
use crate::render::{self, Canvas, TextSize};
use crate::storage::Storage;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// What a handler wants after its tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep running this screen.
    Stay,
    /// Leave to the screen it was entered from.
    Exit,
    /// Show a message box, then come back to this screen.
    Notice(&'static str),
}

/// Every screen the device can show. Exactly one is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    Boot,
    MainMenu,
    Settings,
    SystemInfo,
    MiniApps,
    Apps,
    Games,
    Stopwatch,
    WifiScanner,
    Timer,
    FileManager,
    DrawPad,
    TempConverter,
    Counter,
    TextEditor,
    Reader,
    Dice,
    MultiplicationTable,
    Pong,
    Asteroids,
    FlappyBird,
    Tetris,
    Dino,
    Snake,
    Arkanoid,
}

/// Apps menu rows, in menu order ("Back" excluded).
const APP_ITEMS: [Activity; 10] = [
    Activity::Stopwatch,
    Activity::WifiScanner,
    Activity::Timer,
    Activity::FileManager,
    Activity::DrawPad,
    Activity::TempConverter,
    Activity::Counter,
    Activity::TextEditor,
    Activity::MultiplicationTable,
    Activity::Reader,
];

/// Games menu rows, in menu order ("Back" excluded).
const GAME_ITEMS: [Activity; 8] = [
    Activity::Tetris,
    Activity::Snake,
    Activity::FlappyBird,
    Activity::Arkanoid,
    Activity::Dino,
    Activity::Asteroids,
    Activity::Pong,
    Activity::Dice,
];

/// Action the board must perform on behalf of the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    None,
    PowerOff,
    Restart,
}

/// What happens when a message box times out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Then {
    /// Back to the current screen.
    Resume,
    /// Switch to another screen.
    Enter(Activity),
    /// Hand a request to the board.
    Request(Request),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Message {
    text: &'static str,
    until_ms: u64,
    then: Then,
}

/// State of the game being played. Replaced on entry, dropped on exit.
pub enum GameSlot {
    Empty,
    Tetris(Tetris),
    Snake(Snake),
    Flappy(Flappy),
    Arkanoid(Arkanoid),
    Dino(Dino),
    Asteroids(Asteroids),
    Pong(Pong),
    Dice(Dice),
}

#[derive(Default)]
struct Menus {
    main: MenuState,
    settings: MenuState,
    mini_apps: MenuState,
    apps: MenuState,
    games: MenuState,
}

pub struct App<S: Storage, N: NetworkScanner> {
    storage: S,
    scanner: N,
    rng: SmallRng,
    frame: FrameClock,

    current: Activity,
    previous: Activity,
    boot_started: Option<u64>,
    message: Option<Message>,

    menus: Menus,
    game: GameSlot,
    parked_dice: Option<Dice>,
    reader: ReaderState,
    stopwatch: Stopwatch,
    timer: Timer,
    counter: Counter,
    temp: TempConverter,
    multiply: MultiplyTable,
    drawpad: DrawPad,
    scanner_view: ScannerView,
    files: FileManager,
    editor: TextEditor,
}

/// Navigate a static menu and report a Select on it.
fn drive_menu<D: Canvas>(state: &mut MenuState, def: &MenuDef, input: &Input, display: &mut D) -> Option<usize> {
    state.navigate(input, def.len(), def.per_page);
    let picked = input.is_click(Button::Select).then(|| state.selected(def.per_page));
    render::draw_menu(display, def, state);
    picked
}

impl<S: Storage, N: NetworkScanner> App<S, N> {
    /// `seed` feeds every random choice the games make.
    pub fn new(storage: S, scanner: N, seed: u64) -> Self {
        Self {
            storage,
            scanner,
            rng: SmallRng::seed_from_u64(seed),
            frame: FrameClock::new(FRAME_INTERVAL_MS),
            current: Activity::Boot,
            previous: Activity::Boot,
            boot_started: None,
            message: None,
            menus: Menus::default(),
            game: GameSlot::Empty,
            parked_dice: None,
            reader: ReaderState::new(),
            stopwatch: Stopwatch::new(),
            timer: Timer::new(),
            counter: Counter::default(),
            temp: TempConverter::new(),
            multiply: MultiplyTable::new(),
            drawpad: DrawPad::new(),
            scanner_view: ScannerView::new(),
            files: FileManager::new(),
            editor: TextEditor::new(),
        }
    }

    pub fn current(&self) -> Activity {
        self.current
    }

    pub fn previous(&self) -> Activity {
        self.previous
    }

    /// Text of the message box on screen, if any.
    pub fn message(&self) -> Option<&'static str> {
        self.message.map(|m| m.text)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn scanner(&self) -> &N {
        &self.scanner
    }

    /// Cursor of one of the five menus; `None` for other activities.
    pub fn menu_state(&self, menu: Activity) -> Option<&MenuState> {
        match menu {
            Activity::MainMenu => Some(&self.menus.main),
            Activity::Settings => Some(&self.menus.settings),
            Activity::MiniApps => Some(&self.menus.mini_apps),
            Activity::Apps => Some(&self.menus.apps),
            Activity::Games => Some(&self.menus.games),
            _ => None,
        }
    }

    pub fn game(&self) -> &GameSlot {
        &self.game
    }

    pub fn reader(&self) -> &ReaderState {
        &self.reader
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn temp(&self) -> &TempConverter {
        &self.temp
    }

    pub fn multiply(&self) -> &MultiplyTable {
        &self.multiply
    }

    pub fn drawpad(&self) -> &DrawPad {
        &self.drawpad
    }

    pub fn scanner_view(&self) -> &ScannerView {
        &self.scanner_view
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    /// Overlay `text` until `now_ms + duration_ms`, then do `then`. No
    /// handler runs while it is up.
    pub fn show_message(&mut self, text: &'static str, now_ms: u64, duration_ms: u64, then: Then) {
        debug!("app: message {}", text);
        self.message = Some(Message {
            text,
            until_ms: now_ms.saturating_add(duration_ms),
            then,
        });
    }

    /// Run one iteration: a pending message, or the current handler.
    pub fn tick<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) -> Request {
        let frame_ready = self.frame.is_ready(now_ms);

        if let Some(message) = self.message {
            if now_ms < message.until_ms {
                render::message_box(display, message.text);
                return Request::None;
            }
            self.message = None;
            match message.then {
                Then::Resume => {}
                Then::Enter(activity) => self.switch(activity),
                Then::Request(request) => {
                    info!("app: request {:?}", request);
                    return request;
                }
            }
        }

        match self.current {
            Activity::Boot => self.boot(now_ms, display),
            Activity::MainMenu => self.main_menu(input, now_ms, display),
            Activity::Settings => self.settings(input, now_ms, display),
            Activity::MiniApps => self.mini_apps(input, display),
            Activity::Apps => self.apps_menu(input, now_ms, display),
            Activity::Games => self.games_menu(input, now_ms, display),
            _ => {
                let flow = self.run_leaf(input, now_ms, frame_ready, display);
                self.after(flow, now_ms);
            }
        }
        Request::None
    }

    fn boot<D: Canvas>(&mut self, now_ms: u64, display: &mut D) {
        let started = *self.boot_started.get_or_insert(now_ms);
        if elapsed(now_ms, started) >= BOOT_SPLASH_MS {
            self.switch(Activity::MainMenu);
            render::draw_menu(display, &MAIN_MENU, &self.menus.main);
            return;
        }
        render::clear(display);
        render::text_centered(display, 2, "TemaOS", TextSize::Huge);
        render::text_centered(display, 6, FIRMWARE_VERSION, TextSize::Small);
    }

    fn main_menu<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) {
        match drive_menu(&mut self.menus.main, &MAIN_MENU, input, display) {
            Some(0) => self.show_message(
                "Power off...",
                now_ms,
                POWER_ACTION_DELAY_MS,
                Then::Request(Request::PowerOff),
            ),
            Some(1) => self.show_message(
                "Restarting...",
                now_ms,
                POWER_ACTION_DELAY_MS,
                Then::Request(Request::Restart),
            ),
            Some(2) => self.switch(Activity::MiniApps),
            Some(3) => self.switch(Activity::Settings),
            _ => {}
        }
    }

    fn settings<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) {
        if input.is_click(Button::Exit) {
            self.back_to(Activity::MainMenu);
            return;
        }
        match drive_menu(&mut self.menus.settings, &SETTINGS_MENU, input, display) {
            Some(0) => self.show_message("Calibrating...", now_ms, MESSAGE_MS, Then::Resume),
            Some(1) => self.open(Activity::SystemInfo, now_ms),
            Some(2) => self.back_to(Activity::MainMenu),
            _ => {}
        }
    }

    fn mini_apps<D: Canvas>(&mut self, input: &Input, display: &mut D) {
        if input.is_click(Button::Exit) {
            self.back_to(Activity::MainMenu);
            return;
        }
        match drive_menu(&mut self.menus.mini_apps, &MINI_APPS_MENU, input, display) {
            Some(0) => self.switch(Activity::Games),
            Some(1) => self.switch(Activity::Apps),
            Some(2) => self.back_to(Activity::MainMenu),
            _ => {}
        }
    }

    fn apps_menu<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) {
        if input.is_click(Button::Exit) {
            self.back_to(Activity::MiniApps);
            return;
        }
        if let Some(item) = drive_menu(&mut self.menus.apps, &APPS_MENU, input, display) {
            match APP_ITEMS.get(item) {
                Some(&activity) => self.open(activity, now_ms),
                None => self.back_to(Activity::MiniApps),
            }
        }
    }

    fn games_menu<D: Canvas>(&mut self, input: &Input, now_ms: u64, display: &mut D) {
        if input.is_click(Button::Exit) {
            self.back_to(Activity::MiniApps);
            return;
        }
        if let Some(item) = drive_menu(&mut self.menus.games, &GAMES_MENU, input, display) {
            match GAME_ITEMS.get(item) {
                Some(&activity) => self.open(activity, now_ms),
                None => self.back_to(Activity::MiniApps),
            }
        }
    }

    /// Enter an app or game, remembering where Exit should lead.
    fn open(&mut self, activity: Activity, now_ms: u64) {
        match activity {
            Activity::Reader => {
                if self.reader.enter(&self.storage) == 0 {
                    self.show_message("No files :(", now_ms, MESSAGE_MS, Then::Resume);
                    return;
                }
            }
            Activity::Stopwatch => self.stopwatch = Stopwatch::new(),
            Activity::Timer => self.timer = Timer::new(),
            Activity::Counter => self.counter = Counter::default(),
            Activity::TempConverter => self.temp = TempConverter::new(),
            Activity::MultiplicationTable => self.multiply = MultiplyTable::new(),
            Activity::DrawPad => self.drawpad = DrawPad::new(),
            Activity::TextEditor => self.editor.enter(&self.storage),
            Activity::FileManager => self.files = FileManager::new(),
            Activity::WifiScanner => self.scanner_view = ScannerView::new(),
            Activity::Tetris => self.game = GameSlot::Tetris(Tetris::new(&mut self.rng, now_ms)),
            Activity::Snake => self.game = GameSlot::Snake(Snake::new(&mut self.rng, now_ms)),
            Activity::FlappyBird => self.game = GameSlot::Flappy(Flappy::new(&mut self.rng, now_ms)),
            Activity::Arkanoid => self.game = GameSlot::Arkanoid(Arkanoid::new(&mut self.rng, now_ms)),
            Activity::Dino => self.game = GameSlot::Dino(Dino::new(&mut self.rng, now_ms)),
            Activity::Asteroids => self.game = GameSlot::Asteroids(Asteroids::new(&mut self.rng, now_ms)),
            Activity::Pong => self.game = GameSlot::Pong(Pong::new(&mut self.rng, now_ms)),
            Activity::Dice => {
                let dice = match self.parked_dice.take() {
                    Some(dice) => dice,
                    None => Dice::new(&mut self.rng, now_ms),
                };
                self.game = GameSlot::Dice(dice);
            }
            _ => {}
        }
        self.previous = self.current;
        self.switch(activity);
    }

    /// Leave a submenu for its parent, forgetting the submenu's cursor.
    fn back_to(&mut self, parent: Activity) {
        match self.current {
            Activity::Settings => self.menus.settings.reset(),
            Activity::MiniApps => self.menus.mini_apps.reset(),
            Activity::Apps => self.menus.apps.reset(),
            Activity::Games => self.menus.games.reset(),
            _ => {}
        }
        self.switch(parent);
    }

    fn switch(&mut self, activity: Activity) {
        info!("app: {:?} -> {:?}", self.current, activity);
        self.current = activity;
    }

    fn run_leaf<D: Canvas>(&mut self, input: &Input, now_ms: u64, frame_ready: bool, display: &mut D) -> Flow {
        match self.current {
            Activity::SystemInfo => system_info::update(input, now_ms, self.storage.file_count(), display),
            Activity::Stopwatch => self.stopwatch.update(input, now_ms, display),
            Activity::WifiScanner => self.scanner_view.update(&mut self.scanner, input, display),
            Activity::Timer => self.timer.update(input, now_ms, display),
            Activity::FileManager => self.files.update(&mut self.storage, input, display),
            Activity::DrawPad => self.drawpad.update(input, now_ms, frame_ready, display),
            Activity::TempConverter => self.temp.update(input, display),
            Activity::Counter => self.counter.update(input, display),
            Activity::TextEditor => self.editor.update(&mut self.storage, input, display),
            Activity::Reader => self.reader.update(&self.storage, input, now_ms, display),
            Activity::MultiplicationTable => self.multiply.update(input, display),
            _ => self.play(input, now_ms, frame_ready, display),
        }
    }

    fn play<D: Canvas>(&mut self, input: &Input, now_ms: u64, frame_ready: bool, display: &mut D) -> Flow {
        let mut ctx = TickContext {
            input: *input,
            now_ms,
            frame_ready,
            rng: &mut self.rng,
        };
        match &mut self.game {
            GameSlot::Empty => Flow::Exit,
            GameSlot::Tetris(g) => games::run(g, &mut ctx, display),
            GameSlot::Snake(g) => games::run(g, &mut ctx, display),
            GameSlot::Flappy(g) => games::run(g, &mut ctx, display),
            GameSlot::Arkanoid(g) => games::run(g, &mut ctx, display),
            GameSlot::Dino(g) => games::run(g, &mut ctx, display),
            GameSlot::Asteroids(g) => games::run(g, &mut ctx, display),
            GameSlot::Pong(g) => games::run(g, &mut ctx, display),
            GameSlot::Dice(g) => games::run(g, &mut ctx, display),
        }
    }

    fn after(&mut self, flow: Flow, now_ms: u64) {
        match flow {
            Flow::Stay => {}
            Flow::Notice(text) => self.show_message(text, now_ms, MESSAGE_MS, Then::Resume),
            Flow::Exit => {
                // The die shows its last roll when it is opened again.
                if let GameSlot::Dice(dice) = core::mem::replace(&mut self.game, GameSlot::Empty) {
                    self.parked_dice = Some(dice);
                }
                let previous = self.previous;
                self.switch(previous);
            }
        }
    }
}
