//! temaos firmware entry point (nRF52840 + S140 SoftDevice).
//!
//! Tasks:
//! - **softdevice_task**: runs the SoftDevice event loop
//! - **radio_task**: serves scan requests from the scanner app
//! - **main**: the UI loop - sample buttons, tick the app, flush the panel,
//!   persist the file table when it changed, carry out power requests

#![no_std]
#![no_main]

mod board;

use board::buttons::Buttons;
use board::radio::{radio_task, BoardScanner};
use board::{display, flash, power};
use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, interrupt, peripherals};
use embassy_time::{Duration, Instant, Ticker};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use temaos::app::{App, Request, Then};
use temaos::config::{
    BUTTON_DEBOUNCE_MS, LOOP_PERIOD_MS, MESSAGE_MS, SCREEN_AUTO_OFF_ENABLED, SCREEN_AUTO_OFF_TIMEOUT_SECS,
};
use temaos::input::{ButtonSampler, Input};
use temaos::power_logic::{ScreenChange, ScreenPower};
use temaos::storage::{catalog, RamFs};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type Shell = App<RamFs, BoardScanner>;

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 0,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    }
}

/// Seed for the games' RNG from the SoftDevice's hardware RNG, falling back
/// to the uptime.
fn rng_seed(sd: &Softdevice) -> u64 {
    let mut bytes = [0u8; 8];
    match nrf_softdevice::random_bytes(sd, &mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => {
            warn!("RNG unavailable, seeding from uptime");
            Instant::now().as_ticks()
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("temaos v{} starting", temaos::config::FIRMWARE_VERSION);

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::TWISPI0.set_priority(Priority::P3);

    let sd = Softdevice::enable(&softdevice_config());
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(radio_task(sd)));

    // I²C: SDA P0.26, SCL P0.27
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = display::init(twim);

    let buttons = Buttons::new([
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
        p.P0_25.degrade(),
        p.P0_02.degrade(),
        p.P0_03.degrade(),
    ]);

    let mut flash_dev = nrf_softdevice::Flash::take(sd);
    let mut fs = flash::load(&mut flash_dev).await;
    let mounted = fs.is_mounted();
    if let Err(e) = catalog::install_defaults(&mut fs) {
        warn!("Default files not installed: {}", e);
    }

    static APP: StaticCell<Shell> = StaticCell::new();
    let app = APP.init(App::new(fs, BoardScanner, rng_seed(sd)));
    if !mounted {
        let now_ms = Instant::now().as_millis();
        app.show_message(temaos::Error::NotMounted.message(), now_ms, MESSAGE_MS, Then::Resume);
    }

    let mut sampler = ButtonSampler::new(BUTTON_DEBOUNCE_MS);
    let mut screen = ScreenPower::new(SCREEN_AUTO_OFF_ENABLED, SCREEN_AUTO_OFF_TIMEOUT_SECS * 1000);
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));

    loop {
        let now_ms = Instant::now().as_millis();
        let mut input = sampler.tick(buttons.read(), now_ms);

        match screen.observe(input.any_hold(), now_ms) {
            ScreenChange::TurnOn => {
                display::set_power(&mut oled, true);
                input = Input::idle();
            }
            ScreenChange::TurnOff => display::set_power(&mut oled, false),
            ScreenChange::None => {}
        }

        let request = app.tick(&input, now_ms, &mut oled);
        if screen.is_on() {
            display::present(&mut oled);
        }

        match request {
            Request::PowerOff => power::system_off(),
            Request::Restart => power::restart(),
            Request::None => {}
        }

        if app.storage().is_dirty() {
            flash::save(&mut flash_dev, app.storage_mut()).await;
        }

        ticker.next().await;
    }
}
