//! SmartSafe Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     Console          ChannelLedger            │
//! │  (Door+Actuator+     (Keypad+         (LedgerClient)           │
//! │   Trigger+Time)       LogDisplay)                              │
//! │  LogEventSink        NvsConfigStore                            │
//! │  (EventSink)         (ConfigPort)                              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              SafeService (pure logic)                  │    │
//! │  │  Authenticator · AmountEntry · DoorCloseSupervisor     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use log::{info, warn};

use smartsafe::adapters::console::{Console, LogDisplay};
use smartsafe::adapters::hardware::{GpioActuators, GpioDoorSensors, HardwareAdapter};
use smartsafe::adapters::ledger::{ChannelLedger, NullTransport};
use smartsafe::adapters::log_sink::LogEventSink;
use smartsafe::adapters::nvs::NvsConfigStore;
use smartsafe::adapters::time::EspTimeAdapter;
use smartsafe::app::ports::ConfigPort;
use smartsafe::app::service::SafeService;
use smartsafe::config::SafeConfig;
use smartsafe::drivers::button::TriggerButton;
use smartsafe::drivers::keypad::MatrixKeypad;
use smartsafe::error::Error;
use smartsafe::pins;

// ── Pin helpers ───────────────────────────────────────────────
//
// SAFETY (all three): every GPIO number in `pins` is claimed exactly once,
// here, before the control loop starts.

fn input_pulled_up(gpio: i32, what: &'static str) -> smartsafe::error::Result<PinDriver<'static, AnyIOPin, Input>> {
    let mut pin = PinDriver::input(unsafe { AnyIOPin::new(gpio) }).map_err(|_| Error::Init(what))?;
    pin.set_pull(Pull::Up).map_err(|_| Error::Init(what))?;
    Ok(pin)
}

fn input_floating(gpio: i32, what: &'static str) -> smartsafe::error::Result<PinDriver<'static, AnyInputPin, Input>> {
    PinDriver::input(unsafe { AnyInputPin::new(gpio) }).map_err(|_| Error::Init(what))
}

fn output(gpio: i32, what: &'static str) -> smartsafe::error::Result<PinDriver<'static, AnyOutputPin, Output>> {
    PinDriver::output(unsafe { AnyOutputPin::new(gpio) }).map_err(|_| Error::Init(what))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartSafe v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = NvsConfigStore::new()
        .and_then(|store| store.load())
        .unwrap_or_else(|e| {
            warn!("Config load failed ({e}), using defaults");
            SafeConfig::default()
        });

    // ── 3. Peripherals ────────────────────────────────────────
    // GPIO34 is input-only and has no internal pull; the sensor board
    // provides its own.
    let sensors = GpioDoorSensors::new(
        input_pulled_up(pins::DOOR_CONTACT_GPIO, "door contact")?,
        input_floating(pins::DOOR_OPTICAL_GPIO, "door optical")?,
    );
    let actuators = GpioActuators::new(
        output(pins::CONFIRM_LED_GPIO, "confirm LED")?,
        output(pins::BUZZER_GPIO, "buzzer")?,
    );
    let deposit = TriggerButton::new(
        input_pulled_up(pins::DEPOSIT_BUTTON_GPIO, "deposit button")?,
        config.button_debounce_ms,
    );
    let withdraw = TriggerButton::new(
        input_pulled_up(pins::WITHDRAW_BUTTON_GPIO, "withdraw button")?,
        config.button_debounce_ms,
    );
    let mut hw = HardwareAdapter::new(sensors, actuators, deposit, withdraw, EspTimeAdapter::new());

    let [r0, r1, r2, r3] = pins::KEYPAD_ROW_GPIOS;
    let [c0, c1, c2, c3] = pins::KEYPAD_COL_GPIOS;
    let keypad = MatrixKeypad::new(
        [
            output(r0, "keypad row")?,
            output(r1, "keypad row")?,
            output(r2, "keypad row")?,
            output(r3, "keypad row")?,
        ],
        [
            input_pulled_up(c0, "keypad col")?,
            input_pulled_up(c1, "keypad col")?,
            input_pulled_up(c2, "keypad col")?,
            input_pulled_up(c3, "keypad col")?,
        ],
        config.keypad_stable_scans(),
    );
    let mut ui = Console::new(keypad, LogDisplay::new());
    info!("Peripherals initialised");

    // ── 4. Ledger + event sink ────────────────────────────────
    // No network transport is wired; ledger calls fail fast and the safe
    // runs offline from a zero balance.
    let mut ledger = ChannelLedger::new(NullTransport, config.ledger.clone());
    let mut sink = LogEventSink::new();

    // ── 5. Application service ────────────────────────────────
    let mut app = SafeService::new(config);
    app.boot(&mut ledger, &mut sink);

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        if let Some(outcome) = app.run_once(&mut hw, &mut ui, &mut ledger, &mut sink) {
            info!("Transaction finished: {:?}", outcome);
        }
    }
}
