//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SafeService (domain)
//! ```
//!
//! Driven adapters (GPIO sensors, buzzer/LED, keypad, display, ledger,
//! storage) implement these traits.  The domain core consumes them via
//! generics and never touches hardware directly.

use crate::config::SafeConfig;
use crate::error::{ConfigError, LedgerError};

use super::keys::Key;
use super::transaction::{LedgerEvent, TransactionKind};

// ───────────────────────────────────────────────────────────────
// Door sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The two independent door signals, read raw.  A disconnected sensor
/// must read as `false` (its inactive level).
pub trait DoorSensorPort {
    /// Contact switch reports the door shut.
    fn contact_closed(&mut self) -> bool;

    /// Optical sensor reports the bolt aligned.
    fn optical_aligned(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Green confirmation LED.
    fn set_confirm_led(&mut self, on: bool);

    /// Alarm buzzer (and the red LED wired with it).
    fn set_buzzer(&mut self, on: bool);

    /// Silence and darken everything.
    fn all_off(&mut self) {
        self.set_buzzer(false);
        self.set_confirm_led(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic tick source plus a blocking delay.  Every wait in the
/// core goes through `delay_ms`, which blocks the whole device.
pub trait TimePort {
    /// Milliseconds since boot, monotonic.
    fn now_ms(&self) -> u64;

    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Trigger port (deposit / withdraw buttons)
// ───────────────────────────────────────────────────────────────

pub trait TriggerPort {
    /// Edge-detected, debounced button press, if any since the last call.
    fn poll_trigger(&mut self) -> Option<TransactionKind>;
}

/// Everything physically attached to the safe body.
pub trait SafeHardware: DoorSensorPort + ActuatorPort + TimePort + TriggerPort {}

impl<T: DoorSensorPort + ActuatorPort + TimePort + TriggerPort> SafeHardware for T {}

// ───────────────────────────────────────────────────────────────
// User interface ports (keypad + display)
// ───────────────────────────────────────────────────────────────

pub trait InputSource {
    /// Non-blocking single key read.
    fn poll_key(&mut self) -> Option<Key>;
}

/// Fire-and-forget text display.
pub trait DisplaySink {
    fn clear(&mut self);

    /// Write `text` and move to the next line.
    fn write_line(&mut self, text: &str);

    /// Append `text` on the current line (key echo).
    fn write(&mut self, text: &str);

    /// Push the frame buffer to the panel.
    fn flush(&mut self);
}

/// Keypad and display as seen by the entry loops.
pub trait UserInterface: InputSource + DisplaySink {}

impl<T: InputSource + DisplaySink> UserInterface for T {}

// ───────────────────────────────────────────────────────────────
// Ledger port (driven adapter: domain ↔ remote system of record)
// ───────────────────────────────────────────────────────────────

pub trait LedgerClient {
    /// Last balance recorded by the ledger.  Called once at boot.
    fn read_balance(&mut self) -> Result<u64, LedgerError>;

    /// Append one event.  The caller never retries.
    fn post_event(&mut self, event: &LedgerEvent) -> Result<(), LedgerError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`SafeConfig`].
///
/// Implementations MUST validate before persisting; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<SafeConfig, ConfigError>;

    fn save(&mut self, config: &SafeConfig) -> Result<(), ConfigError>;
}
