//! System configuration parameters
//!
//! All tunable parameters for the SmartSafe controller.
//! Values can be overridden via NVS (see [`NvsConfigStore`](crate::adapters::nvs::NvsConfigStore)).
//! The balance is deliberately absent: the ledger is the only durable record.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Maximum number of digits accepted for the credential.
pub const CREDENTIAL_MAX_DIGITS: usize = 16;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeConfig {
    // --- Access ---
    /// Digit string the user must enter before any transaction.
    pub credential: String<CREDENTIAL_MAX_DIGITS>,

    // --- Door supervision ---
    /// Silent window for the door to close before the first warning (ms).
    pub grace_timeout_ms: u32,
    /// Audible warning window before a security alert is reported (ms).
    pub alert_timeout_ms: u32,
    /// Time given to close the door after a commit (ms).
    pub auto_lock_delay_ms: u32,
    /// Door sensor poll period during the grace window (ms).
    pub door_poll_interval_ms: u32,

    // --- Buzzer / LED cadence ---
    /// Single warning beep when the grace window expires (ms).
    pub warning_pulse_ms: u32,
    /// Alert window buzzer on-time per cycle (ms).
    pub alert_pulse_on_ms: u32,
    /// Alert window buzzer off-time per cycle (ms).
    pub alert_pulse_off_ms: u32,
    /// Continuous alarm buzzer on-time per cycle (ms).
    pub alarm_on_ms: u32,
    /// Continuous alarm buzzer off-time per cycle (ms).
    pub alarm_off_ms: u32,
    /// Confirmation LED hold time (ms).
    pub confirm_led_ms: u32,

    // --- User feedback ---
    /// Pause after "Password OK" before the LED confirmation (ms).
    pub auth_ok_pause_ms: u32,
    /// Buzzer duration on a wrong password (ms).
    pub auth_fail_buzz_ms: u32,
    /// Buzzer duration on an insufficient-balance rejection (ms).
    pub insufficient_buzz_ms: u32,

    // --- Timing ---
    /// Settle time after a trigger button press (ms).
    pub button_debounce_ms: u32,
    /// Idle loop period (ms).
    pub idle_loop_interval_ms: u32,
    /// Delay between empty keypad polls (ms).
    pub key_scan_interval_ms: u32,
    /// Time a keypad reading must hold steady before it counts (ms).
    pub keypad_debounce_ms: u32,

    // --- Remote ledger ---
    pub ledger: LedgerConfig,
}

/// Remote ledger (ThingSpeak-style channel) coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub base_url: String<64>,
    pub channel_id: String<16>,
    pub read_api_key: String<24>,
    pub write_api_key: String<24>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: bounded("http://api.thingspeak.com"),
            channel_id: String::new(),
            read_api_key: String::new(),
            write_api_key: String::new(),
        }
    }
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self {
            credential: bounded("1111"),

            // Door supervision
            grace_timeout_ms: 12_000,
            alert_timeout_ms: 20_000,
            auto_lock_delay_ms: 5_000,
            door_poll_interval_ms: 60,

            // Buzzer / LED cadence
            warning_pulse_ms: 500,
            alert_pulse_on_ms: 300,
            alert_pulse_off_ms: 700,
            alarm_on_ms: 350,
            alarm_off_ms: 350,
            confirm_led_ms: 2_000,

            // User feedback
            auth_ok_pause_ms: 500,
            auth_fail_buzz_ms: 800,
            insufficient_buzz_ms: 1_000,

            // Timing
            button_debounce_ms: 200,
            idle_loop_interval_ms: 100,
            key_scan_interval_ms: 5,
            keypad_debounce_ms: 20,

            ledger: LedgerConfig::default(),
        }
    }
}

impl SafeConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credential.is_empty() {
            return Err(ConfigError::ValidationFailed("credential is empty"));
        }
        if !self.credential.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::ValidationFailed("credential must be digits"));
        }
        if self.grace_timeout_ms == 0 || self.alert_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("door timeouts must be non-zero"));
        }
        if self.door_poll_interval_ms == 0 || self.door_poll_interval_ms >= self.grace_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "door_poll_interval_ms must be in 1..grace_timeout_ms",
            ));
        }
        if self.alert_pulse_on_ms == 0 || self.alert_pulse_off_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert pulse timings must be non-zero"));
        }
        if self.alarm_on_ms == 0 || self.alarm_off_ms == 0 {
            return Err(ConfigError::ValidationFailed("alarm duty timings must be non-zero"));
        }
        if self.key_scan_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("key_scan_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Consecutive identical keypad scans that span the debounce time.
    pub fn keypad_stable_scans(&self) -> u8 {
        let scans = self.keypad_debounce_ms.div_ceil(self.key_scan_interval_ms.max(1));
        u8::try_from(scans.max(1)).unwrap_or(u8::MAX)
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
