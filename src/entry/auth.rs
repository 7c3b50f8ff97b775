//! Credential check.
//!
//! Digits are echoed as `*`; function keys and `*` are ignored; `#` ends
//! the entry.  A failed attempt only beeps and returns.  There is no
//! lockout or retry counter; the user presses a button and tries again.

use heapless::String;
use log::{info, warn};

use crate::app::feedback::{beep, flash_confirm, show};
use crate::app::keys::Key;
use crate::app::ports::{ActuatorPort, TimePort, UserInterface};
use crate::config::{CREDENTIAL_MAX_DIGITS, SafeConfig};

use super::next_key;

pub struct Authenticator {
    credential: String<CREDENTIAL_MAX_DIGITS>,
    ok_pause_ms: u32,
    confirm_led_ms: u32,
    fail_buzz_ms: u32,
    scan_interval_ms: u32,
}

impl Authenticator {
    pub fn new(config: &SafeConfig) -> Self {
        Self {
            credential: config.credential.clone(),
            ok_pause_ms: config.auth_ok_pause_ms,
            confirm_led_ms: config.confirm_led_ms,
            fail_buzz_ms: config.auth_fail_buzz_ms,
            scan_interval_ms: config.key_scan_interval_ms,
        }
    }

    /// Prompt for the credential and compare it.  Drives the green LED on
    /// success and the buzzer on failure before returning.
    pub fn authenticate<H>(&self, hw: &mut H, ui: &mut impl UserInterface) -> bool
    where
        H: ActuatorPort + TimePort,
    {
        show(ui, &["Enter Password (# to end)"]);

        let mut entered: String<CREDENTIAL_MAX_DIGITS> = String::new();
        let mut overflowed = false;
        loop {
            match next_key(ui, hw, self.scan_interval_ms) {
                Key::Submit => break,
                key @ Key::Digit(_) => {
                    if let Some(c) = key.digit_char() {
                        overflowed |= entered.push(c).is_err();
                    }
                    ui.write("*");
                    ui.flush();
                }
                Key::Clear | Key::Function(_) => {}
            }
        }

        if !overflowed && credential_matches(&entered, &self.credential) {
            info!("AUTH: password OK");
            show(ui, &["Password OK"]);
            hw.delay_ms(self.ok_pause_ms);
            flash_confirm(hw, self.confirm_led_ms);
            true
        } else {
            warn!("AUTH: wrong password ({} digits entered)", entered.len());
            show(ui, &["Wrong Password!"]);
            beep(hw, self.fail_buzz_ms);
            false
        }
    }
}

/// Exact equality whose running time does not depend on where the first
/// mismatching digit is.
fn credential_matches(entered: &str, expected: &str) -> bool {
    if entered.len() != expected.len() {
        return false;
    }
    entered
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
