//! Amount capture with clear/submit editing.
//!
//! No upper-bound check happens here; the transaction engine decides
//! whether a withdrawal fits the balance.

use heapless::String;

use crate::app::feedback::show;
use crate::app::keys::Key;
use crate::app::ports::{DisplaySink, TimePort, UserInterface};
use crate::config::SafeConfig;

use super::next_key;

/// Nine digits always fit a `u32`.
pub const AMOUNT_MAX_DIGITS: usize = 9;

pub struct AmountEntry {
    scan_interval_ms: u32,
}

impl AmountEntry {
    pub fn new(config: &SafeConfig) -> Self {
        Self {
            scan_interval_ms: config.key_scan_interval_ms,
        }
    }

    /// Block until the user submits a positive amount.
    ///
    /// Digits append and echo, `*` clears and redraws the prompt, `#`
    /// submits.  An empty or all-zero submission is ignored.  Digits past
    /// [`AMOUNT_MAX_DIGITS`] are dropped without echo.
    pub fn capture(&self, prompt: &str, clock: &mut impl TimePort, ui: &mut impl UserInterface) -> u32 {
        render_prompt(ui, prompt);

        let mut digits: String<AMOUNT_MAX_DIGITS> = String::new();
        loop {
            match next_key(ui, clock, self.scan_interval_ms) {
                key @ Key::Digit(_) => {
                    let Some(c) = key.digit_char() else { continue };
                    if digits.push(c).is_ok() {
                        let mut echo = [0u8; 4];
                        ui.write(c.encode_utf8(&mut echo));
                        ui.flush();
                    }
                }
                Key::Clear => {
                    digits.clear();
                    render_prompt(ui, prompt);
                }
                Key::Submit => {
                    if let Ok(amount @ 1..) = digits.parse::<u32>() {
                        return amount;
                    }
                }
                Key::Function(_) => {}
            }
        }
    }
}

fn render_prompt(display: &mut impl DisplaySink, prompt: &str) {
    show(display, &[prompt, "(# to finish)"]);
}
