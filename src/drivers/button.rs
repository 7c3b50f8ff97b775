//! Debounced trigger button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The main loop calls
//! [`TriggerButton::tick`] once per idle pass; the driver reports a press
//! on the falling edge and then ignores the pin until it has been
//! released and the debounce lockout has passed.
//!
//! | State    | Pin low                       | Pin high                    |
//! |----------|-------------------------------|-----------------------------|
//! | Released | report press → `Held`         | stay                        |
//! | Held     | stay (no auto-repeat)         | → `Settling`                |
//! | Settling | → `Held` (bounce)             | lockout over → `Released`   |

use embedded_hal::digital::InputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonState {
    Released,
    Held,
    /// Released at `since_ms`; the lockout runs from there.
    Settling { since_ms: u64 },
}

pub struct TriggerButton<P> {
    pin: P,
    state: ButtonState,
    debounce_ms: u32,
}

impl<P: InputPin> TriggerButton<P> {
    pub fn new(pin: P, debounce_ms: u32) -> Self {
        Self {
            pin,
            state: ButtonState::Released,
            debounce_ms,
        }
    }

    /// Returns `true` exactly once per physical press.
    /// `now_ms` is the current monotonic time in milliseconds.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        // A read error counts as released.
        let pressed = self.pin.is_low().unwrap_or(false);
        let lockout = u64::from(self.debounce_ms);

        match self.state {
            ButtonState::Released => {
                if pressed {
                    self.state = ButtonState::Held;
                    return true;
                }
            }
            ButtonState::Held => {
                if !pressed {
                    self.state = ButtonState::Settling { since_ms: now_ms };
                }
            }
            ButtonState::Settling { since_ms } => {
                if pressed {
                    self.state = ButtonState::Held;
                } else if now_ms.saturating_sub(since_ms) >= lockout {
                    self.state = ButtonState::Released;
                }
            }
        }
        false
    }
}
