//! Keypad entry loops: credential capture and amount capture.
//!
//! Both loops block until the user presses `#`.  There is no timeout; a
//! safe left at the password prompt simply waits.

pub mod amount;
pub mod auth;

use crate::app::keys::Key;
use crate::app::ports::{InputSource, TimePort};

/// Block until the keypad reports a key.  Sleeps `scan_interval_ms`
/// between empty polls so the scan loop does not starve the CPU.
fn next_key(ui: &mut impl InputSource, clock: &mut impl TimePort, scan_interval_ms: u32) -> Key {
    loop {
        if let Some(key) = ui.poll_key() {
            return key;
        }
        clock.delay_ms(scan_interval_ms);
    }
}
