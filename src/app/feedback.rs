//! Screen and buzzer/LED helpers shared by the entry loops, the door
//! supervisor, and the transaction engine.

use core::fmt::Write;

use heapless::String;

use super::ports::{ActuatorPort, DisplaySink, TimePort};

/// One display line.  The panel shows 21 columns and wraps the rest.
pub type Line = String<40>;

/// Replace the screen with `lines`.
pub fn show(display: &mut impl DisplaySink, lines: &[&str]) {
    display.clear();
    for line in lines {
        display.write_line(line);
    }
    display.flush();
}

/// `"{label}{value}"` without touching the heap.
pub fn labelled(label: &str, value: u64) -> Line {
    let mut line = Line::new();
    // A u64 is at most 20 digits; every label in use fits the remainder.
    let _ = write!(line, "{label}{value}");
    line
}

/// Buzzer on for `ms`, then off.
pub fn beep(hw: &mut (impl ActuatorPort + TimePort), ms: u32) {
    hw.set_buzzer(true);
    hw.delay_ms(ms);
    hw.set_buzzer(false);
}

/// Confirmation LED on for `ms`, then off.
pub fn flash_confirm(hw: &mut (impl ActuatorPort + TimePort), ms: u32) {
    hw.set_confirm_led(true);
    hw.delay_ms(ms);
    hw.set_confirm_led(false);
}

/// One buzzer duty cycle: on for `on_ms`, off for `off_ms`.
pub fn buzz_cycle(hw: &mut (impl ActuatorPort + TimePort), on_ms: u32, off_ms: u32) {
    beep(hw, on_ms);
    hw.delay_ms(off_ms);
}
