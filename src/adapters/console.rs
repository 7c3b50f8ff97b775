//! Console adapters: a log-backed display and the keypad/display pairing.
//!
//! The production board has no panel driver wired yet, so [`LogDisplay`]
//! renders each line to the serial log.  [`Console`] joins any
//! [`InputSource`] with any [`DisplaySink`] into one
//! [`UserInterface`](crate::app::ports::UserInterface).

use heapless::String;
use log::info;

use crate::app::keys::Key;
use crate::app::ports::{DisplaySink, InputSource};

/// Widest line the display adapter buffers.  Longer echoes are truncated.
const LINE_CAPACITY: usize = 64;

/// Display that writes every line to the log with an `LCD` tag.
#[derive(Default)]
pub struct LogDisplay {
    /// Text appended with `write` and not yet terminated by `write_line`.
    pending: String<LINE_CAPACITY>,
    /// Bytes of `pending` already logged by `flush`.
    flushed: usize,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn unflushed(&self) -> &str {
        self.pending.get(self.flushed..).unwrap_or_default()
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.flushed = 0;
    }
}

impl DisplaySink for LogDisplay {
    fn clear(&mut self) {
        self.reset();
    }

    fn write_line(&mut self, text: &str) {
        let tail = self.unflushed();
        if self.flushed == 0 || !tail.is_empty() || !text.is_empty() {
            info!("LCD    | {}{}", tail, text);
        }
        self.reset();
    }

    fn write(&mut self, text: &str) {
        let _ = self.pending.push_str(text);
    }

    fn flush(&mut self) {
        let tail = self.unflushed();
        if !tail.is_empty() {
            info!("LCD    | {}", tail);
            self.flushed = self.pending.len();
        }
    }
}

/// Keypad plus display.
pub struct Console<K, D> {
    keypad: K,
    display: D,
}

impl<K: InputSource, D: DisplaySink> Console<K, D> {
    pub fn new(keypad: K, display: D) -> Self {
        Self { keypad, display }
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

impl<K: InputSource, D> InputSource for Console<K, D> {
    fn poll_key(&mut self) -> Option<Key> {
        self.keypad.poll_key()
    }
}

impl<K, D: DisplaySink> DisplaySink for Console<K, D> {
    fn clear(&mut self) {
        self.display.clear();
    }
    fn write_line(&mut self, text: &str) {
        self.display.write_line(text);
    }
    fn write(&mut self, text: &str) {
        self.display.write(text);
    }
    fn flush(&mut self) {
        self.display.flush();
    }
}
