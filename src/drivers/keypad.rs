//! 4×4 matrix keypad driver.
//!
//! ## Hardware
//!
//! Four row outputs and four column inputs with pull-ups.  A scan drives
//! one row low at a time and reads the columns; a low column means the key
//! at that crossing is held.
//!
//! ```text
//!        C0  C1  C2  C3
//!   R0    1   2   3   A
//!   R1    4   5   6   B
//!   R2    7   8   9   C
//!   R3    *   0   #   D
//! ```
//!
//! [`MatrixKeypad`] implements [`InputSource`] and reports each key once on
//! press.  Holding a key does not repeat it.  A reading only counts once it
//! has been the same for `stable_scans` consecutive scans, for presses and
//! releases alike, so contact chatter never yields a second key.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::keys::Key;
use crate::app::ports::InputSource;

const LAYOUT: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

pub struct MatrixKeypad<R, C> {
    rows: [R; 4],
    cols: [C; 4],
    stable_scans: u8,
    /// Raw reading of the latest scans and how many scans in a row saw it.
    candidate: Option<char>,
    seen: u8,
    /// Last debounced reading.
    settled: Option<char>,
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    /// `stable_scans` is clamped to at least one.
    pub fn new(mut rows: [R; 4], cols: [C; 4], stable_scans: u8) -> Self {
        for row in &mut rows {
            let _ = row.set_high();
        }
        Self {
            rows,
            cols,
            stable_scans: stable_scans.max(1),
            candidate: None,
            seen: 0,
            settled: None,
        }
    }

    /// Scan the matrix once.  Returns the first held key in row-major order.
    pub fn scan(&mut self) -> Option<char> {
        let mut found = None;
        for (r, row) in self.rows.iter_mut().enumerate() {
            let _ = row.set_low();
            for (c, col) in self.cols.iter_mut().enumerate() {
                if found.is_none() && col.is_low().unwrap_or(false) {
                    found = Some(LAYOUT[r][c]);
                }
            }
            let _ = row.set_high();
        }
        found
    }
}

impl<R: OutputPin, C: InputPin> InputSource for MatrixKeypad<R, C> {
    fn poll_key(&mut self) -> Option<Key> {
        let now = self.scan();
        if now == self.candidate {
            self.seen = self.seen.saturating_add(1);
        } else {
            self.candidate = now;
            self.seen = 1;
        }
        if self.seen < self.stable_scans || now == self.settled {
            return None;
        }

        self.settled = now;
        now.and_then(Key::from_char)
    }
}
