//! Keypad key model.
//!
//! The 4x4 keypad layout is:
//!
//! ```text
//!   1 2 3 A
//!   4 5 6 B
//!   7 8 9 C
//!   * 0 # D
//! ```
//!
//! `#` submits, `*` clears, `A`–`D` carry no meaning for the safe and are
//! ignored by every entry loop.

/// A single decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Numeric key, always `0..=9`.
    Digit(u8),
    /// `#`: finish the current entry.
    Submit,
    /// `*`: discard the current entry.
    Clear,
    /// `A`..`D` function keys.
    Function(char),
}

impl Key {
    /// Decode a keypad legend character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '#' => Some(Self::Submit),
            '*' => Some(Self::Clear),
            'A'..='D' => Some(Self::Function(c)),
            _ => None,
        }
    }

    /// ASCII digit for a `Digit` key.
    pub fn digit_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => Some((b'0' + d) as char),
            _ => None,
        }
    }
}
