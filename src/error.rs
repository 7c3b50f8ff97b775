//! Unified error types for the SmartSafe firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the boot
//! path in `main` can use `?` uniformly.  The transaction engine itself
//! never returns these: ledger and door problems are turned into events
//! and on-device feedback instead.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The remote ledger could not be read or written.
    Ledger(LedgerError),
    /// Configuration is invalid or could not be loaded/stored.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ledger(e) => write!(f, "ledger: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Ledger errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// No transport is available (network down or not wired).
    Unavailable,
    /// The transport failed before a response arrived.
    Transport,
    /// The server answered with a non-200 status.
    Status(u16),
    /// The response body is not the expected feed document.
    Decode,
    /// The feed has no usable balance field.
    MissingField,
    /// The server accepted the request but refused to store the entry.
    Rejected,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "transport unavailable"),
            Self::Transport => write!(f, "transport failed"),
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Decode => write!(f, "malformed response"),
            Self::MissingField => write!(f, "balance field missing"),
            Self::Rejected => write!(f, "update rejected"),
        }
    }
}

impl core::error::Error for LedgerError {}

impl From<LedgerError> for Error {
    fn from(e: LedgerError) -> Self {
        Self::Ledger(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A field failed range validation; the message names the field.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
