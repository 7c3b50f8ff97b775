//! SmartSafe firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the device
//! binary. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod door;
pub mod entry;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
