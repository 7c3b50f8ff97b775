//! Application core: domain logic with zero direct I/O.
//!
//! This module contains the business rules for the safe: transaction
//! sequencing, balance mutation, and ledger reporting.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod feedback;
pub mod keys;
pub mod ports;
pub mod service;
pub mod transaction;
