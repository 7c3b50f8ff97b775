//! Peripheral drivers over `embedded-hal` pins.

pub mod button;
pub mod keypad;
