//! GPIO / peripheral pin assignments for the SmartSafe controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Transaction trigger buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

pub const DEPOSIT_BUTTON_GPIO: i32 = 19;
pub const WITHDRAW_BUTTON_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Door sensors
// ---------------------------------------------------------------------------

/// Reed/contact switch to GND when the door is shut. LOW = closed.
pub const DOOR_CONTACT_GPIO: i32 = 4;
/// IR alignment sensor on the bolt. LOW = aligned.
/// GPIO34 is input-only on the ESP32 (no internal pull resistors).
pub const DOOR_OPTICAL_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Green confirmation LED (active HIGH).
pub const CONFIRM_LED_GPIO: i32 = 5;
/// Alarm buzzer + red LED (active HIGH).
pub const BUZZER_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// 4x4 matrix keypad
// ---------------------------------------------------------------------------

pub const KEYPAD_ROW_GPIOS: [i32; 4] = [12, 13, 14, 27];
pub const KEYPAD_COL_GPIOS: [i32; 4] = [26, 25, 33, 32];

