//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                    |
//! |------------|------------------|--------------------------------|
//! | `console`  | DisplaySink      | Serial log (panel stand-in)    |
//! |            | InputSource      | Any keypad driver              |
//! | `hardware` | DoorSensorPort   | Door contact + optical GPIO    |
//! |            | ActuatorPort     | LED + buzzer GPIO              |
//! |            | TriggerPort      | Deposit / withdraw buttons     |
//! |            | TimePort         | Delegates to `time`            |
//! | `ledger`   | LedgerClient     | ThingSpeak-style HTTP channel  |
//! | `log_sink` | EventSink        | Serial log output              |
//! | `nvs`      | ConfigPort       | NVS / in-memory store          |
//! | `time`     | TimePort         | ESP32 system timer, FreeRTOS   |

pub mod console;
pub mod hardware;
pub mod ledger;
pub mod log_sink;
pub mod nvs;
pub mod time;
