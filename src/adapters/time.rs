//! ESP32 time adapter.
//!
//! Implements [`TimePort`] for the whole firmware.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` for the monotonic
//!   clock and a FreeRTOS task delay for waits, so other tasks keep running
//!   while the transaction flow blocks.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` and
//!   `thread::sleep` for host-side simulation.

use crate::app::ports::TimePort;

pub struct EspTimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for EspTimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EspTimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl TimePort for EspTimeAdapter {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
