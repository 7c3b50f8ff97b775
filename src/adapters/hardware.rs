//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! [`GpioDoorSensors`] and [`GpioActuators`] wrap embedded-hal pins;
//! [`HardwareAdapter`] owns them together with the trigger buttons and the
//! clock and exposes the combined
//! [`SafeHardware`](crate::app::ports::SafeHardware) surface.  This is the
//! only module in the system that touches pins directly.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::warn;

use crate::app::ports::{ActuatorPort, DoorSensorPort, TimePort, TriggerPort};
use crate::app::transaction::TransactionKind;
use crate::drivers::button::TriggerButton;

// ── Door sensors ──────────────────────────────────────────────

/// Contact switch and optical sensor, both active-low.
pub struct GpioDoorSensors<C, O> {
    contact: C,
    optical: O,
}

impl<C: InputPin, O: InputPin> GpioDoorSensors<C, O> {
    pub fn new(contact: C, optical: O) -> Self {
        Self { contact, optical }
    }
}

impl<C: InputPin, O: InputPin> DoorSensorPort for GpioDoorSensors<C, O> {
    fn contact_closed(&mut self) -> bool {
        self.contact.is_low().unwrap_or(false)
    }

    fn optical_aligned(&mut self) -> bool {
        self.optical.is_low().unwrap_or(false)
    }
}

// ── Actuators ─────────────────────────────────────────────────

/// Green LED and buzzer, both active-high.
pub struct GpioActuators<L, B> {
    led: L,
    buzzer: B,
}

impl<L: OutputPin, B: OutputPin> GpioActuators<L, B> {
    pub fn new(led: L, buzzer: B) -> Self {
        let mut this = Self { led, buzzer };
        this.all_off();
        this
    }
}

impl<L: OutputPin, B: OutputPin> ActuatorPort for GpioActuators<L, B> {
    fn set_confirm_led(&mut self, on: bool) {
        if self.led.set_state(PinState::from(on)).is_err() {
            warn!("HW: confirm LED write failed");
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        if self.buzzer.set_state(PinState::from(on)).is_err() {
            warn!("HW: buzzer write failed");
        }
    }
}

// ── Combined adapter ──────────────────────────────────────────

/// Concrete adapter that combines all safe-body hardware behind port traits.
pub struct HardwareAdapter<S, A, D, W, T> {
    sensors: S,
    actuators: A,
    deposit: TriggerButton<D>,
    withdraw: TriggerButton<W>,
    clock: T,
}

impl<S, A, D, W, T> HardwareAdapter<S, A, D, W, T>
where
    S: DoorSensorPort,
    A: ActuatorPort,
    D: InputPin,
    W: InputPin,
    T: TimePort,
{
    pub fn new(
        sensors: S,
        actuators: A,
        deposit: TriggerButton<D>,
        withdraw: TriggerButton<W>,
        clock: T,
    ) -> Self {
        Self {
            sensors,
            actuators,
            deposit,
            withdraw,
            clock,
        }
    }
}

impl<S: DoorSensorPort, A, D, W, T> DoorSensorPort for HardwareAdapter<S, A, D, W, T> {
    fn contact_closed(&mut self) -> bool {
        self.sensors.contact_closed()
    }

    fn optical_aligned(&mut self) -> bool {
        self.sensors.optical_aligned()
    }
}

impl<S, A: ActuatorPort, D, W, T> ActuatorPort for HardwareAdapter<S, A, D, W, T> {
    fn set_confirm_led(&mut self, on: bool) {
        self.actuators.set_confirm_led(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.actuators.set_buzzer(on);
    }
}

impl<S, A, D, W, T: TimePort> TimePort for HardwareAdapter<S, A, D, W, T> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl<S, A, D: InputPin, W: InputPin, T: TimePort> TriggerPort for HardwareAdapter<S, A, D, W, T> {
    fn poll_trigger(&mut self) -> Option<TransactionKind> {
        let now = self.clock.now_ms();
        // Tick both so neither debouncer misses an edge; withdraw wins a tie.
        let withdraw = self.withdraw.tick(now);
        let deposit = self.deposit.tick(now);
        if withdraw {
            Some(TransactionKind::Withdraw)
        } else if deposit {
            Some(TransactionKind::Deposit)
        } else {
            None
        }
    }
}
