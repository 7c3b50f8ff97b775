//! Door close supervisor: the escalation engine.
//!
//! ```text
//!  IDLE ──▶ GRACE_PERIOD ──[closed]──────────────────────────▶ RESOLVED
//!               │                                                 ▲
//!          [grace timeout]                                        │
//!               ▼                                                 │
//!          ALERT_WINDOW ──[closed]────────────────────────────────┤
//!               │  (buzzer pulsing)                               │
//!          [alert timeout] → one security alert to the ledger     │
//!               ▼                                                 │
//!        CONTINUOUS_ALARM ──[closed]──────────────────────────────┘
//!               (no timeout, no override)
//! ```
//!
//! The continuous alarm has no escape: the only way out is a closed
//! reading from both door sensors.  A stuck sensor keeps the device
//! alarming forever.  At most one alert is reported per supervision run,
//! however long the alarm lasts.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::feedback::{beep, buzz_cycle, flash_confirm, show};
use crate::app::ports::{ActuatorPort, DisplaySink, DoorSensorPort, EventSink, LedgerClient, TimePort};
use crate::app::transaction::LedgerEvent;
use crate::config::SafeConfig;

use super::poll::{Deadline, PollOutcome, poll_every, poll_until};

/// Supervisor phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorPhase {
    Idle,
    GracePeriod,
    AlertWindow,
    ContinuousAlarm,
    Resolved,
}

impl DoorPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::GracePeriod => "GracePeriod",
            Self::AlertWindow => "AlertWindow",
            Self::ContinuousAlarm => "ContinuousAlarm",
            Self::Resolved => "Resolved",
        }
    }
}

/// What a supervision run ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorOutcome {
    /// Door confirmed closed.  Only `false` for a grace-only run that timed out.
    pub closed: bool,
    /// A security alert was reported during this run.
    pub alert_sent: bool,
    /// Phase that observed the closed door (or gave up).
    pub closed_in: DoorPhase,
}

/// Timing subset of [`SafeConfig`] used by the supervisor.
#[derive(Debug, Clone, Copy)]
struct DoorTiming {
    grace_timeout_ms: u32,
    alert_timeout_ms: u32,
    poll_interval_ms: u32,
    warning_pulse_ms: u32,
    alert_on_ms: u32,
    alert_off_ms: u32,
    alarm_on_ms: u32,
    alarm_off_ms: u32,
    confirm_led_ms: u32,
}

impl DoorTiming {
    /// Total time the door may stay open before the alert is raised.
    fn open_allowance_ms(&self) -> u64 {
        u64::from(self.grace_timeout_ms) + u64::from(self.alert_timeout_ms)
    }
}

/// At most one alert report per supervision run.
#[derive(Debug, Default)]
struct AlertLatch {
    sent: bool,
}

impl AlertLatch {
    fn raise(
        &mut self,
        ledger: &mut impl LedgerClient,
        balance: u64,
        sink: &mut impl EventSink,
    ) {
        if self.sent {
            return;
        }
        self.sent = true;
        let reported = match ledger.post_event(&LedgerEvent::alert(balance)) {
            Ok(()) => true,
            Err(e) => {
                warn!("DOOR: alert report failed ({e}), not retrying");
                sink.emit(&AppEvent::LedgerPostFailed(e));
                false
            }
        };
        sink.emit(&AppEvent::SecurityAlert { balance, reported });
    }
}

pub struct DoorCloseSupervisor {
    timing: DoorTiming,
    phase: DoorPhase,
}

impl DoorCloseSupervisor {
    pub fn new(config: &SafeConfig) -> Self {
        Self {
            timing: DoorTiming {
                grace_timeout_ms: config.grace_timeout_ms,
                alert_timeout_ms: config.alert_timeout_ms,
                poll_interval_ms: config.door_poll_interval_ms,
                warning_pulse_ms: config.warning_pulse_ms,
                alert_on_ms: config.alert_pulse_on_ms,
                alert_off_ms: config.alert_pulse_off_ms,
                alarm_on_ms: config.alarm_on_ms,
                alarm_off_ms: config.alarm_off_ms,
                confirm_led_ms: config.confirm_led_ms,
            },
            phase: DoorPhase::Idle,
        }
    }

    /// Phase the supervisor is in (or finished in).
    pub fn phase(&self) -> DoorPhase {
        self.phase
    }

    /// Full escalation: grace → alert window → continuous alarm.
    ///
    /// Blocks until the door is closed.  `balance` is the value reported
    /// with the security alert.
    pub fn supervise<H>(
        &mut self,
        hw: &mut H,
        display: &mut impl DisplaySink,
        ledger: &mut impl LedgerClient,
        balance: u64,
        sink: &mut impl EventSink,
    ) -> DoorOutcome
    where
        H: DoorSensorPort + ActuatorPort + TimePort,
    {
        let mut latch = AlertLatch::default();
        self.phase = DoorPhase::Idle;

        // ── Grace period: silent polling ──────────────────────────
        if self.run_grace(hw, sink).is_satisfied() {
            return self.resolve(DoorPhase::GracePeriod, false, sink);
        }

        // ── Alert window: warning beep, then pulse while polling ──
        self.enter(DoorPhase::AlertWindow, sink);
        show(display, &["Please close door!"]);
        beep(hw, self.timing.warning_pulse_ms);

        let t = self.timing;
        let alert = poll_until(
            hw,
            Deadline::After(t.alert_timeout_ms),
            |hw| super::sample(hw).is_closed(),
            |hw| buzz_cycle(hw, t.alert_on_ms, t.alert_off_ms),
        );
        if alert.is_satisfied() {
            show(display, &["Door Closed !!"]);
            return self.resolve(DoorPhase::AlertWindow, false, sink);
        }

        // ── Alert window expired: report once, then alarm ─────────
        show(display, &["Door still open!"]);
        warn!(
            "DOOR: open past {}ms, raising security alert",
            t.open_allowance_ms()
        );
        latch.raise(ledger, balance, sink);

        self.run_alarm(hw, display, sink);
        self.resolve(DoorPhase::ContinuousAlarm, latch.sent, sink)
    }

    /// Grace phase only.  Returns `closed = false` on timeout without
    /// escalating.
    pub fn await_grace<H>(&mut self, hw: &mut H, sink: &mut impl EventSink) -> DoorOutcome
    where
        H: DoorSensorPort + TimePort,
    {
        self.phase = DoorPhase::Idle;
        if self.run_grace(hw, sink).is_satisfied() {
            return self.resolve(DoorPhase::GracePeriod, false, sink);
        }
        info!("DOOR: grace window elapsed with door open");
        DoorOutcome {
            closed: false,
            alert_sent: false,
            closed_in: DoorPhase::GracePeriod,
        }
    }

    /// Jump straight to the continuous alarm (no grace, no alert report).
    /// Returns once the door is closed.
    pub fn alarm_until_closed<H>(
        &mut self,
        hw: &mut H,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> DoorOutcome
    where
        H: DoorSensorPort + ActuatorPort + TimePort,
    {
        self.phase = DoorPhase::Idle;
        self.run_alarm(hw, display, sink);
        self.resolve(DoorPhase::ContinuousAlarm, false, sink)
    }

    // ── Internal ──────────────────────────────────────────────────

    fn run_grace<H>(&mut self, hw: &mut H, sink: &mut impl EventSink) -> PollOutcome
    where
        H: DoorSensorPort + TimePort,
    {
        self.enter(DoorPhase::GracePeriod, sink);
        poll_every(
            hw,
            self.timing.poll_interval_ms,
            Deadline::After(self.timing.grace_timeout_ms),
            |hw| super::sample(hw).is_closed(),
        )
    }

    fn run_alarm<H>(&mut self, hw: &mut H, display: &mut impl DisplaySink, sink: &mut impl EventSink)
    where
        H: DoorSensorPort + ActuatorPort + TimePort,
    {
        self.enter(DoorPhase::ContinuousAlarm, sink);
        show(display, &["Door open!", "Close to stop alert"]);

        let t = self.timing;
        poll_until(
            hw,
            Deadline::Never,
            |hw| super::sample(hw).is_closed(),
            |hw| buzz_cycle(hw, t.alarm_on_ms, t.alarm_off_ms),
        );

        hw.set_buzzer(false);
        show(display, &["Door Closed !!"]);
        flash_confirm(hw, t.confirm_led_ms);
    }

    fn enter(&mut self, next: DoorPhase, sink: &mut impl EventSink) {
        if next == self.phase {
            return;
        }
        info!("DOOR phase: {} -> {}", self.phase.name(), next.name());
        sink.emit(&AppEvent::DoorPhaseChanged {
            from: self.phase,
            to: next,
        });
        self.phase = next;
    }

    fn resolve(&mut self, closed_in: DoorPhase, alert_sent: bool, sink: &mut impl EventSink) -> DoorOutcome {
        self.enter(DoorPhase::Resolved, sink);
        sink.emit(&AppEvent::DoorResolved {
            closed_in,
            alert_sent,
        });
        DoorOutcome {
            closed: true,
            alert_sent,
            closed_in,
        }
    }
}
