//! Timed polling.
//!
//! Every waiting phase in the safe is the same loop: check a condition,
//! and if it does not hold yet, wait (plain delay or a buzzer cycle) and
//! check again, until a deadline measured from the monotonic clock.
//! Deadlines are one-shot: nothing inside the loop extends them.

use crate::app::ports::TimePort;

/// How long [`poll_until`] may keep trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Give up once this many milliseconds have passed since the first probe.
    After(u32),
    /// Never give up.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The probe returned `true` this long after the loop started.
    Satisfied { elapsed_ms: u64 },
    /// The deadline passed without a successful probe.
    TimedOut,
}

impl PollOutcome {
    pub fn is_satisfied(self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }
}

/// Run `probe`, then `wait`, repeatedly until `probe` succeeds or `deadline`
/// passes.  The deadline is checked before each probe, so a probe that
/// would only have succeeded after the deadline is never run.
///
/// Both closures receive the hardware handle so one can read sensors and
/// the other can drive actuators without a double borrow.
pub fn poll_until<H: TimePort + ?Sized>(
    hw: &mut H,
    deadline: Deadline,
    mut probe: impl FnMut(&mut H) -> bool,
    mut wait: impl FnMut(&mut H),
) -> PollOutcome {
    let start = hw.now_ms();
    loop {
        let elapsed_ms = hw.now_ms().saturating_sub(start);
        if let Deadline::After(limit) = deadline {
            if elapsed_ms >= u64::from(limit) {
                return PollOutcome::TimedOut;
            }
        }
        if probe(hw) {
            return PollOutcome::Satisfied { elapsed_ms };
        }
        wait(hw);
    }
}

/// [`poll_until`] with a fixed sleep between probes.
pub fn poll_every<H: TimePort + ?Sized>(
    hw: &mut H,
    interval_ms: u32,
    deadline: Deadline,
    probe: impl FnMut(&mut H) -> bool,
) -> PollOutcome {
    poll_until(hw, deadline, probe, |hw| hw.delay_ms(interval_ms))
}
