//! Door close supervisor escalation against a scripted door timeline.

use crate::mock_hw::{MockLedger, MockSafe, MockUi, RecordingSink};

use smartsafe::app::events::AppEvent;
use smartsafe::app::transaction::LedgerEvent;
use smartsafe::config::SafeConfig;
use smartsafe::door::supervisor::{DoorCloseSupervisor, DoorOutcome, DoorPhase};
use smartsafe::error::LedgerError;

const GRACE: u64 = 12_000;
const WARNING: u64 = 500;
const ALERT: u64 = 20_000;
/// First instant the alert window has fully expired.
const ALARM_START: u64 = GRACE + WARNING + ALERT;

struct Run {
    outcome: DoorOutcome,
    hw: MockSafe,
    ui: MockUi,
    ledger: MockLedger,
    sink: RecordingSink,
}

fn supervise(mut hw: MockSafe, mut ledger: MockLedger) -> Run {
    let mut sup = DoorCloseSupervisor::new(&SafeConfig::default());
    let mut ui = MockUi::typing("");
    let mut sink = RecordingSink::new();
    let outcome = sup.supervise(&mut hw, &mut ui, &mut ledger, 500, &mut sink);
    assert_eq!(sup.phase(), DoorPhase::Resolved);
    Run {
        outcome,
        hw,
        ui,
        ledger,
        sink,
    }
}

fn phases(sink: &RecordingSink) -> Vec<DoorPhase> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::DoorPhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

#[test]
fn closed_door_resolves_without_any_signal() {
    let run = supervise(MockSafe::door_closed(), MockLedger::with_balance(0));
    assert_eq!(
        run.outcome,
        DoorOutcome {
            closed: true,
            alert_sent: false,
            closed_in: DoorPhase::GracePeriod
        }
    );
    assert_eq!(run.hw.now, 0);
    assert!(run.hw.calls.is_empty());
    assert_eq!(phases(&run.sink), [DoorPhase::GracePeriod, DoorPhase::Resolved]);
}

#[test]
fn grace_polls_at_fixed_interval() {
    let run = supervise(MockSafe::door_closes_at(6_000), MockLedger::with_balance(0));
    assert!(!run.outcome.alert_sent);
    assert_eq!(run.outcome.closed_in, DoorPhase::GracePeriod);
    // 0, 60, ..., 6000: first sample at or after the close time.
    assert_eq!(run.hw.now, 6_000);
    assert_eq!(run.hw.door_samples, 101);
    assert_eq!(run.hw.buzzer_pulses(), 0);
}

#[test]
fn closing_in_alert_window_sends_no_alert() {
    let run = supervise(MockSafe::door_closes_at(20_000), MockLedger::with_balance(0));
    assert_eq!(run.outcome.closed_in, DoorPhase::AlertWindow);
    assert!(!run.outcome.alert_sent);
    assert!(run.ledger.posts.is_empty());
    assert!(run.ui.saw("Please close door!"));
    assert!(run.ui.saw("Door Closed !!"));
    // One warning beep plus one pulse per alert cycle before the close.
    assert!(run.hw.buzzer_pulses() >= 2);
    assert_eq!(
        phases(&run.sink),
        [
            DoorPhase::GracePeriod,
            DoorPhase::AlertWindow,
            DoorPhase::Resolved
        ]
    );
}

#[test]
fn alert_window_keeps_pulsing_while_open() {
    let run = supervise(MockSafe::door_closes_at(ALARM_START - 1_500), MockLedger::with_balance(0));
    assert_eq!(run.outcome.closed_in, DoorPhase::AlertWindow);
    // Warning beep at GRACE, then one pulse per second of open door.
    assert!(run.hw.buzzer_pulses_between(GRACE + WARNING, ALARM_START) >= 15);
}

#[test]
fn open_through_both_windows_alerts_exactly_once() {
    // Thirty extra seconds of alarm before the door is shut.
    let run = supervise(
        MockSafe::door_closes_at(ALARM_START + 30_000),
        MockLedger::with_balance(0),
    );
    assert_eq!(
        run.outcome,
        DoorOutcome {
            closed: true,
            alert_sent: true,
            closed_in: DoorPhase::ContinuousAlarm
        }
    );
    assert_eq!(run.ledger.posts, [LedgerEvent::alert(500)]);
    assert_eq!(
        run.sink.count(|e| matches!(e, AppEvent::SecurityAlert { .. })),
        1
    );
    assert!(run.hw.buzzer_pulses_between(ALARM_START, ALARM_START + 30_000) >= 40);
    assert!(!run.hw.buzzer_on(), "buzzer silenced on close");
    assert!(run.hw.led_flashes() >= 1, "confirmation on close");
    assert!(run.ui.saw("Door still open!"));
    assert_eq!(
        phases(&run.sink),
        [
            DoorPhase::GracePeriod,
            DoorPhase::AlertWindow,
            DoorPhase::ContinuousAlarm,
            DoorPhase::Resolved
        ]
    );
}

#[test]
fn failed_alert_report_still_counts_as_sent() {
    let mut ledger = MockLedger::with_balance(0);
    ledger.fail_posts = Some(LedgerError::Transport);
    let run = supervise(MockSafe::door_closes_at(ALARM_START + 1_000), ledger);

    assert!(run.outcome.alert_sent);
    assert_eq!(run.ledger.posts.len(), 1, "no retry");
    assert!(run.sink.events.contains(&AppEvent::SecurityAlert {
        balance: 500,
        reported: false
    }));
}

#[test]
fn sensor_disagreement_is_treated_as_open() {
    // Contact says shut from the start; optical only agrees later.
    let hw = MockSafe::with_door(&[(0, true, false), (GRACE + 2_000, true, true)]);
    let run = supervise(hw, MockLedger::with_balance(0));
    assert_eq!(run.outcome.closed_in, DoorPhase::AlertWindow);
}

#[test]
fn flicker_between_probes_does_not_extend_window() {
    // Alert-window probes fall on whole seconds after GRACE + WARNING; a
    // brief close between two probes is never seen.
    let flick = GRACE + WARNING + 3_200;
    let hw = MockSafe::with_door(&[
        (0, false, false),
        (flick, true, true),
        (flick + 300, false, false),
        (ALARM_START + 5_000, true, true),
    ]);
    let run = supervise(hw, MockLedger::with_balance(0));
    assert!(run.outcome.alert_sent);
    assert_eq!(run.ledger.alerts(), 1);
}

#[test]
fn grace_only_run_reports_open_door() {
    let mut sup = DoorCloseSupervisor::new(&SafeConfig::default());
    let mut hw = MockSafe::door_open();
    let mut sink = RecordingSink::new();

    let outcome = sup.await_grace(&mut hw, &mut sink);

    assert!(!outcome.closed);
    assert!(!outcome.alert_sent);
    assert_eq!(hw.now, GRACE);
    assert_eq!(hw.buzzer_pulses(), 0);
}

#[test]
fn direct_alarm_posts_nothing() {
    let mut sup = DoorCloseSupervisor::new(&SafeConfig::default());
    let mut hw = MockSafe::door_closes_at(10_000);
    let mut ui = MockUi::typing("");
    let mut sink = RecordingSink::new();

    let outcome = sup.alarm_until_closed(&mut hw, &mut ui, &mut sink);

    assert_eq!(outcome.closed_in, DoorPhase::ContinuousAlarm);
    assert!(!outcome.alert_sent);
    assert!(hw.now >= 10_000);
    assert!(hw.buzzer_pulses() >= 14);
    assert!(!hw.buzzer_on());
}
