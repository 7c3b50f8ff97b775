//! Mock adapters for integration tests.
//!
//! Time is virtual: `delay_ms` advances the clock instantly, so a test can
//! walk through a 30-second alarm without waiting.  The door follows a
//! timeline of `(at_ms, contact, optical)` entries; the entry with the
//! latest `at_ms <= now` applies.

#![allow(dead_code)]

use std::collections::VecDeque;

use smartsafe::app::events::AppEvent;
use smartsafe::app::keys::Key;
use smartsafe::app::ports::{
    ActuatorPort, DisplaySink, DoorSensorPort, EventSink, InputSource, LedgerClient, TimePort,
    TriggerPort,
};
use smartsafe::app::transaction::{LedgerEvent, TransactionKind};
use smartsafe::config::SafeConfig;
use smartsafe::error::LedgerError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Led(bool),
    Buzzer(bool),
}

// ── MockSafe ──────────────────────────────────────────────────

pub struct MockSafe {
    pub now: u64,
    door: Vec<(u64, bool, bool)>,
    pub triggers: VecDeque<TransactionKind>,
    /// `(time, call)` for every actuator write.
    pub calls: Vec<(u64, ActuatorCall)>,
    pub door_samples: u32,
}

impl MockSafe {
    pub fn with_door(timeline: &[(u64, bool, bool)]) -> Self {
        let mut door = timeline.to_vec();
        door.sort_by_key(|e| e.0);
        Self {
            now: 0,
            door,
            triggers: VecDeque::new(),
            calls: Vec::new(),
            door_samples: 0,
        }
    }

    pub fn door_closed() -> Self {
        Self::with_door(&[(0, true, true)])
    }

    pub fn door_open() -> Self {
        Self::with_door(&[(0, false, false)])
    }

    /// Open until `at_ms`, closed afterwards.
    pub fn door_closes_at(at_ms: u64) -> Self {
        Self::with_door(&[(0, false, false), (at_ms, true, true)])
    }

    pub fn press(mut self, kind: TransactionKind) -> Self {
        self.triggers.push_back(kind);
        self
    }

    fn door_state(&self) -> (bool, bool) {
        self.door
            .iter()
            .rev()
            .find(|(at, _, _)| *at <= self.now)
            .map_or((false, false), |&(_, c, o)| (c, o))
    }

    pub fn buzzer_pulses(&self) -> usize {
        self.calls
            .iter()
            .filter(|(_, c)| *c == ActuatorCall::Buzzer(true))
            .count()
    }

    pub fn buzzer_pulses_between(&self, from: u64, to: u64) -> usize {
        self.calls
            .iter()
            .filter(|(t, c)| *c == ActuatorCall::Buzzer(true) && (from..to).contains(t))
            .count()
    }

    pub fn led_flashes(&self) -> usize {
        self.calls
            .iter()
            .filter(|(_, c)| *c == ActuatorCall::Led(true))
            .count()
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|(_, c)| match c {
                ActuatorCall::Buzzer(on) => Some(*on),
                ActuatorCall::Led(_) => None,
            })
            .unwrap_or(false)
    }
}

impl DoorSensorPort for MockSafe {
    fn contact_closed(&mut self) -> bool {
        self.door_samples += 1;
        self.door_state().0
    }

    fn optical_aligned(&mut self) -> bool {
        self.door_state().1
    }
}

impl ActuatorPort for MockSafe {
    fn set_confirm_led(&mut self, on: bool) {
        self.calls.push((self.now, ActuatorCall::Led(on)));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push((self.now, ActuatorCall::Buzzer(on)));
    }
}

impl TimePort for MockSafe {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}

impl TriggerPort for MockSafe {
    fn poll_trigger(&mut self) -> Option<TransactionKind> {
        self.triggers.pop_front()
    }
}

// ── MockUi ────────────────────────────────────────────────────

/// Scripted keypad plus a display that records every screen.
pub struct MockUi {
    keys: VecDeque<Key>,
    /// One entry per `clear`; the last one is on the panel.
    pub screens: Vec<Vec<String>>,
    /// Every character echoed with `write`, across all screens.
    pub echoed: String,
    pending: String,
}

impl MockUi {
    /// Keys from a keypad string, e.g. `"1111#50#"`.
    pub fn typing(script: &str) -> Self {
        Self {
            keys: script.chars().filter_map(Key::from_char).collect(),
            screens: vec![Vec::new()],
            echoed: String::new(),
            pending: String::new(),
        }
    }

    pub fn keys_left(&self) -> usize {
        self.keys.len()
    }

    pub fn saw(&self, text: &str) -> bool {
        self.screens.iter().flatten().any(|l| l.contains(text))
    }

    pub fn current(&self) -> &[String] {
        self.screens.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl InputSource for MockUi {
    fn poll_key(&mut self) -> Option<Key> {
        // An entry loop waiting on an empty script would spin forever.
        Some(self.keys.pop_front().expect("key script exhausted"))
    }
}

impl DisplaySink for MockUi {
    fn clear(&mut self) {
        self.pending.clear();
        self.screens.push(Vec::new());
    }

    fn write_line(&mut self, text: &str) {
        let line = format!("{}{}", self.pending, text);
        self.pending.clear();
        if let Some(screen) = self.screens.last_mut() {
            screen.push(line);
        }
    }

    fn write(&mut self, text: &str) {
        self.pending.push_str(text);
        self.echoed.push_str(text);
    }

    fn flush(&mut self) {}
}

// ── MockLedger ────────────────────────────────────────────────

pub struct MockLedger {
    pub stored_balance: Result<u64, LedgerError>,
    pub posts: Vec<LedgerEvent>,
    pub fail_posts: Option<LedgerError>,
    pub reads: u32,
}

impl MockLedger {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            stored_balance: Ok(balance),
            posts: Vec::new(),
            fail_posts: None,
            reads: 0,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            stored_balance: Err(LedgerError::Unavailable),
            posts: Vec::new(),
            fail_posts: Some(LedgerError::Unavailable),
            reads: 0,
        }
    }

    pub fn alerts(&self) -> usize {
        self.posts.iter().filter(|e| e.alert).count()
    }
}

impl LedgerClient for MockLedger {
    fn read_balance(&mut self) -> Result<u64, LedgerError> {
        self.reads += 1;
        self.stored_balance
    }

    fn post_event(&mut self, event: &LedgerEvent) -> Result<(), LedgerError> {
        // Attempts are recorded even when they fail.
        self.posts.push(*event);
        match self.fail_posts {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Virtual time spent by a successful login: "Password OK" pause plus
/// the confirmation flash.
pub fn login_ms(cfg: &SafeConfig) -> u64 {
    u64::from(cfg.auth_ok_pause_ms) + u64::from(cfg.confirm_led_ms)
}
