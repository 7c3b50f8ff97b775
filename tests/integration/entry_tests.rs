//! Keypad entry loops against a scripted keypad.

use crate::mock_hw::{MockSafe, MockUi};

use smartsafe::config::SafeConfig;
use smartsafe::entry::amount::AmountEntry;
use smartsafe::entry::auth::Authenticator;

fn authenticate(script: &str) -> (bool, MockSafe, MockUi) {
    let auth = Authenticator::new(&SafeConfig::default());
    let mut hw = MockSafe::door_closed();
    let mut ui = MockUi::typing(script);
    let ok = auth.authenticate(&mut hw, &mut ui);
    (ok, hw, ui)
}

fn capture(script: &str) -> (u32, MockUi) {
    let entry = AmountEntry::new(&SafeConfig::default());
    let mut hw = MockSafe::door_closed();
    let mut ui = MockUi::typing(script);
    let amount = entry.capture("Enter deposit amt:", &mut hw, &mut ui);
    (amount, ui)
}

// ── Authenticator ─────────────────────────────────────────────

#[test]
fn correct_credential_accepted() {
    let (ok, hw, ui) = authenticate("1111#");
    assert!(ok);
    assert!(ui.saw("Password OK"));
    assert_eq!(hw.led_flashes(), 1);
    assert_eq!(hw.buzzer_pulses(), 0);
}

#[test]
fn wrong_credential_rejected() {
    let (ok, hw, ui) = authenticate("1234#");
    assert!(!ok);
    assert!(ui.saw("Wrong Password!"));
    assert_eq!(hw.buzzer_pulses(), 1);
    assert_eq!(hw.led_flashes(), 0);
}

#[test]
fn digits_are_masked() {
    let (_, _, ui) = authenticate("1111#");
    assert_eq!(ui.echoed, "****");
    assert!(!ui.saw("1111"));
}

#[test]
fn non_digit_keys_ignored_in_credential() {
    let (ok, _, ui) = authenticate("11A*B11#");
    assert!(ok);
    assert_eq!(ui.echoed, "****");
}

#[test]
fn prefix_and_extension_both_fail() {
    assert!(!authenticate("111#").0);
    assert!(!authenticate("11111#").0);
    assert!(!authenticate("#").0);
}

#[test]
fn overlong_credential_fails() {
    let long = format!("{}#", "1".repeat(40));
    assert!(!authenticate(&long).0);
}

// ── AmountEntry ───────────────────────────────────────────────

#[test]
fn digits_then_submit() {
    let (amount, ui) = capture("250#");
    assert_eq!(amount, 250);
    assert_eq!(ui.echoed, "250");
    assert!(ui.saw("(# to finish)"));
}

#[test]
fn empty_submit_is_ignored() {
    let (amount, ui) = capture("##42#");
    assert_eq!(amount, 42);
    assert_eq!(ui.keys_left(), 0);
}

#[test]
fn zero_submit_is_ignored() {
    assert_eq!(capture("0#000#7#").0, 7);
}

#[test]
fn clear_resets_and_redraws_prompt() {
    let (amount, ui) = capture("99*50#");
    assert_eq!(amount, 50);
    let prompts = ui
        .screens
        .iter()
        .filter(|s| s.first().is_some_and(|l| l == "Enter deposit amt:"))
        .count();
    assert_eq!(prompts, 2);
}

#[test]
fn function_keys_ignored_in_amount() {
    assert_eq!(capture("1A2D#").0, 12);
}

#[test]
fn digits_past_capacity_dropped() {
    let (amount, ui) = capture("12345678901#");
    assert_eq!(amount, 123_456_789);
    assert_eq!(ui.echoed, "123456789");
}
