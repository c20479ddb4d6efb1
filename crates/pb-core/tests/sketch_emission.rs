//! Integration tests: assignment → firmware sketch.

use pb_core::model::Role;
use pb_core::{PinAssignment, emit_sketch};
use pretty_assertions::assert_eq;

fn assignment(led: Option<u8>, button: Option<u8>) -> PinAssignment {
    let mut pins = PinAssignment::new();
    if let Some(pin) = led {
        pins.assign(pin, Some(Role::Led)).unwrap();
    }
    if let Some(pin) = button {
        pins.assign(pin, Some(Role::Button)).unwrap();
    }
    pins
}

#[test]
fn led_and_button_pass_through() {
    let out = emit_sketch(&assignment(Some(13), Some(2)));
    let expected = "\
// Auto-generated Arduino Code

void setup() {
  pinMode(13, OUTPUT);
  pinMode(2, INPUT);
}

void loop() {
  int buttonState = digitalRead(2);
  digitalWrite(13, buttonState);
}
";
    assert_eq!(out, expected);
}

#[test]
fn led_only_has_placeholder_and_no_pass_through() {
    let out = emit_sketch(&assignment(Some(13), None));
    let expected = "\
// Auto-generated Arduino Code

void setup() {
  pinMode(13, OUTPUT);
}

void loop() {
  // LED on pin 13
}
";
    assert_eq!(out, expected);
    assert!(!out.contains("digitalRead"));
    assert!(!out.contains("digitalWrite"));
}

#[test]
fn clearing_a_role_drops_its_lines() {
    let mut pins = assignment(Some(13), Some(2));
    pins.assign(13, None).unwrap();
    let out = emit_sketch(&pins);
    assert!(!out.contains("OUTPUT"));
    assert!(out.contains("  // Button on pin 2\n"));
}

#[test]
fn rejected_assignment_does_not_change_output() {
    let mut pins = assignment(Some(13), Some(2));
    let before = emit_sketch(&pins);
    assert!(pins.assign(2, Some(Role::Led)).is_err());
    assert_eq!(emit_sketch(&pins), before);
}
