//! Emitter: PinAssignment → Arduino sketch text.
//!
//! Output is a fixed `setup`/`loop` skeleton; the assignment only decides
//! which lines appear and which pin numbers get interpolated.

use crate::model::Role;
use crate::pins::PinAssignment;
use std::fmt::Write;

pub const SKETCH_HEADER: &str = "// Auto-generated Arduino Code";

/// Render the firmware sketch for the current assignment.
#[must_use]
pub fn emit_sketch(pins: &PinAssignment) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(SKETCH_HEADER);
    out.push_str("\n\n");

    out.push_str("void setup() {\n");
    if let Some(pin) = pins.get(Role::Led) {
        writeln!(out, "  pinMode({pin}, OUTPUT);").unwrap();
    }
    if let Some(pin) = pins.get(Role::Button) {
        writeln!(out, "  pinMode({pin}, INPUT);").unwrap();
    }
    out.push_str("}\n\n");

    out.push_str("void loop() {\n");
    emit_loop_body(&mut out, pins);
    out.push_str("}\n");

    out
}

fn emit_loop_body(out: &mut String, pins: &PinAssignment) {
    match (pins.get(Role::Led), pins.get(Role::Button)) {
        (Some(led), Some(button)) => {
            writeln!(out, "  int buttonState = digitalRead({button});").unwrap();
            writeln!(out, "  digitalWrite({led}, buttonState);").unwrap();
        }
        (Some(led), None) => {
            writeln!(out, "  // LED on pin {led}").unwrap();
        }
        (None, Some(button)) => {
            writeln!(out, "  // Button on pin {button}").unwrap();
        }
        (None, None) => {}
    }
}
