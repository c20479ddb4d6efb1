//! Live signal simulation.
//!
//! Each armed button is a two-state machine:
//!
//! ```text
//!            press
//! Released ────────► Pressed
//!    ▲                  │
//!    └──────────────────┘
//!    press end / pointer leaves lead
//! ```
//!
//! Entering `Pressed` drives the button's pin HIGH, and the LED's pin too
//! when both roles are assigned. Entering `Released` drives them LOW.

use pb_core::id::ComponentId;
use pb_core::model::Role;
use pb_core::pins::{AssignChange, PinAssignment, PinValues};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    Released,
    Pressed,
}

/// Why a button went back to `Released`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    PressEnd,
    /// Pointer left the lead mid-press; treated exactly like a release.
    Leave,
}

#[derive(Debug, Default)]
pub struct Simulator {
    buttons: HashMap<ComponentId, ButtonState>,
    values: PinValues,
    running: bool,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &PinValues {
        &self.values
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self, button: ComponentId) -> Option<ButtonState> {
        self.buttons.get(&button).copied()
    }

    pub fn is_pressed(&self, button: ComponentId) -> bool {
        self.state(button) == Some(ButtonState::Pressed)
    }

    /// Start tracking a button. Re-arming resets both role pins LOW,
    /// whatever they held before.
    pub fn arm(&mut self, button: ComponentId, pins: &PinAssignment) {
        self.buttons.insert(button, ButtonState::Released);
        for role in Role::ALL {
            if let Some(pin) = pins.get(role) {
                self.values.set(pin, false);
            }
        }
        log::debug!("armed {button}");
    }

    /// Released → Pressed. Returns `false` if the button is unarmed or
    /// already pressed.
    pub fn press(&mut self, button: ComponentId, pins: &PinAssignment) -> bool {
        match self.buttons.get_mut(&button) {
            Some(state) if *state == ButtonState::Released => *state = ButtonState::Pressed,
            _ => return false,
        }

        match pins.both() {
            Some((led, btn)) => {
                self.values.set(btn, true);
                self.values.set(led, true);
            }
            None => {
                if let Some(btn) = pins.get(Role::Button) {
                    self.values.set(btn, true);
                }
            }
        }
        log::debug!("{button} pressed");
        true
    }

    /// Pressed → Released. Returns `false` if the button was not pressed.
    pub fn release(
        &mut self,
        button: ComponentId,
        pins: &PinAssignment,
        reason: ReleaseReason,
    ) -> bool {
        match self.buttons.get_mut(&button) {
            Some(state) if *state == ButtonState::Pressed => *state = ButtonState::Released,
            _ => return false,
        }

        if let Some(btn) = pins.get(Role::Button) {
            self.values.set(btn, false);
        }
        if let Some(led) = pins.get(Role::Led) {
            self.values.set(led, false);
        }
        log::debug!("{button} released ({reason:?})");
        true
    }

    /// Keep tracked pin entries in step with an assignment change.
    pub fn on_assignment(&mut self, change: AssignChange) {
        self.values.apply_change(change);
    }

    /// Flip the run flag. Stopping releases every button and drives
    /// every tracked pin LOW.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        if !self.running {
            self.buttons
                .values_mut()
                .for_each(|state| *state = ButtonState::Released);
            self.values.reset_all();
        }
        self.running
    }
}
