//! Pin assignment and live pin values.
//!
//! `PinAssignment` is the two-entry lookup table binding each role to at
//! most one controller pin. The only way to mutate it is `assign`, which
//! upholds the invariant that no pin is held by both roles.

use crate::error::AssignError;
use crate::model::Role;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PinAssignment {
    led: Option<u8>,
    button: Option<u8>,
}

/// What an `assign` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignChange {
    Unchanged,
    Cleared {
        role: Role,
        pin: u8,
    },
    Assigned {
        role: Role,
        pin: u8,
        /// Pin the role held before, if it moved.
        previous: Option<u8>,
    },
}

impl AssignChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, AssignChange::Unchanged)
    }
}

impl PinAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<u8> {
        match role {
            Role::Led => self.led,
            Role::Button => self.button,
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<u8> {
        match role {
            Role::Led => &mut self.led,
            Role::Button => &mut self.button,
        }
    }

    /// The role bound to `pin`, if any.
    pub fn holder(&self, pin: u8) -> Option<Role> {
        Role::ALL.into_iter().find(|role| self.get(*role) == Some(pin))
    }

    /// `(led, button)` when both roles are bound.
    pub fn both(&self) -> Option<(u8, u8)> {
        Some((self.led?, self.button?))
    }

    pub fn is_empty(&self) -> bool {
        self.led.is_none() && self.button.is_none()
    }

    /// Bind `role` to `pin`, or clear whatever holds `pin` when `role` is `None`.
    ///
    /// Binding a pin held by the other role fails with `PinConflict` and
    /// leaves the mapping untouched. A role already bound elsewhere moves.
    pub fn assign(&mut self, pin: u8, role: Option<Role>) -> Result<AssignChange, AssignError> {
        let Some(role) = role else {
            return Ok(match self.holder(pin) {
                Some(held) => {
                    *self.slot(held) = None;
                    AssignChange::Cleared { role: held, pin }
                }
                None => AssignChange::Unchanged,
            });
        };

        let rival = role.other();
        if self.get(rival) == Some(pin) {
            return Err(AssignError::PinConflict { pin, held_by: rival });
        }
        if self.get(role) == Some(pin) {
            return Ok(AssignChange::Unchanged);
        }
        let previous = self.slot(role).replace(pin);
        Ok(AssignChange::Assigned {
            role,
            pin,
            previous,
        })
    }
}

/// Parse the text typed into the role prompt.
///
/// Accepts `led`, `button` or an empty string (clear), case-insensitive
/// and trimmed.
pub fn parse_role_input(input: &str) -> Result<Option<Role>, AssignError> {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "led" => Ok(Some(Role::Led)),
        "button" => Ok(Some(Role::Button)),
        _ => Err(AssignError::UnknownRole(trimmed.to_string())),
    }
}

/// HIGH/LOW per pin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PinValues(BTreeMap<u8, bool>);

impl PinValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown pins read LOW.
    pub fn get(&self, pin: u8) -> bool {
        self.0.get(&pin).copied().unwrap_or(false)
    }

    pub fn set(&mut self, pin: u8, high: bool) {
        self.0.insert(pin, high);
    }

    pub fn remove(&mut self, pin: u8) {
        self.0.remove(&pin);
    }

    /// Drive every tracked pin LOW.
    pub fn reset_all(&mut self) {
        for value in self.0.values_mut() {
            *value = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, bool)> + '_ {
        self.0.iter().map(|(pin, high)| (*pin, *high))
    }

    /// Keep tracked entries in step with an assignment change.
    pub fn apply_change(&mut self, change: AssignChange) {
        match change {
            AssignChange::Unchanged => {}
            AssignChange::Cleared { pin, .. } => self.remove(pin),
            AssignChange::Assigned { pin, previous, .. } => {
                if let Some(old) = previous {
                    self.remove(old);
                }
                self.set(pin, false);
            }
        }
    }
}
