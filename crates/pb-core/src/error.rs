//! Error types. Every variant's `Display` text doubles as the warning
//! shown to the user; none of them leave state partially mutated.

use crate::model::Role;
use thiserror::Error;

/// Why a pin assignment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("Invalid role \"{0}\". Type led, button, or leave empty to clear.")]
    UnknownRole(String),

    #[error("Pin {pin} is already used by the {held_by}.")]
    PinConflict { pin: u8, held_by: Role },

    #[error("Pin {0} does not exist on the controller.")]
    InvalidPin(u8),
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config value out of range: {0}")]
    Range(String),
}
