pub mod config;
pub mod emitter;
pub mod error;
pub mod id;
pub mod layout;
pub mod model;
pub mod pins;

pub use config::BoardConfig;
pub use emitter::emit_sketch;
pub use error::{AssignError, ConfigError};
pub use id::ComponentId;
pub use model::*;
pub use pins::{AssignChange, PinAssignment, PinValues, parse_role_input};
