pub mod input;
pub mod sim;
pub mod tools;
pub mod wiring;
pub mod workbench;

pub use input::InputEvent;
pub use sim::{ButtonState, ReleaseReason, Simulator};
pub use workbench::{Mutation, Response, Snapshot, View, Workbench};
