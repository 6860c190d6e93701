//! Application layer - the step controller driving the conversation.

mod controller;
pub mod messages;

pub use controller::{ControllerAction, StepController};
