//! Foundation types shared across the domain layer.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::DomainError;
pub use ids::SessionId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
