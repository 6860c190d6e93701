//! Adapters - implementations of the ports.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use mock::{MockFailure, MockGenerator};
