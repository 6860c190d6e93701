//! Session aggregate and its building blocks.
//!
//! A `Session` is the unit of one user's conversation: the current stage,
//! the values confirmed so far, the candidate value awaiting confirmation,
//! per-section drafts and the display transcript.

mod candidate;
mod collected;
mod session;
mod stage;
mod transcript;

pub use candidate::Candidate;
pub use collected::{parse_item_list, Collected, StyleProfile};
pub use session::Session;
pub use stage::Stage;
pub use transcript::{Speaker, Transcript, TranscriptEntry};
