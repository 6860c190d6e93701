//! Mock text generator for testing.
//!
//! Provides a scripted implementation of the TextGenerator port so tests
//! run without calling a real generation API.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockGenerator::new()
//!     .with_reply("추천 키워드")
//!     .with_failure(MockFailure::Unavailable { message: "quota".into() });
//!
//! let text = generator.generate("prompt").await?;
//! assert_eq!(generator.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{GenerationError, TextGenerator};

/// Scripted mock generator.
///
/// Replies are consumed in order; an exhausted queue fails the call so a
/// test that makes an unexpected extra request fails loudly.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
enum ScriptedReply {
    /// Return this text.
    Text(String),
    /// Fail with this error.
    Failure(MockFailure),
}

/// Mock failure kinds for testing error handling.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockFailure> for GenerationError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockFailure::ContentFiltered { reason } => GenerationError::content_filtered(reason),
            MockFailure::Unavailable { message } => GenerationError::unavailable(message),
            MockFailure::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockFailure::Network { message } => GenerationError::network(message),
            MockFailure::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

impl MockGenerator {
    /// Creates a mock with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .expect("mock replies lock")
            .push_back(ScriptedReply::Text(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.replies
            .lock()
            .expect("mock replies lock")
            .push_back(ScriptedReply::Failure(failure));
        self
    }

    /// Returns the prompts received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock calls lock").clone()
    }

    /// Returns how many generation calls were made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock calls lock").len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .expect("mock calls lock")
            .push(prompt.to_string());

        let reply = self.replies.lock().expect("mock replies lock").pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(failure)) => Err(failure.into()),
            None => Err(GenerationError::unavailable("mock reply queue exhausted")),
        }
    }
}
