//! Text Generation Port - interface for the LLM text generation service.
//!
//! The pipeline treats generation as an opaque collaborator: one prompt in,
//! one complete text out. There is no streaming and no token-level
//! interface, and no retry support: a failed call is surfaced
//! verbatim to the user as an assistant message and the conversation state
//! is left untouched, so the user can simply repeat their input.

use async_trait::async_trait;

/// Port for text generation.
///
/// Implementations connect to an external generation API (or a scripted
/// mock in tests) and translate provider failures into `GenerationError`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a complete text for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the call fails; the error's display
    /// text is what the user sees.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// The provider blocked the content for safety reasons.
    #[error("content filtered: {reason}")]
    ContentFiltered {
        /// Reason for filtering.
        reason: String,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_texts_are_user_presentable() {
        assert_eq!(
            GenerationError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            GenerationError::unavailable("server error 503").to_string(),
            "provider unavailable: server error 503"
        );
        assert_eq!(
            GenerationError::AuthenticationFailed.to_string(),
            "authentication failed"
        );
        assert_eq!(
            GenerationError::Timeout { timeout_secs: 120 }.to_string(),
            "request timed out after 120s"
        );
    }
}
