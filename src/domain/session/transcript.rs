//! Append-only conversation transcript.
//!
//! The transcript exists for display and replay only. Decision logic never
//! reads it; the controller decides from the stage, the pending flag and
//! the candidate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Short label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One displayed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    speaker: Speaker,
    text: String,
    recorded_at: Timestamp,
}

impl TranscriptEntry {
    fn new(speaker: Speaker, text: String) -> Self {
        Self {
            speaker,
            text,
            recorded_at: Timestamp::now(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }
}

/// Ordered sequence of displayed messages. Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message.
    pub fn record(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(speaker, text.into()));
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut transcript = Transcript::new();
        transcript.record(Speaker::Assistant, "안녕하세요");
        transcript.record(Speaker::User, "Docker 입문");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].speaker(), Speaker::Assistant);
        assert_eq!(transcript.entries()[0].text(), "안녕하세요");
        assert_eq!(transcript.entries()[1].speaker(), Speaker::User);
    }

    #[test]
    fn timestamps_do_not_decrease() {
        let mut transcript = Transcript::new();
        transcript.record(Speaker::User, "a");
        transcript.record(Speaker::User, "b");
        let entries = transcript.entries();
        assert!(entries[0].recorded_at() <= entries[1].recorded_at());
    }

    #[test]
    fn speaker_labels_are_stable() {
        assert_eq!(Speaker::User.label(), "user");
        assert_eq!(Speaker::Assistant.label(), "assistant");
    }
}
