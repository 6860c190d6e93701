//! Candidate values awaiting user confirmation.

use serde::{Deserialize, Serialize};

use super::StyleProfile;

/// A not-yet-committed interpretation of the user's input (or of a
/// generated proposal), held until the user affirms or rejects it.
///
/// Exactly one candidate exists while `pending_confirmation` is set; an
/// affirm commits it into the session's collected values, a reject
/// discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidate {
    Topic(String),
    Keywords(Vec<String>),
    Style(StyleProfile),
    Structure(Vec<String>),
    Subtitles(Vec<String>),
    SectionDraft { title: String, body: String },
}

impl Candidate {
    /// Short name of the candidate kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Topic(_) => "topic",
            Self::Keywords(_) => "keywords",
            Self::Style(_) => "style",
            Self::Structure(_) => "structure",
            Self::Subtitles(_) => "subtitles",
            Self::SectionDraft { .. } => "section_draft",
        }
    }
}
