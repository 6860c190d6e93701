//! The Session aggregate.
//!
//! Owns all conversation state for one user and enforces the core
//! invariants:
//!
//! - the stage only moves along the fixed forward chain,
//! - a collected value is written only by committing an affirmed candidate,
//! - the draft cursor stays within `0..=subtitles.len()`.
//!
//! Sessions are explicit values passed into and returned from the
//! controller; there is no ambient storage and no persistence. A session
//! lives for one conversation and is discarded on restart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SessionId, StateMachine};

use super::{Candidate, Collected, Speaker, Stage, Transcript};

/// The unit of one user's conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    stage: Stage,
    pending_confirmation: bool,
    prompted: bool,
    collected: Collected,
    candidate: Option<Candidate>,
    section_drafts: HashMap<String, String>,
    draft_cursor: usize,
    transcript: Transcript,
}

impl Session {
    /// Creates a fresh session at the start of the pipeline.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            stage: Stage::Topic,
            pending_confirmation: false,
            prompted: false,
            collected: Collected::default(),
            candidate: None,
            section_drafts: HashMap::new(),
            draft_cursor: 0,
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// True while a candidate value is waiting for the user's verdict.
    pub fn is_pending_confirmation(&self) -> bool {
        self.pending_confirmation
    }

    /// True once the current stage's question has been emitted; makes
    /// empty-input re-entry a no-op.
    pub fn is_prompted(&self) -> bool {
        self.prompted
    }

    pub fn collected(&self) -> &Collected {
        &self.collected
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    pub fn section_drafts(&self) -> &HashMap<String, String> {
        &self.section_drafts
    }

    pub fn draft_cursor(&self) -> usize {
        self.draft_cursor
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The subtitle currently being drafted, if any remain.
    pub fn current_subtitle(&self) -> Option<&str> {
        self.collected
            .subtitles()
            .get(self.draft_cursor)
            .map(String::as_str)
    }

    /// True once every subtitle has a committed draft.
    pub fn all_sections_drafted(&self) -> bool {
        self.draft_cursor == self.collected.subtitles().len()
    }

    /// Marks the current stage's question as emitted.
    pub fn mark_prompted(&mut self) {
        self.prompted = true;
    }

    /// Appends a user message to the transcript.
    pub fn record_user(&mut self, text: impl Into<String>) {
        self.transcript.record(Speaker::User, text);
    }

    /// Appends an assistant message to the transcript.
    pub fn record_assistant(&mut self, text: impl Into<String>) {
        self.transcript.record(Speaker::Assistant, text);
    }

    /// Holds a candidate value and starts waiting for confirmation.
    pub fn begin_confirmation(&mut self, candidate: Candidate) {
        tracing::debug!(
            session_id = %self.id,
            stage = ?self.stage,
            kind = candidate.kind(),
            "holding candidate for confirmation"
        );
        self.candidate = Some(candidate);
        self.pending_confirmation = true;
    }

    /// Drops the held candidate after a rejection.
    pub fn discard_candidate(&mut self) {
        self.candidate = None;
        self.pending_confirmation = false;
    }

    /// Commits the held candidate into the collected values.
    ///
    /// Section drafts additionally advance the draft cursor. The candidate
    /// slot and the pending flag are cleared.
    ///
    /// # Errors
    ///
    /// - `CandidateMissing` if no candidate is held
    /// - `DraftCursorOutOfBounds` if a section draft is committed past the
    ///   last subtitle
    pub fn commit_candidate(&mut self) -> Result<(), DomainError> {
        let candidate = self.candidate.take().ok_or(DomainError::CandidateMissing)?;
        self.pending_confirmation = false;

        match candidate {
            Candidate::Topic(topic) => self.collected.set_topic(topic),
            Candidate::Keywords(keywords) => self.collected.set_keywords(keywords),
            Candidate::Style(style) => self.collected.set_style(style),
            Candidate::Structure(structure) => self.collected.set_structure(structure),
            Candidate::Subtitles(subtitles) => self.collected.set_subtitles(subtitles),
            Candidate::SectionDraft { title, body } => {
                let count = self.collected.subtitles().len();
                if self.draft_cursor >= count {
                    return Err(DomainError::DraftCursorOutOfBounds {
                        cursor: self.draft_cursor,
                        count,
                    });
                }
                self.section_drafts.insert(title, body);
                self.draft_cursor += 1;
            }
        }
        Ok(())
    }

    /// Moves to the next stage through the transition table and resets the
    /// prompted flag so the new stage's question can be emitted.
    pub fn advance_stage(&mut self, target: Stage) -> Result<(), DomainError> {
        let next = self.stage.transition_to(target)?;
        tracing::debug!(
            session_id = %self.id,
            from = ?self.stage,
            to = ?next,
            "stage transition"
        );
        self.stage = next;
        self.prompted = false;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::StyleProfile;

    fn session_with_subtitles(subtitles: &[&str]) -> Session {
        let mut session = Session::new();
        session.begin_confirmation(Candidate::Topic("T".into()));
        session.commit_candidate().unwrap();
        session.advance_stage(Stage::Keywords).unwrap();
        session.begin_confirmation(Candidate::Keywords(vec!["k".into()]));
        session.commit_candidate().unwrap();
        session.advance_stage(Stage::Style).unwrap();
        session.begin_confirmation(Candidate::Style(StyleProfile::default()));
        session.commit_candidate().unwrap();
        session.advance_stage(Stage::Structure).unwrap();
        session.begin_confirmation(Candidate::Structure(
            subtitles.iter().map(|s| s.to_string()).collect(),
        ));
        session.commit_candidate().unwrap();
        session.advance_stage(Stage::Subtitles).unwrap();
        session.begin_confirmation(Candidate::Subtitles(
            subtitles.iter().map(|s| s.to_string()).collect(),
        ));
        session.commit_candidate().unwrap();
        session.advance_stage(Stage::SectionDraft(0)).unwrap();
        session
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn new_session_starts_at_topic_with_nothing_pending() {
            let session = Session::new();
            assert_eq!(session.stage(), Stage::Topic);
            assert!(!session.is_pending_confirmation());
            assert!(!session.is_prompted());
            assert!(session.candidate().is_none());
            assert_eq!(session.draft_cursor(), 0);
            assert!(session.transcript().is_empty());
        }

        #[test]
        fn two_sessions_have_distinct_ids() {
            assert_ne!(Session::new().id(), Session::new().id());
        }
    }

    mod confirmation {
        use super::*;

        #[test]
        fn begin_then_commit_writes_collected_value() {
            let mut session = Session::new();
            session.begin_confirmation(Candidate::Topic("Docker 입문".into()));
            assert!(session.is_pending_confirmation());

            session.commit_candidate().unwrap();
            assert!(!session.is_pending_confirmation());
            assert!(session.candidate().is_none());
            assert_eq!(session.collected().topic(), "Docker 입문");
        }

        #[test]
        fn commit_without_candidate_fails() {
            let mut session = Session::new();
            assert_eq!(
                session.commit_candidate(),
                Err(DomainError::CandidateMissing)
            );
        }

        #[test]
        fn discard_clears_candidate_and_pending_flag() {
            let mut session = Session::new();
            session.begin_confirmation(Candidate::Topic("t".into()));
            session.discard_candidate();
            assert!(!session.is_pending_confirmation());
            assert!(session.candidate().is_none());
            // Nothing was committed.
            assert_eq!(session.collected().topic(), "");
        }
    }

    mod stage_movement {
        use super::*;

        #[test]
        fn advance_stage_resets_prompted_flag() {
            let mut session = Session::new();
            session.mark_prompted();
            session.advance_stage(Stage::Keywords).unwrap();
            assert_eq!(session.stage(), Stage::Keywords);
            assert!(!session.is_prompted());
        }

        #[test]
        fn advance_stage_rejects_skips() {
            let mut session = Session::new();
            let result = session.advance_stage(Stage::Structure);
            assert!(matches!(
                result,
                Err(DomainError::InvalidStageTransition { .. })
            ));
            assert_eq!(session.stage(), Stage::Topic);
        }
    }

    mod drafting {
        use super::*;

        #[test]
        fn committing_a_section_draft_advances_the_cursor() {
            let mut session = session_with_subtitles(&["A", "B"]);
            assert_eq!(session.current_subtitle(), Some("A"));

            session.begin_confirmation(Candidate::SectionDraft {
                title: "A".into(),
                body: "x".into(),
            });
            session.commit_candidate().unwrap();

            assert_eq!(session.draft_cursor(), 1);
            assert_eq!(session.current_subtitle(), Some("B"));
            assert_eq!(session.section_drafts().get("A").map(String::as_str), Some("x"));
            assert!(!session.all_sections_drafted());
        }

        #[test]
        fn all_sections_drafted_after_last_commit() {
            let mut session = session_with_subtitles(&["A"]);
            session.begin_confirmation(Candidate::SectionDraft {
                title: "A".into(),
                body: "x".into(),
            });
            session.commit_candidate().unwrap();
            assert!(session.all_sections_drafted());
            assert_eq!(session.current_subtitle(), None);
        }

        #[test]
        fn section_commit_past_the_end_is_rejected() {
            let mut session = session_with_subtitles(&["A"]);
            session.begin_confirmation(Candidate::SectionDraft {
                title: "A".into(),
                body: "x".into(),
            });
            session.commit_candidate().unwrap();

            session.begin_confirmation(Candidate::SectionDraft {
                title: "B".into(),
                body: "y".into(),
            });
            assert_eq!(
                session.commit_candidate(),
                Err(DomainError::DraftCursorOutOfBounds { cursor: 1, count: 1 })
            );
        }
    }

    mod transcript_recording {
        use super::*;

        #[test]
        fn records_both_speakers_in_order() {
            let mut session = Session::new();
            session.record_assistant("질문");
            session.record_user("답변");
            let entries = session.transcript().entries();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].speaker(), Speaker::Assistant);
            assert_eq!(entries[1].speaker(), Speaker::User);
        }
    }
}
