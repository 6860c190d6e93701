//! Conversation stages and their transition table.
//!
//! The pipeline is a fixed forward chain: Topic → Keywords → Style →
//! Structure → Subtitles → SectionDraft(0) → … → SectionDraft(n-1) → Done.
//! Stages never move backwards and never skip; a rejected confirmation stays
//! on the same stage with its candidate cleared.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// One named step in the fixed conversation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting the blog topic.
    Topic,

    /// Collecting the keyword list (question includes generated suggestions).
    Keywords,

    /// Collecting the style profile (format, tone, audience).
    Style,

    /// Confirming a generated structure proposal.
    Structure,

    /// Confirming a generated subtitle proposal.
    Subtitles,

    /// Drafting and confirming the section at this subtitle index.
    SectionDraft(usize),

    /// Terminal stage: document assembled, only replay/restart commands.
    Done,
}

impl Stage {
    /// Returns a short Korean label, suitable for progress display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Topic => "주제 입력",
            Self::Keywords => "키워드 선택",
            Self::Style => "스타일 설정",
            Self::Structure => "구조 제안",
            Self::Subtitles => "소제목 구성",
            Self::SectionDraft(_) => "초안 작성",
            Self::Done => "완료",
        }
    }

    /// True for stages whose question is answered directly by the user.
    pub fn is_question_stage(&self) -> bool {
        matches!(self, Self::Topic | Self::Keywords | Self::Style)
    }

    /// True for stages that open with a generated proposal held for
    /// confirmation instead of a plain question.
    pub fn is_suggest_stage(&self) -> bool {
        matches!(self, Self::Structure | Self::Subtitles)
    }

    /// True while a section draft is being produced or confirmed.
    pub fn is_drafting(&self) -> bool {
        matches!(self, Self::SectionDraft(_))
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        match (self, target) {
            (Self::Topic, Self::Keywords) => true,
            (Self::Keywords, Self::Style) => true,
            (Self::Style, Self::Structure) => true,
            (Self::Structure, Self::Subtitles) => true,
            (Self::Subtitles, Self::SectionDraft(0)) => true,
            (Self::SectionDraft(i), Self::SectionDraft(j)) => *j == i + 1,
            (Self::SectionDraft(_), Self::Done) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Topic => vec![Self::Keywords],
            Self::Keywords => vec![Self::Style],
            Self::Style => vec![Self::Structure],
            Self::Structure => vec![Self::Subtitles],
            Self::Subtitles => vec![Self::SectionDraft(0)],
            Self::SectionDraft(i) => vec![Self::SectionDraft(i + 1), Self::Done],
            Self::Done => vec![],
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stage_basics {
        use super::*;

        #[test]
        fn default_stage_is_topic() {
            assert_eq!(Stage::default(), Stage::Topic);
        }

        #[test]
        fn all_stages_have_labels() {
            for stage in [
                Stage::Topic,
                Stage::Keywords,
                Stage::Style,
                Stage::Structure,
                Stage::Subtitles,
                Stage::SectionDraft(0),
                Stage::Done,
            ] {
                assert!(!stage.label().is_empty());
            }
        }

        #[test]
        fn question_and_suggest_stages_are_disjoint() {
            for stage in [Stage::Topic, Stage::Keywords, Stage::Style] {
                assert!(stage.is_question_stage());
                assert!(!stage.is_suggest_stage());
            }
            for stage in [Stage::Structure, Stage::Subtitles] {
                assert!(stage.is_suggest_stage());
                assert!(!stage.is_question_stage());
            }
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&Stage::Keywords).unwrap();
            assert_eq!(json, "\"keywords\"");
        }

        #[test]
        fn section_draft_round_trips_through_serde() {
            let json = serde_json::to_string(&Stage::SectionDraft(2)).unwrap();
            let back: Stage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, Stage::SectionDraft(2));
        }
    }

    mod stage_transitions {
        use super::*;

        #[test]
        fn front_stages_chain_forward() {
            assert!(Stage::Topic.can_transition_to(&Stage::Keywords));
            assert!(Stage::Keywords.can_transition_to(&Stage::Style));
            assert!(Stage::Style.can_transition_to(&Stage::Structure));
            assert!(Stage::Structure.can_transition_to(&Stage::Subtitles));
            assert!(Stage::Subtitles.can_transition_to(&Stage::SectionDraft(0)));
        }

        #[test]
        fn stages_never_skip_forward() {
            assert!(!Stage::Topic.can_transition_to(&Stage::Style));
            assert!(!Stage::Keywords.can_transition_to(&Stage::Structure));
            assert!(!Stage::Style.can_transition_to(&Stage::Subtitles));
            assert!(!Stage::Structure.can_transition_to(&Stage::SectionDraft(0)));
            assert!(!Stage::Topic.can_transition_to(&Stage::Done));
        }

        #[test]
        fn stages_never_move_backward() {
            assert!(!Stage::Keywords.can_transition_to(&Stage::Topic));
            assert!(!Stage::Done.can_transition_to(&Stage::SectionDraft(0)));
            assert!(!Stage::SectionDraft(1).can_transition_to(&Stage::SectionDraft(0)));
        }

        #[test]
        fn section_drafts_advance_one_at_a_time() {
            assert!(Stage::SectionDraft(0).can_transition_to(&Stage::SectionDraft(1)));
            assert!(Stage::SectionDraft(4).can_transition_to(&Stage::SectionDraft(5)));
            assert!(!Stage::SectionDraft(0).can_transition_to(&Stage::SectionDraft(2)));
        }

        #[test]
        fn any_section_draft_can_finish() {
            assert!(Stage::SectionDraft(0).can_transition_to(&Stage::Done));
            assert!(Stage::SectionDraft(7).can_transition_to(&Stage::Done));
        }

        #[test]
        fn subtitles_only_enter_the_first_section() {
            assert!(!Stage::Subtitles.can_transition_to(&Stage::SectionDraft(1)));
        }

        #[test]
        fn done_is_terminal() {
            assert!(Stage::Done.is_terminal());
            assert!(!Stage::Subtitles.is_terminal());
        }

        #[test]
        fn transition_to_rejects_invalid_moves() {
            let result = Stage::Topic.transition_to(Stage::Subtitles);
            assert!(result.is_err());
        }
    }
}
