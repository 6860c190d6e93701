//! Step Controller - the confirmation-gated conversation loop.
//!
//! `advance` takes the session and one piece of user input and decides what
//! state transition occurs and what the assistant says next. An empty input
//! re-enters the current stage; this is how stages that need no user input
//! chain automatically (drafting the next section right after the previous
//! one is confirmed, and assembling the document after the last).
//!
//! Auto-chaining runs to completion inside a single `advance` call, so one
//! interaction always returns one finished `ControllerAction`. The only
//! suspension point is the text generation call; a failed call is shown to
//! the user verbatim and changes nothing, so the next input is still
//! interpreted against the stage that was being attempted.

use std::sync::Arc;

use crate::domain::drafting::{assemble, prompts};
use crate::domain::foundation::DomainError;
use crate::domain::intent::{classify, Intent};
use crate::domain::session::{parse_item_list, Candidate, Session, Stage, StyleProfile};
use crate::ports::{GenerationError, TextGenerator};

use super::messages;

/// Commands accepted in the Done stage, matched as substrings of the
/// lowercased input.
const SHOW_DRAFT_COMMANDS: &[&str] = &["전체 초안", "전체초안", "초안 보여", "full draft"];
const RESTART_COMMANDS: &[&str] = &["다시 시작", "다시시작", "초기화", "restart"];

/// The outcome of one `advance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    /// Assistant messages were produced; the conversation continues.
    Respond { messages: Vec<String> },

    /// The last section was committed and the document assembled; the
    /// session is now in the Done stage.
    Completed {
        document: String,
        messages: Vec<String>,
    },

    /// The user asked to restart; the caller discards this session.
    Restarted,
}

/// What a single stage handler decided.
enum StepOutcome {
    /// Wait for the next user input.
    Wait,
    /// Re-enter the controller immediately with empty input.
    Chain,
    /// Document assembled; conversation complete.
    Finished(String),
    /// Restart requested from the Done stage.
    Restart,
}

/// Drives the linear step pipeline over a text generation collaborator.
pub struct StepController {
    generator: Arc<dyn TextGenerator>,
}

impl StepController {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Processes one user interaction, including any auto-chained stages.
    ///
    /// # Errors
    ///
    /// `DomainError` signals a violated controller invariant (a bug), never
    /// bad user input; generation failures are returned as assistant
    /// messages instead.
    pub async fn advance(
        &self,
        session: &mut Session,
        user_text: &str,
    ) -> Result<ControllerAction, DomainError> {
        let mut input = user_text.trim().to_string();
        if !input.is_empty() {
            session.record_user(input.clone());
        }

        let mut replies = Vec::new();
        loop {
            match self.step(session, &input, &mut replies).await? {
                StepOutcome::Chain => input.clear(),
                StepOutcome::Wait => {
                    return Ok(ControllerAction::Respond { messages: replies });
                }
                StepOutcome::Finished(document) => {
                    return Ok(ControllerAction::Completed {
                        document,
                        messages: replies,
                    });
                }
                StepOutcome::Restart => return Ok(ControllerAction::Restarted),
            }
        }
    }

    async fn step(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        match session.stage() {
            Stage::Topic => self.topic_stage(session, input, replies),
            Stage::Keywords => self.keywords_stage(session, input, replies).await,
            Stage::Style => self.style_stage(session, input, replies),
            Stage::Structure => self.structure_stage(session, input, replies).await,
            Stage::Subtitles => self.subtitles_stage(session, input, replies).await,
            Stage::SectionDraft(index) => self.section_stage(session, index, input, replies).await,
            Stage::Done => Ok(self.done_stage(session, input, replies)),
        }
    }

    fn topic_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return match classify(input) {
                Intent::Affirm => {
                    session.commit_candidate()?;
                    session.advance_stage(Stage::Keywords)?;
                    say(session, replies, messages::KEYWORD_ACK);
                    Ok(StepOutcome::Chain)
                }
                Intent::Reject => {
                    session.discard_candidate();
                    say(session, replies, messages::TOPIC_REASK);
                    session.mark_prompted();
                    Ok(StepOutcome::Wait)
                }
                Intent::Ambiguous => {
                    say(session, replies, messages::CLARIFY_NUDGE);
                    Ok(StepOutcome::Wait)
                }
            };
        }

        if input.is_empty() {
            if !session.is_prompted() {
                say(session, replies, messages::TOPIC_QUESTION);
                session.mark_prompted();
            }
            return Ok(StepOutcome::Wait);
        }

        say(session, replies, messages::topic_confirm(input));
        session.begin_confirmation(Candidate::Topic(input.to_string()));
        Ok(StepOutcome::Wait)
    }

    async fn keywords_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return match classify(input) {
                Intent::Affirm => {
                    session.commit_candidate()?;
                    session.advance_stage(Stage::Style)?;
                    Ok(StepOutcome::Chain)
                }
                Intent::Reject => {
                    session.discard_candidate();
                    say(session, replies, messages::KEYWORD_REASK);
                    session.mark_prompted();
                    Ok(StepOutcome::Wait)
                }
                Intent::Ambiguous => {
                    say(session, replies, messages::CLARIFY_NUDGE);
                    Ok(StepOutcome::Wait)
                }
            };
        }

        if input.is_empty() {
            if !session.is_prompted() {
                let topic = session.collected().topic().to_string();
                match self.generate(prompts::keyword_suggestion(&topic)).await {
                    Ok(text) => {
                        let suggestions = parse_item_list(&text);
                        say(session, replies, messages::keyword_question(&topic, &suggestions));
                        session.mark_prompted();
                    }
                    Err(err) => say(session, replies, err.to_string()),
                }
            }
            return Ok(StepOutcome::Wait);
        }

        let keywords = parse_item_list(input);
        say(session, replies, messages::keyword_confirm(&keywords.join(", ")));
        session.begin_confirmation(Candidate::Keywords(keywords));
        Ok(StepOutcome::Wait)
    }

    fn style_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return match classify(input) {
                Intent::Affirm => {
                    session.commit_candidate()?;
                    session.advance_stage(Stage::Structure)?;
                    say(session, replies, messages::STRUCTURE_ACK);
                    Ok(StepOutcome::Chain)
                }
                Intent::Reject => {
                    session.discard_candidate();
                    say(session, replies, messages::STYLE_REASK);
                    session.mark_prompted();
                    Ok(StepOutcome::Wait)
                }
                Intent::Ambiguous => {
                    say(session, replies, messages::CLARIFY_NUDGE);
                    Ok(StepOutcome::Wait)
                }
            };
        }

        if input.is_empty() {
            if !session.is_prompted() {
                say(session, replies, messages::STYLE_QUESTION);
                session.mark_prompted();
            }
            return Ok(StepOutcome::Wait);
        }

        let style = StyleProfile::parse(input);
        say(session, replies, messages::style_confirm(&style));
        session.begin_confirmation(Candidate::Style(style));
        Ok(StepOutcome::Wait)
    }

    async fn structure_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return match classify(input) {
                Intent::Affirm => {
                    session.commit_candidate()?;
                    session.advance_stage(Stage::Subtitles)?;
                    say(session, replies, messages::SUBTITLE_ACK);
                    Ok(StepOutcome::Chain)
                }
                Intent::Reject => {
                    session.discard_candidate();
                    say(session, replies, messages::STRUCTURE_REASK);
                    session.mark_prompted();
                    Ok(StepOutcome::Wait)
                }
                Intent::Ambiguous => {
                    say(session, replies, messages::CLARIFY_NUDGE);
                    Ok(StepOutcome::Wait)
                }
            };
        }

        if input.is_empty() {
            if !session.is_prompted() {
                let topic = session.collected().topic().to_string();
                let keywords = session.collected().keywords_joined();
                let style = session.collected().style();
                match self
                    .generate(prompts::structure_suggestion(&topic, &keywords, &style))
                    .await
                {
                    Ok(text) => {
                        let titles = parse_item_list(&text);
                        say(session, replies, messages::structure_proposal(&titles));
                        session.mark_prompted();
                        session.begin_confirmation(Candidate::Structure(titles));
                    }
                    Err(err) => say(session, replies, err.to_string()),
                }
            }
            return Ok(StepOutcome::Wait);
        }

        // A user-authored structure, after the proposal was rejected.
        let titles = parse_item_list(input);
        say(session, replies, messages::structure_proposal(&titles));
        session.begin_confirmation(Candidate::Structure(titles));
        Ok(StepOutcome::Wait)
    }

    async fn subtitles_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return match classify(input) {
                Intent::Affirm => {
                    session.commit_candidate()?;
                    session.advance_stage(Stage::SectionDraft(0))?;
                    say(session, replies, messages::DRAFT_ACK);
                    Ok(StepOutcome::Chain)
                }
                Intent::Reject => {
                    session.discard_candidate();
                    say(session, replies, messages::SUBTITLE_REASK);
                    session.mark_prompted();
                    Ok(StepOutcome::Wait)
                }
                Intent::Ambiguous => {
                    say(session, replies, messages::CLARIFY_NUDGE);
                    Ok(StepOutcome::Wait)
                }
            };
        }

        if input.is_empty() {
            if !session.is_prompted() {
                let topic = session.collected().topic().to_string();
                let structure = session.collected().structure().to_vec();
                match self
                    .generate(prompts::subtitle_suggestion(&topic, &structure))
                    .await
                {
                    Ok(text) => {
                        let titles = parse_item_list(&text);
                        say(session, replies, messages::subtitle_proposal(&titles));
                        session.mark_prompted();
                        session.begin_confirmation(Candidate::Subtitles(titles));
                    }
                    Err(err) => say(session, replies, err.to_string()),
                }
            }
            return Ok(StepOutcome::Wait);
        }

        // User-authored subtitles, after the proposal was rejected.
        let titles = parse_item_list(input);
        say(session, replies, messages::subtitle_proposal(&titles));
        session.begin_confirmation(Candidate::Subtitles(titles));
        Ok(StepOutcome::Wait)
    }

    async fn section_stage(
        &self,
        session: &mut Session,
        index: usize,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        if session.is_pending_confirmation() {
            return self.section_confirm(session, index, input, replies).await;
        }

        // Entry via auto-chain, or a retry after a failed generation.
        let Some(title) = session.current_subtitle().map(str::to_string) else {
            return Err(DomainError::DraftCursorOutOfBounds {
                cursor: session.draft_cursor(),
                count: session.collected().subtitles().len(),
            });
        };
        let total = session.collected().subtitles().len();
        let topic = session.collected().topic().to_string();
        let keywords = session.collected().keywords_joined();
        let style = session.collected().style();
        let previous = prompts::previous_sections(
            session.collected().subtitles(),
            session.section_drafts(),
            index,
        );

        match self
            .generate(prompts::section(
                index, total, &title, &topic, &keywords, &style, &previous,
            ))
            .await
        {
            Ok(body) => {
                say(session, replies, messages::section_draft(&title, &body));
                session.begin_confirmation(Candidate::SectionDraft { title, body });
            }
            Err(err) => say(session, replies, err.to_string()),
        }
        Ok(StepOutcome::Wait)
    }

    async fn section_confirm(
        &self,
        session: &mut Session,
        index: usize,
        input: &str,
        replies: &mut Vec<String>,
    ) -> Result<StepOutcome, DomainError> {
        match classify(input) {
            Intent::Affirm => {
                session.commit_candidate()?;
                if session.all_sections_drafted() {
                    session.advance_stage(Stage::Done)?;
                    let document = {
                        let collected = session.collected();
                        assemble(
                            collected.topic(),
                            collected.subtitles(),
                            session.section_drafts(),
                        )
                    };
                    say(session, replies, messages::completed(&document));
                    Ok(StepOutcome::Finished(document))
                } else {
                    let next = session.draft_cursor();
                    session.advance_stage(Stage::SectionDraft(next))?;
                    Ok(StepOutcome::Chain)
                }
            }
            Intent::Reject => {
                // The rejection text is a revision instruction.
                let Some(Candidate::SectionDraft { title, body }) = session.candidate().cloned()
                else {
                    return Err(DomainError::CandidateMissing);
                };
                let topic = session.collected().topic().to_string();
                let keywords = session.collected().keywords_joined();
                let style = session.collected().style();
                let previous = prompts::previous_sections(
                    session.collected().subtitles(),
                    session.section_drafts(),
                    index,
                );

                match self
                    .generate(prompts::revision(
                        &title, input, &body, &previous, &topic, &keywords, &style,
                    ))
                    .await
                {
                    Ok(new_body) => {
                        say(session, replies, messages::section_revised(&new_body));
                        session.begin_confirmation(Candidate::SectionDraft {
                            title,
                            body: new_body,
                        });
                    }
                    // The previous candidate stays; the user can try again.
                    Err(err) => say(session, replies, err.to_string()),
                }
                Ok(StepOutcome::Wait)
            }
            Intent::Ambiguous => {
                say(session, replies, messages::CLARIFY_NUDGE);
                Ok(StepOutcome::Wait)
            }
        }
    }

    fn done_stage(
        &self,
        session: &mut Session,
        input: &str,
        replies: &mut Vec<String>,
    ) -> StepOutcome {
        if input.is_empty() {
            return StepOutcome::Wait;
        }

        let lowered = input.to_lowercase();
        if SHOW_DRAFT_COMMANDS.iter().any(|cmd| lowered.contains(cmd)) {
            let document = {
                let collected = session.collected();
                assemble(
                    collected.topic(),
                    collected.subtitles(),
                    session.section_drafts(),
                )
            };
            say(session, replies, document);
            return StepOutcome::Wait;
        }
        if RESTART_COMMANDS.iter().any(|cmd| lowered.contains(cmd)) {
            tracing::info!(session_id = %session.id(), "session restart requested");
            return StepOutcome::Restart;
        }

        say(session, replies, messages::DONE_HELP);
        StepOutcome::Wait
    }

    /// Sends a prompt to the generation service with the system prompt
    /// prepended. Output is trimmed; failures are logged and returned for
    /// the caller to surface verbatim.
    async fn generate(&self, prompt: String) -> Result<String, GenerationError> {
        match self
            .generator
            .generate(&prompts::with_system_prompt(&prompt))
            .await
        {
            Ok(text) => Ok(text.trim().to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "generation call failed");
                Err(err)
            }
        }
    }
}

/// Emits one assistant message: appended to the transcript and to the
/// replies returned from this interaction.
fn say(session: &mut Session, replies: &mut Vec<String>, text: impl Into<String>) {
    let text = text.into();
    session.record_assistant(text.clone());
    replies.push(text);
}
