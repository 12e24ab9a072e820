//! Dialogue control.
//!
//! The [`Interviewer`] drives a whole interview over a borrowed
//! [`InterviewSession`]: it opens topics in catalog order, routes each
//! candidate answer through the admission check and the classifier, closes
//! topics with structured feedback, and produces the final evaluation once
//! every topic is done. It owns no session state of its own; everything it
//! decides lands in the session it is handed.

use crate::catalog::Position;
use crate::classifier::{self, AnswerAction, AnswerClassifier};
use crate::evaluation;
use crate::limits::{self, Admission};
use crate::oracle::{CompletionClient, RetryPolicy, complete_with_retry};
use crate::prompts;
use crate::session::{InterviewSession, SessionError, TopicFeedback, Turn, TurnRole};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("no topic is currently active")]
    NoActiveTopic,
    #[error("the interview is already complete")]
    InterviewComplete,
    #[error("the interview is not complete yet")]
    NotComplete,
    #[error("the answer is empty")]
    EmptyAnswer,
    #[error("{0}")]
    Limit(String),
    #[error("{0}")]
    EndRejected(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result of opening the next topic.
#[derive(Debug, Clone)]
pub struct TopicStart {
    pub topic: String,
    pub question: String,
}

/// Result of handling one candidate answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub kind: AnswerAction,
    pub response: String,
    /// Present exactly when the topic was concluded by this answer.
    pub feedback: Option<TopicFeedback>,
    /// Non-rejecting notice, currently only the near-length warning.
    pub warning: Option<String>,
}

/// Governs whether an early end-interview request is validated.
#[derive(Debug, Clone, Copy)]
pub struct EndPolicy {
    pub validate: bool,
}

impl Default for EndPolicy {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Stateless interview conductor over a completion client.
pub struct Interviewer {
    client: Arc<dyn CompletionClient>,
    classifier: AnswerClassifier,
    retry: RetryPolicy,
}

impl Interviewer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_retry(client, RetryPolicy::default())
    }

    pub fn with_retry(client: Arc<dyn CompletionClient>, retry: RetryPolicy) -> Self {
        Self {
            classifier: AnswerClassifier::new(client.clone(), retry),
            client,
            retry,
        }
    }

    /// The first catalog topic not yet completed.
    pub fn next_topic(&self, session: &InterviewSession) -> Option<&'static str> {
        session.get_remaining_topics().first().copied()
    }

    /// Opens the next unclaimed topic with a generated first question, or
    /// marks the interview complete when the catalog is exhausted (returning
    /// `None`). Must be called between topics.
    pub async fn start_next_topic(
        &self,
        session: &mut InterviewSession,
    ) -> Result<Option<TopicStart>, InterviewError> {
        if session.is_complete() {
            return Err(InterviewError::InterviewComplete);
        }
        if let Some(active) = session.current_topic() {
            return Err(InterviewError::Session(SessionError::TopicAlreadyActive(
                active.to_string(),
            )));
        }

        let Some(topic) = self.next_topic(session).map(str::to_string) else {
            info!("topic catalog exhausted, marking interview complete");
            session.complete_interview();
            return Ok(None);
        };

        let prompt = prompts::opening_question(session.position(), &topic);
        let question = match complete_with_retry(self.client.as_ref(), &prompt, self.retry).await {
            Ok(question) => question,
            Err(err) => {
                warn!(%topic, error = %err, "opening question generation failed, using fallback");
                prompts::fallback_opening_question(&topic)
            }
        };

        session.begin_topic(&topic)?;
        session.add_message(TurnRole::Interviewer, question.clone(), None)?;
        info!(%topic, "topic started");
        Ok(Some(TopicStart { topic, question }))
    }

    /// Handles one candidate answer on the active topic.
    ///
    /// The admission check runs first; a rejection surfaces as
    /// [`InterviewError::Limit`] with the session untouched. Otherwise the
    /// answer is classified, recorded, and either followed up on or used to
    /// close the topic with structured feedback.
    pub async fn handle_answer(
        &self,
        session: &mut InterviewSession,
        answer: &str,
    ) -> Result<AnswerOutcome, InterviewError> {
        if session.is_complete() {
            return Err(InterviewError::InterviewComplete);
        }
        let Some(topic) = session.current_topic().map(str::to_string) else {
            return Err(InterviewError::NoActiveTopic);
        };
        if answer.trim().is_empty() {
            return Err(InterviewError::EmptyAnswer);
        }

        let warning = match limits::check_answer(session, answer) {
            Admission::Rejected { message } => return Err(InterviewError::Limit(message)),
            Admission::Allowed { warning } => warning,
        };

        // Classify against the history as it stood before this answer.
        let analysis = self
            .classifier
            .classify(
                session.position(),
                &topic,
                session.get_current_conversation(),
                answer,
            )
            .await;

        session.add_message(TurnRole::Candidate, answer, None)?;
        session.record_score(analysis.completion_score)?;

        match analysis.action {
            AnswerAction::FollowUp | AnswerAction::Hint => {
                session.add_message(TurnRole::Interviewer, analysis.next_response.clone(), None)?;
                Ok(AnswerOutcome {
                    kind: analysis.action,
                    response: analysis.next_response,
                    feedback: None,
                    warning,
                })
            }
            AnswerAction::Conclude => {
                let feedback = self
                    .topic_feedback(session.position(), &topic, session.get_current_conversation())
                    .await;
                session.add_message(
                    TurnRole::Interviewer,
                    analysis.next_response.clone(),
                    Some(feedback.clone()),
                )?;
                session.clear_current_conversation();
                info!(%topic, "topic concluded");
                Ok(AnswerOutcome {
                    kind: AnswerAction::Conclude,
                    response: analysis.next_response,
                    feedback: Some(feedback),
                    warning,
                })
            }
        }
    }

    /// Replaces the active topic's conversation with a single fresh question.
    pub async fn refresh_topic(
        &self,
        session: &mut InterviewSession,
    ) -> Result<String, InterviewError> {
        if session.is_complete() {
            return Err(InterviewError::InterviewComplete);
        }
        let Some(topic) = session.current_topic().map(str::to_string) else {
            return Err(InterviewError::NoActiveTopic);
        };

        let prompt = prompts::refresh_question(
            session.position(),
            &topic,
            &prompts::format_history(session.get_current_conversation()),
        );
        let question = match complete_with_retry(self.client.as_ref(), &prompt, self.retry).await {
            Ok(question) => question,
            Err(err) => {
                warn!(%topic, error = %err, "refresh question generation failed, using fallback");
                prompts::fallback_refresh_question(&topic)
            }
        };

        session.reset_current_conversation()?;
        session.add_message(TurnRole::Interviewer, question.clone(), None)?;
        info!(%topic, "topic conversation refreshed");
        Ok(question)
    }

    /// Completes the active topic as-is, keeping whatever partial
    /// conversation exists.
    pub fn skip_topic(&self, session: &mut InterviewSession) -> Result<(), InterviewError> {
        if session.is_complete() {
            return Err(InterviewError::InterviewComplete);
        }
        let Some(topic) = session.current_topic().map(str::to_string) else {
            return Err(InterviewError::NoActiveTopic);
        };
        session.clear_current_conversation();
        info!(%topic, "topic skipped");
        Ok(())
    }

    /// Ends the interview early at the candidate's request. With validation
    /// enabled the request is rejected (state unchanged) unless at least one
    /// topic is completed and every completed topic has a recorded answer.
    pub fn end_interview(
        &self,
        session: &mut InterviewSession,
        policy: EndPolicy,
    ) -> Result<(), InterviewError> {
        if session.is_complete() {
            return Err(InterviewError::InterviewComplete);
        }
        if policy.validate {
            if session.completed_topics().is_empty() {
                return Err(InterviewError::EndRejected(
                    "Complete at least one topic before ending the interview.".to_string(),
                ));
            }
            for topic in session.completed_topics() {
                if !session.has_candidate_answer(topic) {
                    return Err(InterviewError::EndRejected(format!(
                        "Topic '{topic}' has no recorded answer; answer or skip it before ending.",
                    )));
                }
            }
        }
        session.complete_interview();
        info!("interview ended at the candidate's request");
        Ok(())
    }

    /// Produces (and stores) the final evaluation. Idempotent: repeated calls
    /// return the stored text without touching the model again. With no
    /// recorded answers the fixed insufficient-data report is returned and
    /// the model is never consulted.
    pub async fn final_evaluation(
        &self,
        session: &mut InterviewSession,
    ) -> Result<String, InterviewError> {
        if !session.is_complete() {
            return Err(InterviewError::NotComplete);
        }
        if let Some(existing) = session.final_feedback() {
            return Ok(existing.to_string());
        }

        let report = {
            let turns = session.get_all_conversations();
            let has_answers = turns
                .iter()
                .any(|t| t.role == TurnRole::Candidate && !t.content.trim().is_empty());

            if !has_answers {
                prompts::INSUFFICIENT_DATA_EVALUATION.to_string()
            } else {
                let tone = evaluation::choose_tone(session);
                let prompt = prompts::final_evaluation(
                    session.position(),
                    session.completed_topics(),
                    &prompts::format_history(turns),
                    tone,
                );
                match complete_with_retry(self.client.as_ref(), &prompt, self.retry).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "final evaluation generation failed");
                        prompts::EVALUATION_UNAVAILABLE.to_string()
                    }
                }
            }
        };

        session.set_final_feedback(report.clone())?;
        Ok(report)
    }

    /// Per-topic feedback with the all-positive fallback; never fails.
    async fn topic_feedback(
        &self,
        position: Position,
        topic: &str,
        turns: &[Turn],
    ) -> TopicFeedback {
        let prompt = prompts::topic_feedback(position, topic, &prompts::format_history(turns));
        match complete_with_retry(self.client.as_ref(), &prompt, self.retry).await {
            Ok(raw) => match classifier::parse_topic_feedback(&raw) {
                Ok(feedback) => feedback,
                Err(err) => {
                    warn!(%topic, error = %err, "discarding malformed topic feedback");
                    classifier::fallback_feedback()
                }
            },
            Err(err) => {
                warn!(%topic, error = %err, "topic feedback generation failed");
                classifier::fallback_feedback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::ScriptedCompletionClient;

    const FEEDBACK_BLOCK: &str = "Understanding:\n\
                                  - Solid grasp overall\n\
                                  Strengths:\n\
                                  - Clear explanations\n\
                                  Improvements:\n\
                                  - More depth on internals\n\
                                  Suggestions:\n\
                                  - Read the database internals book";

    fn interviewer(client: Arc<ScriptedCompletionClient>) -> Interviewer {
        Interviewer::with_retry(client, RetryPolicy::immediate(1))
    }

    fn backend_session() -> InterviewSession {
        InterviewSession::new(Position::Backend)
    }

    #[tokio::test]
    async fn test_start_next_topic_opens_first_catalog_entry() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Which language do you reach for first, and why?",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();

        let start = interviewer
            .start_next_topic(&mut session)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(start.topic, "Primary programming language");
        assert_eq!(start.question, "Which language do you reach for first, and why?");
        assert_eq!(session.current_topic(), Some("Primary programming language"));
        assert_eq!(session.interviewer_depth(), 1);
    }

    #[tokio::test]
    async fn test_start_next_topic_falls_back_on_oracle_failure() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();

        let start = interviewer
            .start_next_topic(&mut session)
            .await
            .unwrap()
            .unwrap();
        assert!(start.question.contains("Primary programming language"));
        assert_eq!(session.interviewer_depth(), 1);
    }

    #[tokio::test]
    async fn test_catalog_exhaustion_completes_interview() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();
        for topic in crate::catalog::topics(Position::Backend) {
            session.begin_topic(topic).unwrap();
            session.clear_current_conversation();
        }

        let start = interviewer.start_next_topic(&mut session).await.unwrap();
        assert!(start.is_none());
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn test_follow_up_keeps_topic_active() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            "Action: FOLLOW_UP\nScore: 4\nResponse: How does it scale?\nFeedback: Good.",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let outcome = interviewer
            .handle_answer(&mut session, "A reasonable answer.")
            .await
            .unwrap();

        assert_eq!(outcome.kind, AnswerAction::FollowUp);
        assert_eq!(outcome.response, "How does it scale?");
        assert!(outcome.feedback.is_none());
        assert_eq!(session.current_topic(), Some("Primary programming language"));
        // question, answer, follow-up question
        assert_eq!(session.get_current_conversation().len(), 3);
        assert_eq!(session.recorded_scores(), [4]);
    }

    #[tokio::test]
    async fn test_conclude_closes_topic_with_feedback() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            "Action: CONCLUDE\nScore: 5\nResponse: Great, let's wrap up.\nFeedback: Excellent.",
            FEEDBACK_BLOCK,
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let outcome = interviewer
            .handle_answer(&mut session, "A strong answer.")
            .await
            .unwrap();

        assert_eq!(outcome.kind, AnswerAction::Conclude);
        let feedback = outcome.feedback.unwrap();
        assert_eq!(feedback.understanding, "Solid grasp overall");
        assert_eq!(session.current_topic(), None);
        assert_eq!(session.completed_topics(), ["Primary programming language"]);

        // The concluding turn carries the feedback.
        let turns = session.conversation_for("Primary programming language");
        assert!(turns.last().unwrap().feedback.is_some());
    }

    #[tokio::test]
    async fn test_weak_answer_is_cut_short() {
        // Example end-to-end: the model wants to follow up on a score-1
        // answer, but the weak-answer rule closes the topic instead.
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            "Action: FOLLOW_UP\nScore: 1\nResponse: Let me probe further.\nFeedback: Not there yet.",
            FEEDBACK_BLOCK,
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let outcome = interviewer
            .handle_answer(&mut session, "I don't know.")
            .await
            .unwrap();

        assert_eq!(outcome.kind, AnswerAction::Conclude);
        assert!(outcome.response.contains("Not there yet."));
        assert_eq!(session.completed_topics(), ["Primary programming language"]);
        assert_eq!(session.current_topic(), None);
    }

    #[tokio::test]
    async fn test_depth_bound_concludes_fourth_exchange() {
        let follow_up =
            "Action: FOLLOW_UP\nScore: 4\nResponse: And then?\nFeedback: Fine.";
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            follow_up,
            follow_up,
            follow_up, // depth 3 now; override fires regardless of this text
            FEEDBACK_BLOCK,
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        for _ in 0..2 {
            let outcome = interviewer
                .handle_answer(&mut session, "More detail.")
                .await
                .unwrap();
            assert_eq!(outcome.kind, AnswerAction::FollowUp);
        }
        assert_eq!(session.interviewer_depth(), 3);

        let outcome = interviewer
            .handle_answer(&mut session, "Even more detail.")
            .await
            .unwrap();
        assert_eq!(outcome.kind, AnswerAction::Conclude);
        assert_eq!(session.completed_topics().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_answer_leaves_state_unchanged() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
        ]));
        let interviewer = interviewer(client.clone());
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let too_long = "a".repeat(limits::MAX_ANSWER_LENGTH + 1);
        let err = interviewer
            .handle_answer(&mut session, &too_long)
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Limit(_)));
        assert_eq!(session.get_current_conversation().len(), 1);
        assert!(session.recorded_scores().is_empty());
        // Only the opening question hit the oracle.
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_answer_is_rejected() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let err = interviewer
            .handle_answer(&mut session, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::EmptyAnswer));
    }

    #[tokio::test]
    async fn test_answer_without_topic_is_rejected() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();

        let err = interviewer
            .handle_answer(&mut session, "answer into the void")
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::NoActiveTopic));
    }

    #[tokio::test]
    async fn test_refresh_resets_conversation_to_one_question() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            "Action: FOLLOW_UP\nScore: 4\nResponse: Tell me more.\nFeedback: Good.",
            "A completely different question?",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();
        interviewer
            .handle_answer(&mut session, "First answer.")
            .await
            .unwrap();
        assert_eq!(session.get_current_conversation().len(), 3);

        let question = interviewer.refresh_topic(&mut session).await.unwrap();
        assert_eq!(question, "A completely different question?");

        let turns = session.get_current_conversation();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::Interviewer);
        assert_eq!(turns[0].content, "A completely different question?");
    }

    #[tokio::test]
    async fn test_refresh_fallback_still_resets() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let question = interviewer.refresh_topic(&mut session).await.unwrap();
        assert!(question.contains("another angle"));
        assert_eq!(session.get_current_conversation().len(), 1);
    }

    #[tokio::test]
    async fn test_skip_completes_topic_with_partial_conversation() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        interviewer.skip_topic(&mut session).unwrap();
        assert_eq!(session.current_topic(), None);
        assert_eq!(session.completed_topics(), ["Primary programming language"]);
    }

    #[test]
    fn test_end_interview_validation() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();

        // Nothing completed yet.
        let err = interviewer
            .end_interview(&mut session, EndPolicy::default())
            .unwrap_err();
        assert!(matches!(err, InterviewError::EndRejected(_)));
        assert!(!session.is_complete());

        // A completed topic without any candidate answer also fails.
        session.begin_topic("Primary programming language").unwrap();
        session
            .add_message(TurnRole::Interviewer, "question", None)
            .unwrap();
        session.clear_current_conversation();
        let err = interviewer
            .end_interview(&mut session, EndPolicy::default())
            .unwrap_err();
        assert!(matches!(err, InterviewError::EndRejected(_)));

        // With validation disabled the same session may end.
        interviewer
            .end_interview(&mut session, EndPolicy { validate: false })
            .unwrap();
        assert!(session.is_complete());
    }

    #[test]
    fn test_end_interview_accepts_answered_topics() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();
        session.begin_topic("Primary programming language").unwrap();
        session
            .add_message(TurnRole::Interviewer, "question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "a real answer", None)
            .unwrap();
        session.clear_current_conversation();

        interviewer
            .end_interview(&mut session, EndPolicy::default())
            .unwrap();
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn test_final_evaluation_without_answers_never_calls_oracle() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "this text must never be served",
        ]));
        let interviewer = interviewer(client.clone());
        let mut session = backend_session();
        session.begin_topic("Primary programming language").unwrap();
        session
            .add_message(TurnRole::Interviewer, "question", None)
            .unwrap();
        session.clear_current_conversation();
        session.complete_interview();

        let report = interviewer.final_evaluation(&mut session).await.unwrap();
        assert_eq!(report, prompts::INSUFFICIENT_DATA_EVALUATION);
        assert_eq!(client.calls(), 0);
        assert_eq!(session.final_feedback(), Some(prompts::INSUFFICIENT_DATA_EVALUATION));
    }

    #[tokio::test]
    async fn test_final_evaluation_happens_once() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "A thorough evaluation.",
        ]));
        let interviewer = interviewer(client.clone());
        let mut session = backend_session();
        session.begin_topic("Primary programming language").unwrap();
        session
            .add_message(TurnRole::Interviewer, "question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "answer", None)
            .unwrap();
        session.clear_current_conversation();
        session.complete_interview();

        let first = interviewer.final_evaluation(&mut session).await.unwrap();
        assert_eq!(first, "A thorough evaluation.");
        let second = interviewer.final_evaluation(&mut session).await.unwrap();
        assert_eq!(second, "A thorough evaluation.");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_final_evaluation_failure_yields_fixed_message() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();
        session.begin_topic("Primary programming language").unwrap();
        session
            .add_message(TurnRole::Interviewer, "question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "answer", None)
            .unwrap();
        session.clear_current_conversation();
        session.complete_interview();

        let report = interviewer.final_evaluation(&mut session).await.unwrap();
        assert_eq!(report, prompts::EVALUATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_final_evaluation_requires_completion() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let interviewer = interviewer(client);
        let mut session = backend_session();

        let err = interviewer.final_evaluation(&mut session).await.unwrap_err();
        assert!(matches!(err, InterviewError::NotComplete));
    }

    #[tokio::test]
    async fn test_feedback_fallback_on_malformed_block() {
        let client = Arc::new(ScriptedCompletionClient::with_responses([
            "Opening question?",
            "Action: CONCLUDE\nScore: 4\nResponse: Wrapping up.\nFeedback: Fine.",
            "free-form prose that is not a feedback block",
        ]));
        let interviewer = interviewer(client);
        let mut session = backend_session();
        interviewer.start_next_topic(&mut session).await.unwrap();

        let outcome = interviewer
            .handle_answer(&mut session, "An answer.")
            .await
            .unwrap();
        let feedback = outcome.feedback.unwrap();
        assert_eq!(feedback, classifier::fallback_feedback());
    }
}
