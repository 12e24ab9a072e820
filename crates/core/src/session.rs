//! Interview session state.
//!
//! An [`InterviewSession`] owns the full per-interview state: topic
//! progression, the per-topic conversation logs, the completion flag, and the
//! final evaluation once one is produced. All mutation goes through methods
//! that uphold the session invariants; callers never touch the fields
//! directly.

use crate::catalog::{self, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Interviewer,
    Candidate,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::Interviewer => write!(f, "interviewer"),
            TurnRole::Candidate => write!(f, "candidate"),
        }
    }
}

/// Structured feedback attached to the interviewer turn that closes a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFeedback {
    pub understanding: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
}

/// A single utterance in a topic's conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub feedback: Option<TopicFeedback>,
}

impl Turn {
    fn new(role: TurnRole, content: String, feedback: Option<TopicFeedback>) -> Self {
        Self {
            role,
            content,
            timestamp: Utc::now(),
            feedback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no topic is currently active")]
    NoActiveTopic,
    #[error("a topic is already active: '{0}'")]
    TopicAlreadyActive(String),
    #[error("topic '{0}' was already completed")]
    TopicAlreadyCompleted(String),
    #[error("the interview is already complete")]
    InterviewComplete,
    #[error("the interview is not complete yet")]
    InterviewNotComplete,
    #[error("a final evaluation was already recorded")]
    FinalFeedbackAlreadySet,
    #[error("completion score {0} is outside the 1-5 range")]
    ScoreOutOfRange(u8),
}

/// State for one interview. One session serves exactly one candidate; the
/// caller is responsible for not sharing it across concurrent interviews.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    position: Position,
    current_topic: Option<String>,
    conversations: HashMap<String, Vec<Turn>>,
    completed_topics: Vec<String>,
    recorded_scores: Vec<u8>,
    interview_complete: bool,
    final_feedback: Option<String>,
}

impl InterviewSession {
    /// Creates a fresh session for a position. The position is fixed for the
    /// lifetime of the session.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            current_topic: None,
            conversations: HashMap::new(),
            completed_topics: Vec::new(),
            recorded_scores: Vec::new(),
            interview_complete: false,
            final_feedback: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    pub fn completed_topics(&self) -> &[String] {
        &self.completed_topics
    }

    pub fn recorded_scores(&self) -> &[u8] {
        &self.recorded_scores
    }

    pub fn is_complete(&self) -> bool {
        self.interview_complete
    }

    pub fn final_feedback(&self) -> Option<&str> {
        self.final_feedback.as_deref()
    }

    /// Activates a topic. The topic must not be active already and must not
    /// have been completed before.
    pub fn begin_topic(&mut self, topic: &str) -> Result<(), SessionError> {
        if self.interview_complete {
            return Err(SessionError::InterviewComplete);
        }
        if let Some(active) = &self.current_topic {
            return Err(SessionError::TopicAlreadyActive(active.clone()));
        }
        if self.completed_topics.iter().any(|t| t == topic) {
            return Err(SessionError::TopicAlreadyCompleted(topic.to_string()));
        }
        self.current_topic = Some(topic.to_string());
        Ok(())
    }

    /// Appends a turn to the active topic's conversation.
    ///
    /// Rejects the call when no topic is active: misfiling a turn under a
    /// phantom topic would corrupt the log silently.
    pub fn add_message(
        &mut self,
        role: TurnRole,
        content: impl Into<String>,
        feedback: Option<TopicFeedback>,
    ) -> Result<(), SessionError> {
        if self.interview_complete {
            return Err(SessionError::InterviewComplete);
        }
        let topic = self
            .current_topic
            .clone()
            .ok_or(SessionError::NoActiveTopic)?;
        self.conversations
            .entry(topic)
            .or_default()
            .push(Turn::new(role, content.into(), feedback));
        Ok(())
    }

    /// Returns the active topic's turns in append order, or an empty slice
    /// when no topic is active or nothing has been said yet.
    pub fn get_current_conversation(&self) -> &[Turn] {
        self.current_topic
            .as_deref()
            .map(|topic| self.conversation_for(topic))
            .unwrap_or(&[])
    }

    /// Returns the recorded turns for any topic, active or completed.
    pub fn conversation_for(&self, topic: &str) -> &[Turn] {
        self.conversations
            .get(topic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Marks the active topic as completed and deactivates it. The topic's
    /// turns stay in the log. No-op when no topic is active.
    pub fn clear_current_conversation(&mut self) {
        if let Some(topic) = self.current_topic.take() {
            self.completed_topics.push(topic);
        }
    }

    /// Wipes the active topic's turns without completing it. Used when the
    /// candidate asks for a different question on the same topic.
    pub fn reset_current_conversation(&mut self) -> Result<(), SessionError> {
        let topic = self
            .current_topic
            .as_deref()
            .ok_or(SessionError::NoActiveTopic)?;
        if let Some(turns) = self.conversations.get_mut(topic) {
            turns.clear();
        }
        Ok(())
    }

    /// Every turn of every completed topic, in topic-completion order and
    /// chronological order within each topic. Turns of a still-active topic
    /// are not included.
    pub fn get_all_conversations(&self) -> Vec<&Turn> {
        self.completed_topics
            .iter()
            .flat_map(|topic| self.conversation_for(topic))
            .collect()
    }

    /// Catalog topics not yet completed, in catalog order. The active topic
    /// still counts as remaining until it is completed.
    pub fn get_remaining_topics(&self) -> Vec<&'static str> {
        catalog::topics(self.position)
            .iter()
            .copied()
            .filter(|topic| !self.completed_topics.iter().any(|t| t == topic))
            .collect()
    }

    /// Number of interviewer turns in the active conversation, i.e. how many
    /// questions have been asked on the current topic so far.
    pub fn interviewer_depth(&self) -> usize {
        self.get_current_conversation()
            .iter()
            .filter(|t| t.role == TurnRole::Interviewer)
            .count()
    }

    /// Number of candidate turns in the active conversation.
    pub fn candidate_turn_count(&self) -> usize {
        self.get_current_conversation()
            .iter()
            .filter(|t| t.role == TurnRole::Candidate)
            .count()
    }

    /// Whether a completed topic holds at least one non-empty candidate turn.
    pub fn has_candidate_answer(&self, topic: &str) -> bool {
        self.conversation_for(topic)
            .iter()
            .any(|t| t.role == TurnRole::Candidate && !t.content.trim().is_empty())
    }

    /// Records the completion score of an analyzed answer.
    pub fn record_score(&mut self, score: u8) -> Result<(), SessionError> {
        if !(1..=5).contains(&score) {
            return Err(SessionError::ScoreOutOfRange(score));
        }
        self.recorded_scores.push(score);
        Ok(())
    }

    /// Mean of all recorded completion scores, or `None` when nothing was
    /// scored yet.
    pub fn mean_score(&self) -> Option<f64> {
        if self.recorded_scores.is_empty() {
            return None;
        }
        let sum: u32 = self.recorded_scores.iter().map(|s| u32::from(*s)).sum();
        Some(f64::from(sum) / self.recorded_scores.len() as f64)
    }

    /// Marks the interview complete. Monotonic: there is no way back except
    /// [`reset`](Self::reset).
    pub fn complete_interview(&mut self) {
        self.interview_complete = true;
    }

    /// Stores the final evaluation. Allowed exactly once, and only after the
    /// interview is complete.
    pub fn set_final_feedback(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        if !self.interview_complete {
            return Err(SessionError::InterviewNotComplete);
        }
        if self.final_feedback.is_some() {
            return Err(SessionError::FinalFeedbackAlreadySet);
        }
        self.final_feedback = Some(text.into());
        Ok(())
    }

    /// Clears everything but the position, returning the session to its
    /// freshly-constructed state for a new interview in the same process.
    pub fn reset(&mut self) {
        self.current_topic = None;
        self.conversations.clear();
        self.completed_topics.clear();
        self.recorded_scores.clear();
        self.interview_complete = false;
        self.final_feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> InterviewSession {
        let mut session = InterviewSession::new(Position::Frontend);
        session
            .begin_topic("JavaScript and TypeScript fundamentals")
            .unwrap();
        session
    }

    #[test]
    fn test_add_message_preserves_order() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "test question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "test answer", None)
            .unwrap();

        let turns = session.get_current_conversation();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::Interviewer);
        assert_eq!(turns[0].content, "test question");
        assert_eq!(turns[1].role, TurnRole::Candidate);
        assert_eq!(turns[1].content, "test answer");
    }

    #[test]
    fn test_add_message_without_topic_is_rejected() {
        let mut session = InterviewSession::new(Position::Backend);
        let err = session
            .add_message(TurnRole::Interviewer, "lost question", None)
            .unwrap_err();
        assert_eq!(err, SessionError::NoActiveTopic);
        assert!(session.get_current_conversation().is_empty());
    }

    #[test]
    fn test_clear_current_conversation_completes_topic_once() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "test question", None)
            .unwrap();
        session.clear_current_conversation();

        assert_eq!(session.current_topic(), None);
        assert_eq!(
            session.completed_topics(),
            ["JavaScript and TypeScript fundamentals"]
        );
        assert!(session.get_current_conversation().is_empty());

        // With no active topic a second call must not duplicate anything.
        session.clear_current_conversation();
        assert_eq!(session.completed_topics().len(), 1);
    }

    #[test]
    fn test_begin_topic_rejects_completed_and_active_topics() {
        let mut session = session();
        assert_eq!(
            session.begin_topic("HTML, CSS, and web standards"),
            Err(SessionError::TopicAlreadyActive(
                "JavaScript and TypeScript fundamentals".to_string()
            ))
        );
        session.clear_current_conversation();
        assert_eq!(
            session.begin_topic("JavaScript and TypeScript fundamentals"),
            Err(SessionError::TopicAlreadyCompleted(
                "JavaScript and TypeScript fundamentals".to_string()
            ))
        );
    }

    #[test]
    fn test_get_remaining_topics_preserves_catalog_order() {
        let mut session = session();
        session.clear_current_conversation();

        let remaining = session.get_remaining_topics();
        assert!(!remaining.contains(&"JavaScript and TypeScript fundamentals"));
        assert_eq!(
            remaining.len(),
            crate::catalog::topics(Position::Frontend).len() - 1
        );
        assert_eq!(remaining[0], "React, Vue, and Angular frameworks");
    }

    #[test]
    fn test_get_all_conversations_in_completion_order() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "first question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "first answer", None)
            .unwrap();
        session.clear_current_conversation();

        session
            .begin_topic("React, Vue, and Angular frameworks")
            .unwrap();
        session
            .add_message(TurnRole::Interviewer, "second question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "second answer", None)
            .unwrap();
        session.clear_current_conversation();

        let all = session.get_all_conversations();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].content, "first question");
        assert_eq!(all[1].content, "first answer");
        assert_eq!(all[2].content, "second question");
        assert_eq!(all[3].content, "second answer");
    }

    #[test]
    fn test_all_conversations_exclude_active_topic() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "first question", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "first answer", None)
            .unwrap();
        session.clear_current_conversation();

        session
            .begin_topic("React, Vue, and Angular frameworks")
            .unwrap();
        session
            .add_message(TurnRole::Interviewer, "in-progress question", None)
            .unwrap();

        let all = session.get_all_conversations();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.content.starts_with("first")));
    }

    #[test]
    fn test_no_turns_after_completion() {
        let mut session = session();
        session.complete_interview();
        let err = session
            .add_message(TurnRole::Candidate, "late answer", None)
            .unwrap_err();
        assert_eq!(err, SessionError::InterviewComplete);
    }

    #[test]
    fn test_final_feedback_set_at_most_once_after_completion() {
        let mut session = session();
        assert_eq!(
            session.set_final_feedback("too early"),
            Err(SessionError::InterviewNotComplete)
        );

        session.complete_interview();
        session.set_final_feedback("final report").unwrap();
        assert_eq!(session.final_feedback(), Some("final report"));
        assert_eq!(
            session.set_final_feedback("again"),
            Err(SessionError::FinalFeedbackAlreadySet)
        );
    }

    #[test]
    fn test_reset_keeps_position() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "test question", None)
            .unwrap();
        session.record_score(4).unwrap();
        session.clear_current_conversation();
        session.complete_interview();
        session.set_final_feedback("report").unwrap();

        session.reset();

        assert_eq!(session.position(), Position::Frontend);
        assert_eq!(session.current_topic(), None);
        assert!(session.completed_topics().is_empty());
        assert!(session.recorded_scores().is_empty());
        assert!(!session.is_complete());
        assert_eq!(session.final_feedback(), None);
    }

    #[test]
    fn test_score_recording_and_mean() {
        let mut session = session();
        assert_eq!(session.mean_score(), None);
        assert_eq!(session.record_score(0), Err(SessionError::ScoreOutOfRange(0)));
        assert_eq!(session.record_score(6), Err(SessionError::ScoreOutOfRange(6)));

        session.record_score(4).unwrap();
        session.record_score(5).unwrap();
        assert_eq!(session.mean_score(), Some(4.5));
    }

    #[test]
    fn test_depth_and_candidate_counts() {
        let mut session = session();
        session
            .add_message(TurnRole::Interviewer, "q1", None)
            .unwrap();
        session
            .add_message(TurnRole::Candidate, "a1", None)
            .unwrap();
        session
            .add_message(TurnRole::Interviewer, "q2", None)
            .unwrap();

        assert_eq!(session.interviewer_depth(), 2);
        assert_eq!(session.candidate_turn_count(), 1);
    }
}
