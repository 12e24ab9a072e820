//! API Models
//!
//! Request and response payloads for the interview REST surface, annotated
//! for OpenAPI generation with `utoipa`.

use chrono::{DateTime, Utc};
use coach_core::classifier::AnswerAction;
use coach_core::session::{InterviewSession, TopicFeedback, Turn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateInterviewPayload {
    /// Position to interview for: frontend, backend, or fullstack.
    #[schema(example = "backend")]
    pub position: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AnswerPayload {
    #[schema(example = "I would start by profiling the slow queries.")]
    pub answer: String,
}

/// Mirror of the engine's structured topic feedback.
#[derive(Serialize, ToSchema)]
pub struct FeedbackBody {
    pub understanding: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<TopicFeedback> for FeedbackBody {
    fn from(feedback: TopicFeedback) -> Self {
        Self {
            understanding: feedback.understanding,
            strengths: feedback.strengths,
            improvements: feedback.improvements,
            suggestions: feedback.suggestions,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TurnBody {
    #[schema(example = "interviewer")]
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub feedback: Option<FeedbackBody>,
}

impl From<&Turn> for TurnBody {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.to_string(),
            content: turn.content.clone(),
            timestamp: turn.timestamp,
            feedback: turn.feedback.clone().map(FeedbackBody::from),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct InterviewCreatedResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(example = "backend")]
    pub position: String,
    pub topic: Option<String>,
    pub question: Option<String>,
    pub interview_complete: bool,
}

#[derive(Serialize, ToSchema)]
pub struct InterviewSnapshot {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(example = "backend")]
    pub position: String,
    pub current_topic: Option<String>,
    pub completed_topics: Vec<String>,
    pub remaining_topics: Vec<String>,
    pub interview_complete: bool,
    pub has_final_feedback: bool,
}

impl InterviewSnapshot {
    pub fn from_session(id: Uuid, session: &InterviewSession) -> Self {
        Self {
            id,
            position: session.position().to_string(),
            current_topic: session.current_topic().map(str::to_string),
            completed_topics: session.completed_topics().to_vec(),
            remaining_topics: session
                .get_remaining_topics()
                .into_iter()
                .map(str::to_string)
                .collect(),
            interview_complete: session.is_complete(),
            has_final_feedback: session.final_feedback().is_some(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ConversationResponse {
    pub topic: Option<String>,
    pub turns: Vec<TurnBody>,
}

#[derive(Serialize, ToSchema)]
pub struct AnswerResponse {
    /// follow_up, hint, or conclude.
    #[schema(example = "follow_up")]
    pub kind: String,
    /// The interviewer's next utterance.
    pub response: String,
    /// Structured topic feedback, present exactly on conclude.
    pub feedback: Option<FeedbackBody>,
    /// Non-rejecting notice, e.g. the answer-length warning.
    pub warning: Option<String>,
    /// After a conclude: the next topic, when one was opened.
    pub next_topic: Option<String>,
    /// After a conclude: the next topic's opening question.
    pub next_question: Option<String>,
    pub interview_complete: bool,
}

impl AnswerResponse {
    pub fn kind_label(action: AnswerAction) -> String {
        action.as_str().to_string()
    }
}

#[derive(Serialize, ToSchema)]
pub struct QuestionResponse {
    pub topic: String,
    pub question: String,
}

#[derive(Serialize, ToSchema)]
pub struct AdvanceResponse {
    pub next_topic: Option<String>,
    pub next_question: Option<String>,
    pub interview_complete: bool,
}

#[derive(Serialize, ToSchema)]
pub struct EndResponse {
    pub allowed: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct EvaluationResponse {
    pub evaluation: String,
}

#[derive(Serialize, ToSchema)]
pub struct StatsSummaryResponse {
    pub total_interviews: u64,
    pub completed_interviews: u64,
    pub completion_rate: f64,
    pub success_rate: f64,
    pub position_distribution: BTreeMap<String, u64>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
