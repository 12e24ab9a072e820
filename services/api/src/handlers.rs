//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for the
//! interview lifecycle. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use coach_core::catalog::Position;
use coach_core::classifier::AnswerAction;
use coach_core::export;
use coach_core::interviewer::{EndPolicy, InterviewError};
use coach_core::session::InterviewSession;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;
use uuid::Uuid;

use crate::{
    models::{
        AdvanceResponse, AnswerPayload, AnswerResponse, ConversationResponse,
        CreateInterviewPayload, EndResponse, ErrorResponse, EvaluationResponse,
        InterviewCreatedResponse, InterviewSnapshot, QuestionResponse, StatsSummaryResponse,
        TurnBody,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Maps engine-level rejections onto user-facing 400s. These all leave the
/// session unchanged, so the caller may simply retry.
fn domain_error(err: InterviewError) -> ApiError {
    ApiError::BadRequest(err.to_string())
}

async fn fetch_session(
    state: &AppState,
    id: Uuid,
) -> Result<Arc<Mutex<InterviewSession>>, ApiError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Interview with id '{}' not found", id)))
}

/// Start a new interview for a position.
#[utoipa::path(
    post,
    path = "/interviews",
    request_body = CreateInterviewPayload,
    responses(
        (status = 201, description = "Interview started with its first question", body = InterviewCreatedResponse),
        (status = 400, description = "Unknown position", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_interview(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let position: Position = payload
        .position
        .parse()
        .map_err(|err: coach_core::catalog::UnknownPosition| ApiError::BadRequest(err.to_string()))?;

    let mut session = InterviewSession::new(position);
    let start = state
        .interviewer
        .start_next_topic(&mut session)
        .await
        .map_err(domain_error)?;

    let id = Uuid::new_v4();
    let response = InterviewCreatedResponse {
        id,
        position: position.to_string(),
        topic: start.as_ref().map(|s| s.topic.clone()),
        question: start.map(|s| s.question),
        interview_complete: session.is_complete(),
    };

    state
        .sessions
        .write()
        .await
        .insert(id, Arc::new(Mutex::new(session)));
    state.stats.record_started(position).await;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get an interview's progress snapshot.
#[utoipa::path(
    get,
    path = "/interviews/{id}",
    responses(
        (status = 200, description = "Interview snapshot", body = InterviewSnapshot),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn get_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewSnapshot>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(InterviewSnapshot::from_session(id, &session)))
}

/// Get the current topic's conversation.
#[utoipa::path(
    get,
    path = "/interviews/{id}/conversation",
    responses(
        (status = 200, description = "Turns of the active topic", body = ConversationResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(ConversationResponse {
        topic: session.current_topic().map(str::to_string),
        turns: session
            .get_current_conversation()
            .iter()
            .map(TurnBody::from)
            .collect(),
    }))
}

/// Submit a candidate answer.
///
/// When the answer concludes the topic, the next topic is opened in the same
/// call and its opening question is included in the response.
#[utoipa::path(
    post,
    path = "/interviews/{id}/answer",
    request_body = AnswerPayload,
    responses(
        (status = 200, description = "The interviewer's reaction", body = AnswerResponse),
        (status = 400, description = "Rejected answer (empty, over a limit, or no active topic)", body = ErrorResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    let outcome = state
        .interviewer
        .handle_answer(&mut session, &payload.answer)
        .await
        .map_err(domain_error)?;

    let mut response = AnswerResponse {
        kind: AnswerResponse::kind_label(outcome.kind),
        response: outcome.response,
        feedback: outcome.feedback.map(Into::into),
        warning: outcome.warning,
        next_topic: None,
        next_question: None,
        interview_complete: false,
    };

    if outcome.kind == AnswerAction::Conclude {
        if let Some(start) = state
            .interviewer
            .start_next_topic(&mut session)
            .await
            .map_err(domain_error)?
        {
            response.next_topic = Some(start.topic);
            response.next_question = Some(start.question);
        }
    }
    response.interview_complete = session.is_complete();

    Ok(Json(response))
}

/// Ask a different question on the current topic.
#[utoipa::path(
    post,
    path = "/interviews/{id}/refresh",
    responses(
        (status = 200, description = "A fresh question on the same topic", body = QuestionResponse),
        (status = 400, description = "No active topic", body = ErrorResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn refresh_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    let question = state
        .interviewer
        .refresh_topic(&mut session)
        .await
        .map_err(domain_error)?;
    let topic = session
        .current_topic()
        .unwrap_or_default()
        .to_string();

    Ok(Json(QuestionResponse { topic, question }))
}

/// Skip the current topic and move on.
#[utoipa::path(
    post,
    path = "/interviews/{id}/skip",
    responses(
        (status = 200, description = "The next topic, or completion", body = AdvanceResponse),
        (status = 400, description = "No active topic", body = ErrorResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn skip_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    state
        .interviewer
        .skip_topic(&mut session)
        .map_err(domain_error)?;
    let start = state
        .interviewer
        .start_next_topic(&mut session)
        .await
        .map_err(domain_error)?;

    Ok(Json(AdvanceResponse {
        next_topic: start.as_ref().map(|s| s.topic.clone()),
        next_question: start.map(|s| s.question),
        interview_complete: session.is_complete(),
    }))
}

/// End the interview at the candidate's request.
///
/// With strict validation enabled, the request is refused (state unchanged)
/// unless at least one topic is completed and every completed topic has a
/// recorded answer. The refusal arrives as `allowed: false` with the reason.
#[utoipa::path(
    post,
    path = "/interviews/{id}/end",
    responses(
        (status = 200, description = "Whether ending was allowed, and why not otherwise", body = EndResponse),
        (status = 400, description = "Interview already complete", body = ErrorResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn end_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EndResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    let policy = EndPolicy {
        validate: state.config.strict_end_validation,
    };
    match state.interviewer.end_interview(&mut session, policy) {
        Ok(()) => Ok(Json(EndResponse {
            allowed: true,
            message: "The interview is over. Request the final evaluation when you are ready."
                .to_string(),
        })),
        Err(InterviewError::EndRejected(message)) => Ok(Json(EndResponse {
            allowed: false,
            message,
        })),
        Err(err) => Err(domain_error(err)),
    }
}

/// Generate (or fetch) the final evaluation.
#[utoipa::path(
    post,
    path = "/interviews/{id}/evaluation",
    responses(
        (status = 200, description = "The final evaluation report", body = EvaluationResponse),
        (status = 400, description = "Interview not complete yet", body = ErrorResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn final_evaluation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    let first_generation = session.final_feedback().is_none();
    let evaluation = state
        .interviewer
        .final_evaluation(&mut session)
        .await
        .map_err(domain_error)?;

    // The interview counts as completed once its evaluation exists; success
    // requires at least one recorded score with a mean of 4.0 or better.
    if first_generation {
        let success = session.mean_score().is_some_and(|mean| mean >= 4.0);
        state.stats.record_completed(success).await;
    }

    Ok(Json(EvaluationResponse { evaluation }))
}

/// Download the interview as a plain-text transcript.
#[utoipa::path(
    get,
    path = "/interviews/{id}/transcript",
    responses(
        (status = 200, description = "Plain-text transcript", content_type = "text/plain", body = String),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = fetch_session(&state, id).await?;
    let session = session.lock().await;
    let text = export::transcript(&session);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}

/// Start the interview over, keeping the same position.
#[utoipa::path(
    post,
    path = "/interviews/{id}/reset",
    responses(
        (status = 200, description = "The restarted interview's first question", body = AdvanceResponse),
        (status = 404, description = "Interview not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Interview ID"))
)]
pub async fn reset_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>, ApiError> {
    let session = fetch_session(&state, id).await?;
    let mut session = session.lock().await;

    session.reset();
    let start = state
        .interviewer
        .start_next_topic(&mut session)
        .await
        .map_err(domain_error)?;
    state.stats.record_started(session.position()).await;

    Ok(Json(AdvanceResponse {
        next_topic: start.as_ref().map(|s| s.topic.clone()),
        next_question: start.map(|s| s.question),
        interview_complete: session.is_complete(),
    }))
}

/// Today's usage statistics.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Today's counters and rates", body = StatsSummaryResponse)
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsSummaryResponse>, ApiError> {
    let stats = state.stats.today().await;
    Ok(Json(StatsSummaryResponse {
        total_interviews: stats.total_interviews,
        completed_interviews: stats.completed_interviews,
        completion_rate: stats.completion_rate(),
        success_rate: stats.success_rate(),
        position_distribution: stats.position_distribution,
    }))
}
