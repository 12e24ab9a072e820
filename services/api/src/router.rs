//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AdvanceResponse, AnswerPayload, AnswerResponse, ConversationResponse,
        CreateInterviewPayload, EndResponse, ErrorResponse, EvaluationResponse, FeedbackBody,
        InterviewCreatedResponse, InterviewSnapshot, QuestionResponse, StatsSummaryResponse,
        TurnBody,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_interview,
        handlers::get_interview,
        handlers::get_conversation,
        handlers::submit_answer,
        handlers::refresh_question,
        handlers::skip_topic,
        handlers::end_interview,
        handlers::final_evaluation,
        handlers::get_transcript,
        handlers::reset_interview,
        handlers::get_stats,
    ),
    components(
        schemas(
            CreateInterviewPayload,
            InterviewCreatedResponse,
            InterviewSnapshot,
            ConversationResponse,
            TurnBody,
            FeedbackBody,
            AnswerPayload,
            AnswerResponse,
            QuestionResponse,
            AdvanceResponse,
            EndResponse,
            EvaluationResponse,
            StatsSummaryResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Interview Coach API", description = "Mock technical interviews with model-generated questions and feedback")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/interviews", post(handlers::create_interview))
        .route("/interviews/{id}", get(handlers::get_interview))
        .route(
            "/interviews/{id}/conversation",
            get(handlers::get_conversation),
        )
        .route("/interviews/{id}/answer", post(handlers::submit_answer))
        .route("/interviews/{id}/refresh", post(handlers::refresh_question))
        .route("/interviews/{id}/skip", post(handlers::skip_topic))
        .route("/interviews/{id}/end", post(handlers::end_interview))
        .route(
            "/interviews/{id}/evaluation",
            post(handlers::final_evaluation),
        )
        .route(
            "/interviews/{id}/transcript",
            get(handlers::get_transcript),
        )
        .route("/interviews/{id}/reset", post(handlers::reset_interview))
        .route("/stats", get(handlers::get_stats))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
