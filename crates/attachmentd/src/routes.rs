//! API routes for attachmentd

use crate::server::AppState;
use attachment_common::{
    ErrorBody, QuestionsResponse, QuizError, ResearchInfo, StatusMessage, SubmitRequest,
    SubmitResponse,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Error returned by handlers, rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

// ============================================================================
// Root
// ============================================================================

pub fn root_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(read_root))
}

async fn read_root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Attachment Style Quiz Backend Running".to_string(),
    })
}

// ============================================================================
// Quiz Routes
// ============================================================================

pub fn quiz_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/questions", get(get_questions))
        .route("/api/submit", post(submit_quiz))
        .route("/api/research", get(research_info))
}

async fn get_questions(State(state): State<AppStateArc>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: state.service.bank().list_questions(),
        scale: state.scale.clone(),
    })
}

async fn submit_quiz(
    State(state): State<AppStateArc>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    info!("  Submission with {} answers", req.answers.len());

    let response = state.service.submit(req).await.map_err(|e| {
        error!("  Submission rejected: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

async fn research_info(State(state): State<AppStateArc>) -> Json<ResearchInfo> {
    Json(state.research.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_maps_to_bad_request() {
        let err = ApiError::from(QuizError::UnknownQuestionId("Z9".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail, "Unknown question id: Z9");
    }

    #[test]
    fn test_bank_error_maps_to_server_error() {
        let err = ApiError::from(QuizError::DuplicateQuestionId("A1".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
