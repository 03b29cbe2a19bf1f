//! Admin moderation endpoint: `POST /api/submissions` to act on a
//! submission, `GET /api/submissions` to list them for the dashboard.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::domains::submissions::data::ModerationRequest;
use crate::domains::submissions::errors::ModerationError;
use crate::domains::submissions::moderate;
use crate::server::app::AppState;

pub async fn moderation_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ModerationRequest>,
) -> axum::response::Response {
    match moderate(request, &state.deps).await {
        Ok(outcome) => (StatusCode::OK, Json(json!({ "success": true, "outcome": outcome })))
            .into_response(),
        Err(e) => {
            let status = moderation_error_status(&e);
            (
                status,
                Json(json!({ "error": e.to_string(), "code": e.code() })),
            )
                .into_response()
        }
    }
}

/// All submissions, newest first.
pub async fn list_submissions_handler(
    Extension(state): Extension<AppState>,
) -> axum::response::Response {
    match state.deps.submissions.list_all().await {
        Ok(submissions) => (StatusCode::OK, Json(submissions)).into_response(),
        Err(e) => {
            error!("Failed to list submissions: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to list submissions", "code": "store_error" })),
            )
                .into_response()
        }
    }
}

fn moderation_error_status(error: &ModerationError) -> StatusCode {
    match error {
        ModerationError::InvalidAction(_) => StatusCode::BAD_REQUEST,
        ModerationError::NotFound => StatusCode::NOT_FOUND,
        ModerationError::AlreadyReviewed { .. } | ModerationError::DuplicateSlug => {
            StatusCode::CONFLICT
        }
        ModerationError::VerificationFailed
        | ModerationError::StateUpdateFailed { .. }
        | ModerationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
