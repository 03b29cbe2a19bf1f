//! Public intake endpoint: `POST /api/submit`.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::domains::submissions::data::SubmitToolRequest;
use crate::domains::submissions::errors::SubmitError;
use crate::domains::submissions::submit_tool;
use crate::server::app::AppState;

/// Accept a raw submission from the public form.
///
/// Both real acceptance and a tripped honeypot answer with the same generic
/// success body; every refusal carries a machine-readable code.
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<SubmitToolRequest>,
) -> axum::response::Response {
    match submit_tool(request, &state.deps).await {
        // IntakeOutcome::Discarded (honeypot) is intentionally
        // indistinguishable from acceptance here.
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Submission received" })),
        )
            .into_response(),
        Err(e) => {
            let status = submit_error_status(&e);
            (
                status,
                Json(json!({ "error": e.to_string(), "code": e.code() })),
            )
                .into_response()
        }
    }
}

fn submit_error_status(error: &SubmitError) -> StatusCode {
    match error {
        SubmitError::TooFast | SubmitError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        SubmitError::EmailMissingAt
        | SubmitError::EmailInvalidFormat
        | SubmitError::EmailDomainBlocked
        | SubmitError::DescriptionTooShort => StatusCode::BAD_REQUEST,
        SubmitError::AlreadyListed | SubmitError::AlreadyPending => StatusCode::CONFLICT,
        SubmitError::SystemBusy(_) => StatusCode::SERVICE_UNAVAILABLE,
        SubmitError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
