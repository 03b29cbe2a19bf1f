//! Wire payloads for the intake and moderation endpoints.

use serde::{Deserialize, Serialize};

use crate::common::{SubmissionId, ToolId};
use crate::domains::submissions::errors::ModerationError;

/// Raw intake payload, exactly as the public submission form posts it.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolRequest {
    pub tool_name: String,
    pub tool_url: String,
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    pub category: String,
    pub pricing: String,
    #[serde(default)]
    pub submitter_name: Option<String>,
    pub submitter_email: String,

    // Security fields
    /// Decoy field rendered off-screen in the form; humans never fill it.
    #[serde(default)]
    pub website_honey: Option<String>,
    /// Client-reported epoch millis when the form was opened.
    #[serde(default)]
    pub submission_start_time: Option<i64>,
}

/// Admin moderation request: `{action, submissionId, submissionData?}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    pub action: String,
    pub submission_id: SubmissionId,
    #[serde(default)]
    pub submission_data: Option<SubmissionOverride>,
}

/// Optional field edits applied by the moderator at approval time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionOverride {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub pricing: Option<String>,
}

/// Closed set of moderation actions.
///
/// Parsed from the wire string up front so an unrecognized action is
/// rejected before any side effect, and the executor can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Delete,
}

impl std::str::FromStr for ModerationAction {
    type Err = ModerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ModerationAction::Approve),
            "reject" => Ok(ModerationAction::Reject),
            "delete" => Ok(ModerationAction::Delete),
            other => Err(ModerationError::InvalidAction(other.to_string())),
        }
    }
}

/// Result of a successful moderation action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationOutcome {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<ToolId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_slug: Option<String>,
}

impl ModerationOutcome {
    pub fn approved(tool_id: ToolId, tool_slug: String) -> Self {
        Self {
            message: "Submission approved and tool created",
            tool_id: Some(tool_id),
            tool_slug: Some(tool_slug),
        }
    }

    pub fn rejected() -> Self {
        Self {
            message: "Submission rejected",
            tool_id: None,
            tool_slug: None,
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: "Submission deleted",
            tool_id: None,
            tool_slug: None,
        }
    }
}
