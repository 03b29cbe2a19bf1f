//! Typed errors for the intake and moderation pipeline.
//!
//! Every variant carries a stable machine-readable code so callers can
//! branch on kind instead of string-matching messages. HTTP status mapping
//! lives in the route layer.

use thiserror::Error;

use crate::common::ToolId;

/// Why an intake request was refused.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Form completed faster than a human plausibly could.
    #[error("Submission too fast. Are you human?")]
    TooFast,

    #[error("Invalid email address: missing @")]
    EmailMissingAt,

    #[error("Invalid email address")]
    EmailInvalidFormat,

    #[error("Email domain not allowed")]
    EmailDomainBlocked,

    #[error("Too many submissions. Please wait an hour.")]
    RateLimited,

    /// A defense-layer store query failed. Fails closed: the request is
    /// refused rather than waved through with an unknown count.
    #[error("System busy. Try again later.")]
    SystemBusy(#[source] anyhow::Error),

    #[error("This tool is already listed on our directory.")]
    AlreadyListed,

    #[error("This tool is already pending review. Please wait for our team to review your previous submission.")]
    AlreadyPending,

    #[error("Description too short.")]
    DescriptionTooShort,

    #[error("Failed to save submission")]
    Store(#[from] anyhow::Error),
}

impl SubmitError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::TooFast => "too_fast",
            SubmitError::EmailMissingAt => "email_missing_at",
            SubmitError::EmailInvalidFormat => "email_invalid_format",
            SubmitError::EmailDomainBlocked => "email_domain_blocked",
            SubmitError::RateLimited => "rate_limited",
            SubmitError::SystemBusy(_) => "system_busy",
            SubmitError::AlreadyListed => "already_listed",
            SubmitError::AlreadyPending => "already_pending",
            SubmitError::DescriptionTooShort => "description_too_short",
            SubmitError::Store(_) => "store_error",
        }
    }
}

/// Why a moderation action failed.
///
/// System-error variants (`VerificationFailed`, `Store`) leave the
/// submission in its prior state, so the operator can retry the exact same
/// action. `StateUpdateFailed` is the one reported inconsistency: the Tool
/// exists but the submission still looks unreviewed.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Submission not found")]
    NotFound,

    /// The submission already reached a terminal status.
    #[error("Submission was already reviewed (status: {status})")]
    AlreadyReviewed { status: String },

    /// Lost a slug race against a concurrent approval. No Tool was created;
    /// retrying the approval allocates a fresh slug.
    #[error("A tool with this slug was just created; retry the approval")]
    DuplicateSlug,

    /// The tool insert reported success but the read-after-write check did
    /// not find the row. The submission was not marked approved.
    #[error("Tool creation could not be verified")]
    VerificationFailed,

    /// The Tool was created and verified, but updating the submission
    /// status failed. Needs manual reconciliation; do not blindly retry the
    /// approval or a second Tool may be attempted.
    #[error("Tool {tool_id} (slug {slug}) was created but the submission status update failed")]
    StateUpdateFailed { tool_id: ToolId, slug: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ModerationError {
    pub fn code(&self) -> &'static str {
        match self {
            ModerationError::InvalidAction(_) => "invalid_action",
            ModerationError::NotFound => "not_found",
            ModerationError::AlreadyReviewed { .. } => "already_reviewed",
            ModerationError::DuplicateSlug => "duplicate_slug",
            ModerationError::VerificationFailed => "verification_failed",
            ModerationError::StateUpdateFailed { .. } => "state_update_failed",
            ModerationError::Store(_) => "store_error",
        }
    }
}
