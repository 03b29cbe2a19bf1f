//! Intake validator - layered spam defenses in front of the submission store.
//!
//! Layer 1: bot traps (honeypot, time-on-form)
//! Layer 2: email shape, rate limiting, duplicate detection
//! Layer 3: content heuristics
//!
//! Each layer short-circuits. Only a payload that clears every layer is
//! persisted, and only unflagged submissions trigger intake emails.

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::common::utils::normalize_url;
use crate::domains::submissions::data::SubmitToolRequest;
use crate::domains::submissions::errors::SubmitError;
use crate::domains::submissions::models::{NewSubmission, SubmissionStatus, ToolSubmission};
use crate::kernel::{email_templates, ServerDeps};

/// Sliding-window cap on submissions per submitter email.
pub const MAX_SUBMISSIONS_PER_HOUR: i64 = 5;

/// Humans cannot complete the multi-field form faster than this.
pub const MIN_SUBMISSION_TIME_MS: i64 = 3000;

/// More literal `http` occurrences than this in the long description flags
/// the submission for human review.
pub const MAX_DESCRIPTION_LINKS: usize = 3;

/// Minimum length of the short description.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Throwaway/test domains we never accept submissions from.
pub const BLOCKED_EMAIL_DOMAINS: &[&str] = &["test.com", "example.com", "spam.com"];

pub const EXCESSIVE_LINKS_REASON: &str = "Excessive links in description";

/// What the intake validator did with a payload.
#[derive(Debug)]
pub enum IntakeOutcome {
    /// Validated and stored (pending or flagged).
    Accepted(ToolSubmission),
    /// Honeypot tripped: nothing was stored, no email was sent, but the
    /// caller must still answer with a success-shaped response so the bot
    /// cannot learn it was detected.
    Discarded,
}

/// Run a raw submission through every defense layer and, if it passes,
/// persist it and fire the intake notifications.
pub async fn submit_tool(
    request: SubmitToolRequest,
    deps: &ServerDeps,
) -> Result<IntakeOutcome, SubmitError> {
    // Layer 1: honeypot. Deliberate deception, not an error path.
    if honeypot_filled(&request) {
        warn!(
            "Honeypot filled by {}; discarding submission silently",
            request.submitter_email
        );
        return Ok(IntakeOutcome::Discarded);
    }

    // Layer 1: time-on-form
    let now_ms = Utc::now().timestamp_millis();
    let elapsed = request.submission_start_time.map(|start| now_ms - start);
    match elapsed {
        Some(ms) if ms >= MIN_SUBMISSION_TIME_MS => {}
        _ => {
            warn!(
                "Submission completed too fast ({:?}ms) by {}",
                elapsed, request.submitter_email
            );
            return Err(SubmitError::TooFast);
        }
    }

    // Layer 2: email shape
    validate_submitter_email(&request.submitter_email)?;

    // Layer 2: rate limiting. A failed count fails closed - an unknown
    // count is never treated as zero.
    let window_start = Utc::now() - Duration::minutes(60);
    let recent = deps
        .submissions
        .count_recent_by_email(&request.submitter_email, window_start)
        .await
        .map_err(|e| {
            error!("Rate limit check failed: {:#}", e);
            SubmitError::SystemBusy(e)
        })?;
    if recent >= MAX_SUBMISSIONS_PER_HOUR {
        warn!("{} hit max submissions per hour", request.submitter_email);
        return Err(SubmitError::RateLimited);
    }

    // Layer 2: duplicate detection against published tools
    let normalized = normalize_url(&request.tool_url);
    let tool_urls = deps.tools.list_urls().await.map_err(|e| {
        error!("Tool duplicate scan failed: {:#}", e);
        SubmitError::SystemBusy(e)
    })?;
    if tool_urls.iter().any(|u| normalize_url(u) == normalized) {
        return Err(SubmitError::AlreadyListed);
    }

    // ...and against submissions still awaiting review. Rejected and
    // approved submissions are excluded: resubmission after rejection is
    // allowed, and approved URLs are already caught by the tools scan.
    let pending_urls = deps
        .submissions
        .urls_by_status(&[SubmissionStatus::Pending, SubmissionStatus::Flagged])
        .await
        .map_err(|e| {
            error!("Submission duplicate scan failed: {:#}", e);
            SubmitError::SystemBusy(e)
        })?;
    if pending_urls.iter().any(|u| normalize_url(u) == normalized) {
        return Err(SubmitError::AlreadyPending);
    }

    // Layer 3: content heuristics
    if request.description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(SubmitError::DescriptionTooShort);
    }

    let link_count = request
        .full_description
        .as_deref()
        .unwrap_or_default()
        .matches("http")
        .count();
    let (status, flag_reason) = if link_count > MAX_DESCRIPTION_LINKS {
        (
            SubmissionStatus::Flagged,
            Some(EXCESSIVE_LINKS_REASON.to_string()),
        )
    } else {
        (SubmissionStatus::Pending, None)
    };

    let submission = deps
        .submissions
        .insert(NewSubmission {
            tool_name: request.tool_name,
            tool_url: request.tool_url,
            description: request.description,
            full_description: request.full_description,
            category: request.category,
            pricing: request.pricing,
            submitter_name: request.submitter_name,
            submitter_email: request.submitter_email,
            status,
            flag_reason,
        })
        .await?;

    info!(
        "Submission {} stored with status {}",
        submission.id, submission.status
    );

    // Flagged submissions stay silent until a human clears the flag.
    // The submission is durably stored by now: email failures are logged
    // and never fail the request.
    if status == SubmissionStatus::Flagged {
        warn!(
            "Submission {} flagged: {} - skipping intake emails",
            submission.id, EXCESSIVE_LINKS_REASON
        );
    } else {
        send_intake_emails(&submission, deps).await;
    }

    Ok(IntakeOutcome::Accepted(submission))
}

fn honeypot_filled(request: &SubmitToolRequest) -> bool {
    request
        .website_honey
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty())
}

/// Reject malformed addresses and blocked domains.
fn validate_submitter_email(email: &str) -> Result<(), SubmitError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(SubmitError::EmailMissingAt);
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || email.contains(char::is_whitespace)
    {
        return Err(SubmitError::EmailInvalidFormat);
    }
    if BLOCKED_EMAIL_DOMAINS.contains(&domain.to_lowercase().as_str()) {
        return Err(SubmitError::EmailDomainBlocked);
    }
    Ok(())
}

/// Best-effort submitter confirmation + admin alert.
async fn send_intake_emails(submission: &ToolSubmission, deps: &ServerDeps) {
    let confirmation = email_templates::submission_received(&submission.tool_name);
    if let Err(e) = deps
        .mailer
        .send(
            &submission.submitter_email,
            &confirmation.subject,
            &confirmation.html,
        )
        .await
    {
        error!(
            "Failed to send confirmation email to {}: {:#}",
            submission.submitter_email, e
        );
    }

    let alert = email_templates::admin_new_submission(
        &submission.tool_name,
        &submission.submitter_email,
    );
    if let Err(e) = deps
        .mailer
        .send(&deps.admin_email, &alert.subject, &alert.html)
        .await
    {
        error!("Failed to send admin alert: {:#}", e);
    }
}
