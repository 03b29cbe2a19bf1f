//! Moderation executor - applies an admin decision to a submission.
//!
//! State machine: pending|flagged -> approved|rejected. Terminal states
//! never transition back. Delete is orthogonal: it removes the submission
//! row outright, whatever its status, and never touches a Tool.
//!
//! Approval materializes the canonical Tool. Failures along the way leave
//! the submission untouched so the operator can retry the same action;
//! the one exception (StateUpdateFailed) is reported loudly for manual
//! reconciliation instead of being papered over.

use tracing::{error, info, warn};

use crate::common::utils::{allocate_slug, slugify};
use crate::common::SubmissionId;
use crate::domains::submissions::data::{
    ModerationAction, ModerationOutcome, ModerationRequest, SubmissionOverride,
};
use crate::domains::submissions::errors::ModerationError;
use crate::domains::submissions::models::{SubmissionStatus, ToolSubmission};
use crate::domains::tools::models::{NewTool, ToolInsertError};
use crate::kernel::{email_templates, ServerDeps};

/// Parse and dispatch a moderation request.
pub async fn moderate(
    request: ModerationRequest,
    deps: &ServerDeps,
) -> Result<ModerationOutcome, ModerationError> {
    let action: ModerationAction = request.action.parse()?;
    match action {
        ModerationAction::Approve => {
            approve(request.submission_id, request.submission_data, deps).await
        }
        ModerationAction::Reject => reject(request.submission_id, deps).await,
        ModerationAction::Delete => delete(request.submission_id, deps).await,
    }
}

/// Approve a submission: allocate a slug, materialize the Tool, verify it,
/// then (and only then) mark the submission approved.
async fn approve(
    submission_id: SubmissionId,
    overrides: Option<SubmissionOverride>,
    deps: &ServerDeps,
) -> Result<ModerationOutcome, ModerationError> {
    let submission = load_reviewable(submission_id, deps).await?;
    let submission = apply_overrides(submission, overrides);

    let base = slugify(&submission.tool_name);
    let slug = allocate_slug(&base, |candidate| async move {
        deps.tools.slug_exists(&candidate).await
    })
    .await?;

    // The probe above is not atomic with this insert: a concurrent approval
    // can still win the slug. The unique constraint is the arbiter; the
    // loser fails loudly and the operator retries.
    let tool = match deps
        .tools
        .insert(NewTool::from_submission(&submission, slug.clone()))
        .await
    {
        Ok(tool) => tool,
        Err(ToolInsertError::DuplicateSlug) => {
            warn!(
                "Slug {} taken between probe and insert for submission {}",
                slug, submission_id
            );
            return Err(ModerationError::DuplicateSlug);
        }
        Err(ToolInsertError::Other(e)) => return Err(ModerationError::Store(e)),
    };

    // Read-after-write: never mark a submission approved without a
    // confirmed Tool row behind it.
    match deps.tools.find_by_id(tool.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            error!(
                "Tool {} inserted for submission {} but not found on verification",
                tool.id, submission_id
            );
            return Err(ModerationError::VerificationFailed);
        }
        Err(e) => {
            error!("Tool verification query failed for {}: {:#}", tool.id, e);
            return Err(ModerationError::VerificationFailed);
        }
    }

    if let Err(e) = deps
        .submissions
        .mark_reviewed(submission_id, SubmissionStatus::Approved)
        .await
    {
        // The Tool exists but the submission still looks unreviewed.
        // Surface it for manual reconciliation; a blind retry here would
        // risk a second Tool.
        error!(
            "Tool {} created but submission {} status update failed: {:#}",
            tool.id, submission_id, e
        );
        return Err(ModerationError::StateUpdateFailed {
            tool_id: tool.id,
            slug: slug.clone(),
        });
    }

    info!(
        "Submission {} approved; tool {} published as {}",
        submission_id, tool.id, slug
    );

    let public_url = format!("{}/tool/{}", deps.site_url.trim_end_matches('/'), slug);
    let template = email_templates::tool_approved(&submission.tool_name, &public_url);
    if let Err(e) = deps
        .mailer
        .send(&submission.submitter_email, &template.subject, &template.html)
        .await
    {
        error!("Approval email failed (tool still approved): {:#}", e);
    }

    Ok(ModerationOutcome::approved(tool.id, slug))
}

async fn reject(
    submission_id: SubmissionId,
    deps: &ServerDeps,
) -> Result<ModerationOutcome, ModerationError> {
    let submission = load_reviewable(submission_id, deps).await?;

    deps.submissions
        .mark_reviewed(submission_id, SubmissionStatus::Rejected)
        .await?;

    info!("Submission {} rejected", submission_id);

    let template = email_templates::tool_rejected(&submission.tool_name, None);
    if let Err(e) = deps
        .mailer
        .send(&submission.submitter_email, &template.subject, &template.html)
        .await
    {
        error!("Rejection email failed (submission still rejected): {:#}", e);
    }

    Ok(ModerationOutcome::rejected())
}

/// Hard delete, regardless of status. A Tool already materialized from this
/// submission is deliberately left alone.
async fn delete(
    submission_id: SubmissionId,
    deps: &ServerDeps,
) -> Result<ModerationOutcome, ModerationError> {
    deps.submissions.delete(submission_id).await?;
    info!("Submission {} deleted", submission_id);
    Ok(ModerationOutcome::deleted())
}

/// Fetch the submission and enforce the state machine: only pending or
/// flagged submissions can be approved or rejected.
async fn load_reviewable(
    submission_id: SubmissionId,
    deps: &ServerDeps,
) -> Result<ToolSubmission, ModerationError> {
    let submission = deps
        .submissions
        .find_by_id(submission_id)
        .await?
        .ok_or(ModerationError::NotFound)?;

    let status = submission.status()?;
    if !status.is_reviewable() {
        return Err(ModerationError::AlreadyReviewed {
            status: status.to_string(),
        });
    }
    Ok(submission)
}

fn apply_overrides(
    mut submission: ToolSubmission,
    overrides: Option<SubmissionOverride>,
) -> ToolSubmission {
    let Some(o) = overrides else {
        return submission;
    };
    if let Some(v) = o.tool_name {
        submission.tool_name = v;
    }
    if let Some(v) = o.tool_url {
        submission.tool_url = v;
    }
    if let Some(v) = o.description {
        submission.description = v;
    }
    if let Some(v) = o.full_description {
        submission.full_description = Some(v);
    }
    if let Some(v) = o.category {
        submission.category = v;
    }
    if let Some(v) = o.pricing {
        submission.pricing = v;
    }
    submission
}
