//! End-to-end tests for the intake validator: every defense layer, in the
//! order the pipeline applies them.

mod common;

use chrono::{Duration, Utc};
use common::{valid_request, TestHarness, ADMIN_EMAIL};
use server_core::domains::submissions::actions::{
    submit_tool, IntakeOutcome, EXCESSIVE_LINKS_REASON, MAX_SUBMISSIONS_PER_HOUR,
};
use server_core::domains::submissions::errors::SubmitError;
use server_core::domains::submissions::models::SubmissionStatus;
use server_core::domains::tools::models::{NewTool, ToolStore};
use std::sync::Arc;

// =============================================================================
// Layer 1: bot traps
// =============================================================================

#[tokio::test]
async fn honeypot_discards_silently() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.website_honey = Some("https://spam.example".to_string());

    let outcome = submit_tool(request, &h.deps).await.unwrap();

    // Success-shaped outcome, but nothing stored and nobody emailed.
    assert!(matches!(outcome, IntakeOutcome::Discarded));
    assert!(h.submissions.all().is_empty());
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn whitespace_only_honeypot_does_not_trip() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.website_honey = Some("   ".to_string());

    let outcome = submit_tool(request, &h.deps).await.unwrap();

    assert!(matches!(outcome, IntakeOutcome::Accepted(_)));
}

#[tokio::test]
async fn too_fast_submission_rejected() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.submission_start_time = Some(Utc::now().timestamp_millis() - 1000);

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::TooFast));
    assert!(h.submissions.all().is_empty());
}

#[tokio::test]
async fn missing_start_time_rejected() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.submission_start_time = None;

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::TooFast));
}

// =============================================================================
// Layer 2: email shape
// =============================================================================

#[tokio::test]
async fn blocked_email_domain_rejected() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.submitter_email = "bot@spam.com".to_string();

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::EmailDomainBlocked));
    assert!(h.submissions.all().is_empty());
}

#[tokio::test]
async fn malformed_email_rejected() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.submitter_email = "no-at-sign".to_string();

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::EmailMissingAt));
}

// =============================================================================
// Layer 2: rate limiting
// =============================================================================

#[tokio::test]
async fn sixth_submission_in_window_rate_limited() {
    let h = TestHarness::new();
    let recent = Utc::now() - Duration::minutes(10);
    for _ in 0..MAX_SUBMISSIONS_PER_HOUR {
        h.seed_submission("https://other.example", SubmissionStatus::Rejected, recent);
    }

    let err = submit_tool(valid_request(), &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::RateLimited));
}

#[tokio::test]
async fn window_rolls_forward() {
    let h = TestHarness::new();
    // Five earlier submissions, all older than the 60-minute window.
    let stale = Utc::now() - Duration::minutes(61);
    for _ in 0..MAX_SUBMISSIONS_PER_HOUR {
        h.seed_submission("https://other.example", SubmissionStatus::Rejected, stale);
    }

    let outcome = submit_tool(valid_request(), &h.deps).await.unwrap();

    assert!(matches!(outcome, IntakeOutcome::Accepted(_)));
}

#[tokio::test]
async fn failed_rate_limit_count_fails_closed() {
    let h = TestHarness::new();
    h.submissions.fail_counts();

    let err = submit_tool(valid_request(), &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::SystemBusy(_)));
    assert!(h.submissions.all().is_empty());
}

// =============================================================================
// Layer 2: duplicate detection
// =============================================================================

#[tokio::test]
async fn url_already_published_rejected() {
    let h = TestHarness::new();
    h.tools
        .insert(NewTool {
            name: "Acme AI".to_string(),
            slug: "acme-ai".to_string(),
            short_description: "Writes code.".to_string(),
            full_description: "Writes code.".to_string(),
            url: "https://acme.ai".to_string(),
            category: "Developer Tools".to_string(),
            pricing: "Freemium".to_string(),
        })
        .await
        .unwrap();

    // Different case, trailing slash, query string - same tool.
    let mut request = valid_request();
    request.tool_url = "HTTPS://ACME.AI/?utm_source=x".to_string();

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::AlreadyListed));
}

#[tokio::test]
async fn url_already_awaiting_review_rejected() {
    let h = TestHarness::new();
    let first = submit_tool(valid_request(), &h.deps).await.unwrap();
    assert!(matches!(first, IntakeOutcome::Accepted(_)));

    let mut request = valid_request();
    request.tool_url = "https://acme.ai/#features".to_string();
    request.submitter_email = "someone-else@elsewhere.org".to_string();

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::AlreadyPending));
}

#[tokio::test]
async fn resubmission_after_rejection_allowed() {
    let h = TestHarness::new();
    let old = Utc::now() - Duration::hours(2);
    h.seed_submission("https://acme.ai", SubmissionStatus::Rejected, old);

    let outcome = submit_tool(valid_request(), &h.deps).await.unwrap();

    assert!(matches!(outcome, IntakeOutcome::Accepted(_)));
}

#[tokio::test]
async fn failed_duplicate_scan_fails_closed() {
    let h = TestHarness::new();
    h.submissions.fail_url_scans();

    let err = submit_tool(valid_request(), &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::SystemBusy(_)));
    assert!(h.submissions.all().is_empty());
}

// =============================================================================
// Layer 3: content heuristics
// =============================================================================

#[tokio::test]
async fn short_description_rejected() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.description = "Too short".to_string();

    let err = submit_tool(request, &h.deps).await.unwrap_err();

    assert!(matches!(err, SubmitError::DescriptionTooShort));
    assert!(h.submissions.all().is_empty());
}

#[tokio::test]
async fn excessive_links_flag_for_review() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.full_description = Some(
        "See https://a.com http://b.com https://c.com https://d.com https://e.com".to_string(),
    );

    let outcome = submit_tool(request, &h.deps).await.unwrap();

    let IntakeOutcome::Accepted(submission) = outcome else {
        panic!("expected the flagged submission to be stored");
    };
    assert_eq!(submission.status, SubmissionStatus::Flagged.as_str());
    assert_eq!(
        submission.flag_reason.as_deref(),
        Some(EXCESSIVE_LINKS_REASON)
    );
    // Flagged submissions never notify anyone.
    assert_eq!(h.mailer.sent_count(), 0);
}

#[tokio::test]
async fn three_links_is_not_excessive() {
    let h = TestHarness::new();
    let mut request = valid_request();
    request.full_description =
        Some("https://a.com http://b.com https://c.com".to_string());

    let outcome = submit_tool(request, &h.deps).await.unwrap();

    let IntakeOutcome::Accepted(submission) = outcome else {
        panic!("expected acceptance");
    };
    assert_eq!(submission.status, SubmissionStatus::Pending.as_str());
    assert!(submission.flag_reason.is_none());
}

// =============================================================================
// Happy path + notification semantics
// =============================================================================

#[tokio::test]
async fn clean_submission_stored_pending_with_both_emails() {
    let h = TestHarness::new();

    let outcome = submit_tool(valid_request(), &h.deps).await.unwrap();

    let IntakeOutcome::Accepted(submission) = outcome else {
        panic!("expected acceptance");
    };
    assert_eq!(submission.status, SubmissionStatus::Pending.as_str());
    assert!(submission.reviewed_at.is_none());
    assert_eq!(h.submissions.all().len(), 1);

    // Submitter confirmation + admin alert
    assert_eq!(h.mailer.sent_count(), 2);
    assert!(h.mailer.was_sent_to("jane@acme.ai"));
    assert!(h.mailer.was_sent_to(ADMIN_EMAIL));
}

#[tokio::test]
async fn mailer_outage_does_not_fail_intake() {
    let h = TestHarness::with_mailer(Arc::new(
        server_core::kernel::test_dependencies::MockMailer::failing(),
    ));

    let outcome = submit_tool(valid_request(), &h.deps).await.unwrap();

    assert!(matches!(outcome, IntakeOutcome::Accepted(_)));
    assert_eq!(h.submissions.all().len(), 1);
}
