use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::SubmissionId;

/// A user-supplied request to list a new tool, awaiting moderation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ToolSubmission {
    pub id: SubmissionId,

    // Content
    pub tool_name: String,
    pub tool_url: String,
    pub description: String,
    pub full_description: Option<String>,
    pub category: String,
    pub pricing: String,

    // Submitter
    pub submitter_name: Option<String>,
    pub submitter_email: String,

    // Moderation state
    pub status: String, // Maps to SubmissionStatus
    pub flag_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Moderation state of a submission.
///
/// `Pending` and `Flagged` are non-terminal; `Approved` and `Rejected` are
/// terminal. Deletion is a separate action, not a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Flagged,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Flagged => "flagged",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// True for statuses a moderator can still act on.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, SubmissionStatus::Pending | SubmissionStatus::Flagged)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "flagged" => Ok(SubmissionStatus::Flagged),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid submission status: {}", s)),
        }
    }
}

impl ToolSubmission {
    pub fn status(&self) -> Result<SubmissionStatus> {
        self.status.parse()
    }
}

/// Fields for a new submission row, as produced by the intake validator.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub tool_name: String,
    pub tool_url: String,
    pub description: String,
    pub full_description: Option<String>,
    pub category: String,
    pub pricing: String,
    pub submitter_name: Option<String>,
    pub submitter_email: String,
    pub status: SubmissionStatus,
    pub flag_reason: Option<String>,
}

/// Durable store for submissions.
///
/// The intake validator creates rows; the moderation executor is the only
/// thing that mutates or deletes them.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a new submission, returning the stored row.
    async fn insert(&self, new: NewSubmission) -> Result<ToolSubmission>;

    async fn find_by_id(&self, id: SubmissionId) -> Result<Option<ToolSubmission>>;

    /// Count submissions from this email created at or after `since`
    /// (sliding rate-limit window).
    async fn count_recent_by_email(&self, email: &str, since: DateTime<Utc>) -> Result<i64>;

    /// URLs of every submission currently in one of the given statuses
    /// (duplicate detection scan).
    async fn urls_by_status(&self, statuses: &[SubmissionStatus]) -> Result<Vec<String>>;

    /// All submissions, newest first (admin dashboard).
    async fn list_all(&self) -> Result<Vec<ToolSubmission>>;

    /// Terminal transition: set status and stamp `reviewed_at = now`.
    async fn mark_reviewed(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<ToolSubmission>;

    /// Unconditional hard delete.
    async fn delete(&self, id: SubmissionId) -> Result<()>;
}

// =============================================================================
// Postgres implementation - ALL queries must be in models/
// =============================================================================

#[async_trait]
impl SubmissionStore for PgPool {
    async fn insert(&self, new: NewSubmission) -> Result<ToolSubmission> {
        let submission = sqlx::query_as::<_, ToolSubmission>(
            r#"
            INSERT INTO tool_submissions (
                tool_name, tool_url, description, full_description,
                category, pricing, submitter_name, submitter_email,
                status, flag_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.tool_name)
        .bind(&new.tool_url)
        .bind(&new.description)
        .bind(&new.full_description)
        .bind(&new.category)
        .bind(&new.pricing)
        .bind(&new.submitter_name)
        .bind(&new.submitter_email)
        .bind(new.status.as_str())
        .bind(&new.flag_reason)
        .fetch_one(self)
        .await?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: SubmissionId) -> Result<Option<ToolSubmission>> {
        let submission = sqlx::query_as::<_, ToolSubmission>(
            "SELECT * FROM tool_submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(submission)
    }

    async fn count_recent_by_email(&self, email: &str, since: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tool_submissions
            WHERE submitter_email = $1
              AND created_at >= $2
            "#,
        )
        .bind(email)
        .bind(since)
        .fetch_one(self)
        .await?;
        Ok(count)
    }

    async fn urls_by_status(&self, statuses: &[SubmissionStatus]) -> Result<Vec<String>> {
        let statuses: Vec<&str> = statuses.iter().map(SubmissionStatus::as_str).collect();
        let urls = sqlx::query_scalar::<_, String>(
            r#"
            SELECT tool_url
            FROM tool_submissions
            WHERE status = ANY($1)
            "#,
        )
        .bind(&statuses)
        .fetch_all(self)
        .await?;
        Ok(urls)
    }

    async fn list_all(&self) -> Result<Vec<ToolSubmission>> {
        let submissions = sqlx::query_as::<_, ToolSubmission>(
            "SELECT * FROM tool_submissions ORDER BY created_at DESC",
        )
        .fetch_all(self)
        .await?;
        Ok(submissions)
    }

    async fn mark_reviewed(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<ToolSubmission> {
        let submission = sqlx::query_as::<_, ToolSubmission>(
            r#"
            UPDATE tool_submissions
            SET status = $1, reviewed_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_one(self)
        .await?;
        Ok(submission)
    }

    async fn delete(&self, id: SubmissionId) -> Result<()> {
        sqlx::query("DELETE FROM tool_submissions WHERE id = $1")
            .bind(id)
            .execute(self)
            .await?;
        Ok(())
    }
}
