use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ToolId;
use crate::domains::submissions::models::ToolSubmission;

/// A published directory entry.
///
/// Created exactly once, as the terminal effect of approving a submission.
/// Never deleted by the moderation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    /// URL-safe, globally unique identifier derived from the name
    pub slug: String,
    pub short_description: String,
    pub full_description: String,
    pub url: String,
    pub category: String,
    pub pricing: String,
    pub tags: Vec<String>,
    pub platform: Vec<String>,

    // Engagement counters (zeroed at creation, maintained elsewhere)
    pub views: i64,
    pub rating: f64,
    pub review_count: i32,

    // Curation flags (false at creation, maintained elsewhere)
    pub trending: bool,
    pub featured: bool,
    pub verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new tool row.
#[derive(Debug, Clone)]
pub struct NewTool {
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: String,
    pub url: String,
    pub category: String,
    pub pricing: String,
}

impl NewTool {
    /// Build a tool row from an approved submission and an allocated slug.
    ///
    /// Counters and curation flags are not part of the input: they always
    /// start zeroed/false and are owned by unrelated admin flows afterward.
    pub fn from_submission(submission: &ToolSubmission, slug: String) -> Self {
        Self {
            name: submission.tool_name.clone(),
            slug,
            short_description: submission.description.clone(),
            full_description: submission
                .full_description
                .clone()
                .unwrap_or_else(|| submission.description.clone()),
            url: submission.tool_url.clone(),
            category: submission.category.clone(),
            pricing: submission.pricing.clone(),
        }
    }
}

/// Insert failure modes that callers must distinguish.
#[derive(Debug, thiserror::Error)]
pub enum ToolInsertError {
    /// The slug collided with a concurrently inserted row. The caller must
    /// retry the approval; nothing was written.
    #[error("slug already exists")]
    DuplicateSlug,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Store for published tools.
#[async_trait]
pub trait ToolStore: Send + Sync {
    /// Insert a new tool, returning the stored row. Signals
    /// [`ToolInsertError::DuplicateSlug`] on a slug uniqueness conflict.
    async fn insert(&self, new: NewTool) -> Result<Tool, ToolInsertError>;

    /// Read-after-write verification lookup.
    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>>;

    /// Slug probe for the allocator.
    async fn slug_exists(&self, slug: &str) -> Result<bool>;

    /// URLs of every published tool (duplicate detection scan).
    async fn list_urls(&self) -> Result<Vec<String>>;
}

// =============================================================================
// Postgres implementation - ALL queries must be in models/
// =============================================================================

#[async_trait]
impl ToolStore for PgPool {
    async fn insert(&self, new: NewTool) -> Result<Tool, ToolInsertError> {
        let result = sqlx::query_as::<_, Tool>(
            r#"
            INSERT INTO tools (
                name, slug, short_description, full_description, url,
                category, pricing, tags, platform,
                views, rating, review_count,
                trending, featured, verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{}', '{"Web"}', 0, 0, 0, false, false, false)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.short_description)
        .bind(&new.full_description)
        .bind(&new.url)
        .bind(&new.category)
        .bind(&new.pricing)
        .fetch_one(self)
        .await;

        match result {
            Ok(tool) => Ok(tool),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ToolInsertError::DuplicateSlug)
            }
            Err(e) => Err(ToolInsertError::Other(e.into())),
        }
    }

    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>> {
        let tool = sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(self)
            .await?;
        Ok(tool)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tools WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(self)
        .await?;
        Ok(exists)
    }

    async fn list_urls(&self) -> Result<Vec<String>> {
        let urls = sqlx::query_scalar::<_, String>("SELECT url FROM tools")
            .fetch_all(self)
            .await?;
        Ok(urls)
    }
}
