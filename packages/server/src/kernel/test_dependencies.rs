// TestDependencies - mock implementations for testing
//
// In-memory stores and a recording mailer that can be injected into
// ServerDeps for tests. Knobs simulate the store failures the pipeline has
// to handle (count-query outage, slug race, verification miss, status
// update failure).

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::common::{SubmissionId, ToolId};
use crate::domains::submissions::models::{
    NewSubmission, SubmissionStatus, SubmissionStore, ToolSubmission,
};
use crate::domains::tools::models::{NewTool, Tool, ToolInsertError, ToolStore};
use crate::kernel::BaseMailer;

// =============================================================================
// Mock Mailer
// =============================================================================

/// A sent email captured by the mock
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail_sends: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send return an error (emails are best-effort; the
    /// pipeline must still succeed).
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail_sends.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn was_sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == to)
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            anyhow::bail!("mock mailer configured to fail");
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// In-memory Submission Store
// =============================================================================

#[derive(Default)]
pub struct InMemorySubmissionStore {
    rows: Arc<Mutex<Vec<ToolSubmission>>>,
    fail_counts: AtomicBool,
    fail_url_scans: AtomicBool,
    fail_mark_reviewed: AtomicBool,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the rate-limit count query failing (pipeline must fail
    /// closed with SystemBusy).
    pub fn fail_counts(&self) {
        self.fail_counts.store(true, Ordering::SeqCst);
    }

    /// Simulate the duplicate-detection scan failing.
    pub fn fail_url_scans(&self) {
        self.fail_url_scans.store(true, Ordering::SeqCst);
    }

    /// Simulate the post-approval status update failing (the
    /// StateUpdateFailed reconciliation path).
    pub fn fail_mark_reviewed(&self) {
        self.fail_mark_reviewed.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all rows.
    pub fn all(&self) -> Vec<ToolSubmission> {
        self.rows.lock().unwrap().clone()
    }

    /// Insert a row with an explicit creation time (backdating for
    /// rate-limit window tests).
    pub fn insert_at(&self, new: NewSubmission, created_at: DateTime<Utc>) -> ToolSubmission {
        let row = Self::build_row(new, created_at);
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    fn build_row(new: NewSubmission, created_at: DateTime<Utc>) -> ToolSubmission {
        ToolSubmission {
            id: SubmissionId::new(),
            tool_name: new.tool_name,
            tool_url: new.tool_url,
            description: new.description,
            full_description: new.full_description,
            category: new.category,
            pricing: new.pricing,
            submitter_name: new.submitter_name,
            submitter_email: new.submitter_email,
            status: new.status.to_string(),
            flag_reason: new.flag_reason,
            created_at,
            reviewed_at: None,
        }
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert(&self, new: NewSubmission) -> Result<ToolSubmission> {
        Ok(self.insert_at(new, Utc::now()))
    }

    async fn find_by_id(&self, id: SubmissionId) -> Result<Option<ToolSubmission>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn count_recent_by_email(&self, email: &str, since: DateTime<Utc>) -> Result<i64> {
        if self.fail_counts.load(Ordering::SeqCst) {
            anyhow::bail!("mock store: count query failed");
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.submitter_email == email && s.created_at >= since)
            .count() as i64)
    }

    async fn urls_by_status(&self, statuses: &[SubmissionStatus]) -> Result<Vec<String>> {
        if self.fail_url_scans.load(Ordering::SeqCst) {
            anyhow::bail!("mock store: url scan failed");
        }
        let wanted: Vec<&str> = statuses.iter().map(SubmissionStatus::as_str).collect();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| wanted.contains(&s.status.as_str()))
            .map(|s| s.tool_url.clone())
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ToolSubmission>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn mark_reviewed(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<ToolSubmission> {
        if self.fail_mark_reviewed.load(Ordering::SeqCst) {
            anyhow::bail!("mock store: update failed");
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("no rows returned"))?;
        row.status = status.to_string();
        row.reviewed_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: SubmissionId) -> Result<()> {
        self.rows.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

// =============================================================================
// In-memory Tool Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryToolStore {
    rows: Arc<Mutex<Vec<Tool>>>,
    conflict_next_insert: AtomicBool,
    vanish_next_insert: AtomicBool,
}

impl InMemoryToolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next insert report a slug uniqueness conflict, as if a
    /// concurrent approval won the race.
    pub fn conflict_next_insert(&self) {
        self.conflict_next_insert.store(true, Ordering::SeqCst);
    }

    /// Make the next insert report success without storing the row, so the
    /// read-after-write verification misses.
    pub fn vanish_next_insert(&self) {
        self.vanish_next_insert.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Tool> {
        self.rows.lock().unwrap().clone()
    }

    fn build_row(new: NewTool) -> Tool {
        let now = Utc::now();
        Tool {
            id: ToolId::new(),
            name: new.name,
            slug: new.slug,
            short_description: new.short_description,
            full_description: new.full_description,
            url: new.url,
            category: new.category,
            pricing: new.pricing,
            tags: Vec::new(),
            platform: vec!["Web".to_string()],
            views: 0,
            rating: 0.0,
            review_count: 0,
            trending: false,
            featured: false,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl ToolStore for InMemoryToolStore {
    async fn insert(&self, new: NewTool) -> Result<Tool, ToolInsertError> {
        if self.conflict_next_insert.swap(false, Ordering::SeqCst) {
            return Err(ToolInsertError::DuplicateSlug);
        }
        let mut rows = self.rows.lock().unwrap();
        // Honor the real table's UNIQUE constraint
        if rows.iter().any(|t| t.slug == new.slug) {
            return Err(ToolInsertError::DuplicateSlug);
        }
        let tool = Self::build_row(new);
        if !self.vanish_next_insert.swap(false, Ordering::SeqCst) {
            rows.push(tool.clone());
        }
        Ok(tool)
    }

    async fn find_by_id(&self, id: ToolId) -> Result<Option<Tool>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|t| t.slug == slug))
    }

    async fn list_urls(&self) -> Result<Vec<String>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.url.clone())
            .collect())
    }
}
