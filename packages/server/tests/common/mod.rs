//! Shared test harness: ServerDeps wired to in-memory stores and a
//! recording mailer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use server_core::domains::submissions::data::SubmitToolRequest;
use server_core::domains::submissions::models::{NewSubmission, SubmissionStatus};
use server_core::kernel::test_dependencies::{
    InMemorySubmissionStore, InMemoryToolStore, MockMailer,
};
use server_core::kernel::{BaseMailer, ServerDeps};

pub const ADMIN_EMAIL: &str = "admin@aitoollist.io";
pub const SITE_URL: &str = "https://aitoollist.io";

pub struct TestHarness {
    pub deps: ServerDeps,
    pub submissions: Arc<InMemorySubmissionStore>,
    pub tools: Arc<InMemoryToolStore>,
    pub mailer: Arc<MockMailer>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_mailer(Arc::new(MockMailer::new()))
    }

    pub fn with_mailer(mailer: Arc<MockMailer>) -> Self {
        let submissions = Arc::new(InMemorySubmissionStore::new());
        let tools = Arc::new(InMemoryToolStore::new());
        let deps = ServerDeps::new(
            submissions.clone(),
            tools.clone(),
            mailer.clone() as Arc<dyn BaseMailer>,
            SITE_URL.to_string(),
            ADMIN_EMAIL.to_string(),
        );
        Self {
            deps,
            submissions,
            tools,
            mailer,
        }
    }

    /// Seed a submission row directly, bypassing intake validation.
    pub fn seed_submission(
        &self,
        url: &str,
        status: SubmissionStatus,
        created_at: DateTime<Utc>,
    ) -> server_core::domains::submissions::models::ToolSubmission {
        self.submissions.insert_at(
            NewSubmission {
                tool_name: "Acme AI".to_string(),
                tool_url: url.to_string(),
                description: "A tool that writes code.".to_string(),
                full_description: None,
                category: "Developer Tools".to_string(),
                pricing: "Freemium".to_string(),
                submitter_name: Some("Jane".to_string()),
                submitter_email: "jane@acme.ai".to_string(),
                status,
                flag_reason: None,
            },
            created_at,
        )
    }
}

/// A request that passes every intake layer.
pub fn valid_request() -> SubmitToolRequest {
    SubmitToolRequest {
        tool_name: "Acme AI".to_string(),
        tool_url: "https://acme.ai/".to_string(),
        description: "A tool that writes code.".to_string(),
        full_description: Some("Acme AI writes code so you don't have to.".to_string()),
        category: "Developer Tools".to_string(),
        pricing: "Freemium".to_string(),
        submitter_name: Some("Jane".to_string()),
        submitter_email: "jane@acme.ai".to_string(),
        website_honey: None,
        submission_start_time: Some(Utc::now().timestamp_millis() - 5000),
    }
}
