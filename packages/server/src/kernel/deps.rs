//! Server dependencies for domain actions (using traits for testability)
//!
//! The intake validator and moderation executor receive everything through
//! this container: stores, mailer, and the handful of settings they need.
//! No ambient singletons - the container is constructed once at startup and
//! passed down explicitly.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::domains::submissions::models::SubmissionStore;
use crate::domains::tools::models::ToolStore;
use crate::kernel::{BaseMailer, ResendMailer};

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub submissions: Arc<dyn SubmissionStore>,
    pub tools: Arc<dyn ToolStore>,
    pub mailer: Arc<dyn BaseMailer>,
    /// Public site base URL, used to build the link in approval emails
    pub site_url: String,
    /// Where admin alerts about new submissions go
    pub admin_email: String,
}

impl ServerDeps {
    pub fn new(
        submissions: Arc<dyn SubmissionStore>,
        tools: Arc<dyn ToolStore>,
        mailer: Arc<dyn BaseMailer>,
        site_url: String,
        admin_email: String,
    ) -> Self {
        Self {
            submissions,
            tools,
            mailer,
            site_url,
            admin_email,
        }
    }

    /// Production wiring: both stores backed by the same Postgres pool,
    /// email through Resend.
    pub fn postgres(pool: PgPool, config: &Config) -> Self {
        let mailer = ResendMailer::new(config.resend_api_key.clone(), config.email_from.clone());
        Self {
            submissions: Arc::new(pool.clone()),
            tools: Arc::new(pool),
            mailer: Arc::new(mailer),
            site_url: config.site_url.clone(),
            admin_email: config.admin_email.clone(),
        }
    }
}
