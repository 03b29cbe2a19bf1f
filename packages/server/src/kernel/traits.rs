// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Business logic
// (like "approve a submission") lives in domain action functions that use
// these traits. Store traits live next to their models in domains/*/models.
//
// Naming convention: Base* for trait names (e.g., BaseMailer)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Mailer Trait (Infrastructure - transactional email)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send a single transactional email.
    ///
    /// Callers treat this as fire-and-forget: failures are logged, never
    /// allowed to fail the state transition that triggered the send.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}
