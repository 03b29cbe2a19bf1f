use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use super::BaseMailer;

/// Resend transactional email client
///
/// Without an API key (local development) sends are logged and skipped
/// instead of failing, so the pipeline behaves the same either way.
pub struct ResendMailer {
    client: Client,
    api_key: Option<String>,
    from: String,
}

#[derive(Debug, Serialize)]
struct ResendMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl BaseMailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let Some(api_key) = &self.api_key else {
            warn!("RESEND_API_KEY not configured; skipping email to {}", to);
            return Ok(());
        };

        let message = ResendMessage {
            from: &self.from,
            to,
            subject,
            html,
        };

        info!("Sending email to {}: {}", to, subject);

        let response = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Resend API error {}: {}", status, body);
        }

        Ok(())
    }
}
