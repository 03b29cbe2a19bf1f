use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Resend API key. Absent in development: emails are logged and skipped.
    pub resend_api_key: Option<String>,
    /// Sender address for transactional email
    pub email_from: String,
    /// Where admin alerts about new submissions go
    pub admin_email: String,
    /// Public site base URL, used in approval emails ({site_url}/tool/{slug})
    pub site_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "AI Tool List <noreply@aitoollist.io>".to_string()),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@aitoollist.io".to_string()),
            site_url: env::var("SITE_URL")
                .unwrap_or_else(|_| "https://aitoollist.io".to_string()),
        })
    }
}
