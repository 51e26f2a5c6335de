use std::collections::HashSet;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub chat_bot_token: String,
    pub row_store_id: String,
    pub row_store_credentials: String,
    pub admin_user_ids: HashSet<i64>,
    pub payment_provider: String,
    pub webhook_secret: String,
    pub http_addr: String,
    pub base_public_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            chat_bot_token: std::env::var("CHAT_BOT_TOKEN")
                .context("Cannot load CHAT_BOT_TOKEN env variable")?,
            row_store_id: std::env::var("ROW_STORE_ID")
                .context("Cannot load ROW_STORE_ID env variable")?,
            row_store_credentials: std::env::var("ROW_STORE_CREDENTIALS")
                .context("Cannot load ROW_STORE_CREDENTIALS env variable")?,
            admin_user_ids: parse_admin_ids(
                &std::env::var("ADMIN_USER_IDS").unwrap_or_default(),
            ),
            payment_provider: std::env::var("PAYMENT_PROVIDER")
                .unwrap_or_else(|_| "stub".into()),
            webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET")
                .unwrap_or_else(|_| "change-me".into()),
            http_addr: std::env::var("HTTP_ADDR").unwrap_or_else(|_| ":8080".into()),
            base_public_url: std::env::var("BASE_PUBLIC_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Bind address with the host filled in when the env value is of
    /// the `:8080` form.
    pub fn bind_addr(&self) -> String {
        if self.http_addr.starts_with(':') {
            format!("0.0.0.0{}", self.http_addr)
        } else {
            self.http_addr.clone()
        }
    }
}

/// Comma-separated chat user ids; whitespace and unparsable entries
/// are skipped.
fn parse_admin_ids(raw: &str) -> HashSet<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}
