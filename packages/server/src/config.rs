use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,
    pub apify_api_token: String,
    pub apify_twitter_actor: String,
    /// Expiry applied to status and cursor keys. `None` keeps them until cleared.
    pub status_ttl_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            apify_api_token: env::var("APIFY_API_TOKEN")
                .context("APIFY_API_TOKEN must be set")?,
            apify_twitter_actor: env::var("APIFY_TWITTER_ACTOR")
                .unwrap_or_else(|_| apify_client::TWITTER_SCRAPER.to_string()),
            status_ttl_secs: parse_ttl(env::var("STATUS_TTL_SECS").ok())?,
        })
    }
}

fn parse_ttl(raw: Option<String>) -> Result<Option<u64>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let secs: u64 = value
                .parse()
                .context("STATUS_TTL_SECS must be a whole number of seconds")?;
            Ok((secs > 0).then_some(secs))
        }
    }
}
