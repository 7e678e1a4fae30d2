// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The lead import flow (filtering, status transitions, cursor policy) lives in
// domains/leads and only talks to the outside world through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseFollowerScraper)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Follower Scraper Trait (Infrastructure - external scraping provider)
// =============================================================================

/// One scrape attempt against the provider.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// Full profile URL, e.g. `https://x.com/rustlang`.
    pub profile_url: String,
    /// Relationship to fetch, in the provider's vocabulary (`followers`, `following`, ...).
    pub friendship_type: String,
    /// Number of entries the caller wants. Adapters may fetch more to
    /// make up for entries dropped by later filtering.
    pub desired_count: u32,
    /// Opaque session material the provider logs in with.
    pub credentials: serde_json::Value,
}

/// A raw entry as returned by the provider, before filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFollower {
    pub id: Option<String>,
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub description: Option<String>,
    pub followers_count: Option<i64>,
    pub following_count: Option<i64>,
    pub can_dm: Option<bool>,
}

/// Result of a successful scrape attempt.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub entries: Vec<RawFollower>,
    /// Token to resume from; `None` when the provider reported no further pages.
    pub next_cursor: Option<String>,
}

/// A failed scrape attempt. The message is the provider's own wording.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ScrapeError {
    pub message: String,
}

impl ScrapeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait BaseFollowerScraper: Send + Sync {
    /// Run one scrape. Stateless and safe to retry.
    async fn execute(
        &self,
        request: &ScrapeRequest,
        cursor: Option<&str>,
    ) -> std::result::Result<ScrapeOutcome, ScrapeError>;
}

// =============================================================================
// Key-Value Store Trait (Infrastructure - transient per-job state)
// =============================================================================

/// String key-value store with last-write-wins semantics.
#[async_trait]
pub trait BaseKeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite `key` with `value`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Cheap connectivity check for the health endpoint.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
