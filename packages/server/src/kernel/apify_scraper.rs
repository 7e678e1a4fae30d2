//! Follower scraper backed by the Apify twitter-scraper actor.

use std::sync::Arc;

use apify_client::{ApifyClient, RunData, TwitterScraperInput, TwitterUser};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{BaseFollowerScraper, RawFollower, ScrapeError, ScrapeOutcome, ScrapeRequest};

/// Raw entries requested per wanted entry. Not every account accepts direct
/// messages, so the actor is asked for more than the caller's target.
/// Empirical ratio, tune if DM-able yields drift.
pub const OVERFETCH_FACTOR: u32 = 2;

/// Actor throttling between requests, in seconds.
const MIN_DELAY_SECS: u32 = 1;
const MAX_DELAY_SECS: u32 = 15;

/// Where a next-page cursor may be found after a run, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorSource {
    /// Fields the actor declares on the run output.
    RunOutput,
    /// A record in the run's default key-value store.
    KeyValueRecord(&'static str),
}

const CURSOR_SOURCES: &[CursorSource] = &[
    CursorSource::RunOutput,
    CursorSource::KeyValueRecord("NEXT_CURSOR"),
    CursorSource::KeyValueRecord("CURSOR"),
];

pub struct ApifyFollowerScraper {
    apify: Arc<ApifyClient>,
}

impl ApifyFollowerScraper {
    pub fn new(apify: Arc<ApifyClient>) -> Self {
        Self { apify }
    }

    /// Walk [`CURSOR_SOURCES`] and return the first non-empty token.
    /// `None` means the provider signalled no further pages.
    async fn extract_cursor(&self, run: &RunData) -> Option<String> {
        for source in CURSOR_SOURCES {
            let found = match source {
                CursorSource::RunOutput => cursor_from_output(run),
                CursorSource::KeyValueRecord(key) => {
                    let Some(store_id) = run.default_key_value_store_id.as_deref() else {
                        continue;
                    };
                    match self
                        .apify
                        .get_record::<serde_json::Value>(store_id, key)
                        .await
                    {
                        Ok(record) => record.as_ref().and_then(cursor_from_record),
                        Err(e) => {
                            warn!(run_id = %run.id, key, error = %e, "Failed to read cursor record");
                            None
                        }
                    }
                }
            };

            if let Some(cursor) = found {
                debug!(run_id = %run.id, ?source, "Found next cursor");
                return Some(cursor);
            }
        }
        None
    }
}

#[async_trait]
impl BaseFollowerScraper for ApifyFollowerScraper {
    async fn execute(
        &self,
        request: &ScrapeRequest,
        cursor: Option<&str>,
    ) -> Result<ScrapeOutcome, ScrapeError> {
        let input = TwitterScraperInput {
            profile_url: request.profile_url.clone(),
            friendship_type: request.friendship_type.clone(),
            count: request.desired_count.saturating_mul(OVERFETCH_FACTOR),
            min_delay: MIN_DELAY_SECS,
            max_delay: MAX_DELAY_SECS,
            cookie: request.credentials.clone(),
            cursor: cursor.map(str::to_string),
        };

        let scrape = self
            .apify
            .scrape_twitter_relationships(&input)
            .await
            .map_err(|e| ScrapeError::new(e.to_string()))?;

        let next_cursor = self.extract_cursor(&scrape.run).await;

        info!(
            run_id = %scrape.run.id,
            entries = scrape.users.len(),
            has_next_cursor = next_cursor.is_some(),
            "Follower scrape finished"
        );

        Ok(ScrapeOutcome {
            entries: scrape.users.into_iter().map(raw_follower).collect(),
            next_cursor,
        })
    }
}

fn raw_follower(user: TwitterUser) -> RawFollower {
    RawFollower {
        id: user.user_id().map(str::to_string),
        name: user.name,
        screen_name: user.screen_name,
        description: user.description,
        followers_count: user.followers_count,
        following_count: user.friends_count,
        can_dm: user.can_dm,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn cursor_from_output(run: &RunData) -> Option<String> {
    let output = run.output.as_ref()?;
    non_empty(output.next_cursor.as_deref()).or_else(|| non_empty(output.cursor.as_deref()))
}

/// A cursor record is either a bare JSON string or an object carrying one.
fn cursor_from_record(record: &serde_json::Value) -> Option<String> {
    match record {
        serde_json::Value::String(s) => non_empty(Some(s)),
        serde_json::Value::Object(map) => ["nextCursor", "cursor"]
            .iter()
            .find_map(|field| non_empty(map.get(*field).and_then(|v| v.as_str()))),
        _ => None,
    }
}
