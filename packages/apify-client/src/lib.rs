//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! polling for completion, fetching dataset results and reading records from
//! a run's key-value store.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, TwitterScraperInput};
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let scrape = client.scrape_twitter_relationships(&input).await?;
//! for user in &scrape.users {
//!     println!("{}", user.screen_name.as_deref().unwrap_or("(unknown)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    RunData, RunOutput, TwitterScrapeRun, TwitterScraperInput, TwitterUser,
};

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for curious_coder/twitter-scraper (`~` separates owner and name in API paths).
pub const TWITTER_SCRAPER: &str = "curious_coder~twitter-scraper";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    twitter_actor: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
            twitter_actor: TWITTER_SCRAPER.to_string(),
        }
    }

    /// Point the client at a different API root (self-hosted proxy or test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different actor for follower scraping.
    pub fn with_twitter_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.twitter_actor = actor_id.into();
        self
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = ensure_success(resp).await?.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    ///
    /// Any terminal status other than `SUCCEEDED` is returned as
    /// [`ApifyError::RunFailed`] carrying the run's status message.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish=60",
                self.base_url, run_id
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let api_resp: ApiResponse<RunData> = ensure_success(resp).await?.json().await?;
            let run = api_resp.data;

            if run.is_succeeded() {
                return Ok(run);
            }
            if run.is_terminal() {
                return Err(ApifyError::RunFailed {
                    status: run.status,
                    message: run.status_message,
                });
            }

            tracing::debug!(run_id, status = %run.status, "Run still in progress");
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&clean=true",
            self.base_url, dataset_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let items: Vec<T> = ensure_success(resp).await?.json().await?;
        Ok(items)
    }

    /// Read a record from a key-value store. Returns `None` when the key does not exist.
    pub async fn get_record<T: DeserializeOwned>(
        &self,
        store_id: &str,
        key: &str,
    ) -> Result<Option<T>> {
        let url = format!(
            "{}/key-value-stores/{}/records/{}",
            self.base_url, store_id, key
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let value: T = ensure_success(resp).await?.json().await?;
        Ok(Some(value))
    }

    /// Scrape followers (or another relationship) of a profile end-to-end:
    /// start run, poll, fetch results.
    pub async fn scrape_twitter_relationships(
        &self,
        input: &TwitterScraperInput,
    ) -> Result<TwitterScrapeRun> {
        tracing::info!(
            profile_url = %input.profile_url,
            friendship_type = %input.friendship_type,
            count = input.count,
            resuming = input.cursor.is_some(),
            "Starting Twitter relationship scrape"
        );

        let run = self.start_run(&self.twitter_actor, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let users: Vec<TwitterUser> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = users.len(), "Fetched Twitter accounts");

        Ok(TwitterScrapeRun {
            run: completed,
            users,
        })
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApifyError::Api {
        status: status.as_u16(),
        message: body,
    })
}
