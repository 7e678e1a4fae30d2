use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Input for the curious_coder/twitter-scraper actor (followers/following mode).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterScraperInput {
    pub profile_url: String,
    /// `followers`, `following`, `verifiedFollowers`, `followersYouKnow` or `subscribedTo`.
    pub friendship_type: String,
    pub count: u32,
    pub min_delay: u32,
    pub max_delay: u32,
    /// Session cookies of the account the actor logs in as. Passed through untouched.
    pub cookie: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// A single account from the twitter-scraper dataset.
///
/// Every field is optional: the actor omits keys it could not read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwitterUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub id_str: Option<String>,
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub description: Option<String>,
    pub followers_count: Option<i64>,
    /// Number of accounts this user follows.
    pub friends_count: Option<i64>,
    pub can_dm: Option<bool>,
}

impl TwitterUser {
    /// Stable account id, preferring the string form the actor emits alongside numeric ids.
    pub fn user_id(&self) -> Option<&str> {
        self.id_str.as_deref().or(self.id.as_deref())
    }
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunData {
    pub id: String,
    pub status: String,
    pub status_message: Option<String>,
    pub default_dataset_id: String,
    pub default_key_value_store_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Output fields the actor declares on the run itself.
    #[serde(default)]
    pub output: Option<RunOutput>,
}

impl RunData {
    pub fn is_succeeded(&self) -> bool {
        self.status == "SUCCEEDED"
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status.as_str(),
            "SUCCEEDED" | "FAILED" | "ABORTED" | "TIMED-OUT"
        )
    }
}

/// Pagination fields an actor may publish in its run output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub next_cursor: Option<String>,
    pub cursor: Option<String>,
}

/// A finished run together with the dataset it produced.
#[derive(Debug, Clone)]
pub struct TwitterScrapeRun {
    pub run: RunData,
    pub users: Vec<TwitterUser>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
