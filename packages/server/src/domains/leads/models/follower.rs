use serde::{Deserialize, Serialize};

use crate::kernel::RawFollower;

/// Status label given to every freshly imported lead (not contacted yet).
pub const NEW_LEAD_STATUS: &str = "pending";

/// A DM-able account stored on a lead list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    pub id: String,
    pub name: String,
    pub screen_name: String,
    pub description: String,
    pub followers_count: i64,
    pub following_count: i64,
    #[serde(rename = "canDM")]
    pub can_dm: bool,
    pub status: String,
}

impl Follower {
    /// Map a provider entry, defaulting absent text to empty and counts to zero.
    pub fn from_raw(raw: RawFollower) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            screen_name: raw.screen_name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            followers_count: raw.followers_count.unwrap_or(0),
            following_count: raw.following_count.unwrap_or(0),
            can_dm: raw.can_dm.unwrap_or(false),
            status: NEW_LEAD_STATUS.to_string(),
        }
    }
}

/// Keep only entries the provider flagged as able to receive a direct message.
pub fn dmable_followers(entries: Vec<RawFollower>) -> Vec<Follower> {
    entries
        .into_iter()
        .map(Follower::from_raw)
        .filter(|f| f.can_dm)
        .collect()
}
