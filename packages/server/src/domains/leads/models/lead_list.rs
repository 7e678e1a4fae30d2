use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Follower;
use crate::common::LeadListId;

/// Durable record of one follower import job.
///
/// `followers` is written once, when the job completes, and `total_leads`
/// always equals `followers.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadList {
    pub id: LeadListId,
    #[serde(rename = "leadName")]
    pub name: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub followers: Vec<Follower>,
    pub total_leads: i32,
    pub created_at: DateTime<Utc>,
}

impl LeadList {
    /// A freshly created, still empty list.
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LeadListId::new(),
            name: name.into(),
            owner_id: owner_id.into(),
            followers: Vec::new(),
            total_leads: 0,
            created_at: Utc::now(),
        }
    }

    /// Replace the followers and keep the count in step.
    pub fn set_followers(&mut self, followers: Vec<Follower>) {
        self.total_leads = followers_total(&followers);
        self.followers = followers;
    }
}

/// Row count as stored in the `total_leads` column.
pub fn followers_total(followers: &[Follower]) -> i32 {
    i32::try_from(followers.len()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::RawFollower;

    #[test]
    fn new_list_is_empty() {
        let list = LeadList::new("user-1", "rustlang_202601011200");
        assert!(list.followers.is_empty());
        assert_eq!(list.total_leads, 0);
        assert_eq!(list.owner_id, "user-1");
    }

    #[test]
    fn set_followers_updates_total() {
        let mut list = LeadList::new("user-1", "list");
        let follower = Follower::from_raw(RawFollower {
            can_dm: Some(true),
            ..Default::default()
        });
        list.set_followers(vec![follower.clone(), follower]);
        assert_eq!(list.total_leads, 2);
        assert_eq!(list.followers.len(), 2);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let list = LeadList::new("user-1", "list");
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["leadName"], "list");
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["totalLeads"], 0);
        assert!(json.get("createdAt").is_some());
    }
}
