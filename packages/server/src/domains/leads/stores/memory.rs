//! In-memory lead list storage for testing and development.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::LeadListStore;
use crate::common::LeadListId;
use crate::domains::leads::models::{Follower, LeadList};

/// Not suitable for production: data is lost on restart.
#[derive(Default)]
pub struct MemoryLeadListStore {
    lists: RwLock<HashMap<LeadListId, LeadList>>,
}

impl MemoryLeadListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored lists.
    pub fn len(&self) -> usize {
        self.lists.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a list as-is (fixtures with chosen timestamps).
    pub fn insert(&self, list: LeadList) {
        self.lists
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(list.id, list);
    }
}

#[async_trait]
impl LeadListStore for MemoryLeadListStore {
    async fn create(&self, owner_id: &str, name: &str) -> Result<LeadList> {
        let list = LeadList::new(owner_id, name);
        self.insert(list.clone());
        Ok(list)
    }

    async fn update_followers(&self, id: LeadListId, followers: &[Follower]) -> Result<bool> {
        let mut lists = self.lists.write().unwrap_or_else(|e| e.into_inner());
        match lists.get_mut(&id) {
            Some(list) => {
                list.set_followers(followers.to_vec());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: LeadListId) -> Result<Option<LeadList>> {
        Ok(self
            .lists
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<LeadList>> {
        let mut owned: Vec<LeadList> = self
            .lists
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn delete(&self, id: LeadListId) -> Result<bool> {
        Ok(self
            .lists
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some())
    }
}
