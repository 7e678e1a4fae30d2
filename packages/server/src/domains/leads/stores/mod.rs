//! Durable storage for lead lists.
//!
//! Available backends:
//! - `PostgresLeadListStore` - `lead_lists` table (production)
//! - `MemoryLeadListStore` - In-memory storage (tests and local runs)

pub mod memory;
pub mod postgres;

pub use memory::MemoryLeadListStore;
pub use postgres::PostgresLeadListStore;

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Follower, LeadList};
use crate::common::LeadListId;

/// Durable record store for import jobs.
///
/// `update_followers` is the only mutation after `create`. It normally runs
/// once per job; a second call overwrites the first.
#[async_trait]
pub trait LeadListStore: Send + Sync {
    /// Insert an empty list and return it.
    async fn create(&self, owner_id: &str, name: &str) -> Result<LeadList>;

    /// Set followers and total together. Returns `false` if the list no longer exists.
    async fn update_followers(&self, id: LeadListId, followers: &[Follower]) -> Result<bool>;

    async fn find_by_id(&self, id: LeadListId) -> Result<Option<LeadList>>;

    /// All lists of an owner, newest first.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<LeadList>>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: LeadListId) -> Result<bool>;

    /// Cheap connectivity check for the health endpoint.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
