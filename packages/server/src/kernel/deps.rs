//! Server dependencies for lead job activities (using traits for testability)
//!
//! Every external collaborator of the job subsystem sits behind a trait so the
//! same activities run against Postgres/Redis/Apify in production and
//! in-memory doubles in tests.

use std::sync::Arc;

use crate::domains::leads::stores::LeadListStore;
use crate::kernel::{BaseFollowerScraper, BaseKeyValueStore};

/// Server dependencies accessible to activities and HTTP handlers
#[derive(Clone)]
pub struct ServerDeps {
    /// Durable lead list records
    pub lead_lists: Arc<dyn LeadListStore>,
    /// Transient `status:{id}` / `cursor:{id}` entries
    pub kv: Arc<dyn BaseKeyValueStore>,
    pub scraper: Arc<dyn BaseFollowerScraper>,
}

impl ServerDeps {
    pub fn new(
        lead_lists: Arc<dyn LeadListStore>,
        kv: Arc<dyn BaseKeyValueStore>,
        scraper: Arc<dyn BaseFollowerScraper>,
    ) -> Self {
        Self {
            lead_lists,
            kv,
            scraper,
        }
    }
}
