//! Kernel module - server infrastructure and dependencies.

pub mod apify_scraper;
pub mod deps;
pub mod redis_store;
pub mod test_dependencies;
pub mod traits;

pub use apify_scraper::{ApifyFollowerScraper, OVERFETCH_FACTOR};
pub use deps::ServerDeps;
pub use redis_store::RedisKeyValueStore;
pub use test_dependencies::{
    raw_followers, MemoryKeyValueStore, MockFollowerScraper, ScrapeCall, TestDependencies,
};
pub use traits::*;
