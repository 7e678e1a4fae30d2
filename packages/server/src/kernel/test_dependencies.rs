// TestDependencies - in-memory implementations for testing
//
// Provides doubles for every ServerDeps collaborator so activities and routes
// can be exercised without Postgres, Redis or Apify.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::{
    BaseFollowerScraper, BaseKeyValueStore, RawFollower, ScrapeError, ScrapeOutcome,
    ScrapeRequest, ServerDeps,
};
use crate::domains::leads::stores::MemoryLeadListStore;

// =============================================================================
// Memory Key-Value Store
// =============================================================================

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).contains_key(key)
    }

    /// Make every subsequent `set` fail, simulating an unavailable store.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseKeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("key-value store unavailable");
        }
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
        Ok(())
    }
}

// =============================================================================
// Mock Follower Scraper
// =============================================================================

/// Arguments captured from an execute call
#[derive(Debug, Clone)]
pub struct ScrapeCall {
    pub request: ScrapeRequest,
    pub cursor: Option<String>,
}

/// Scripted scraper: returns queued results in order, then empty pages.
pub struct MockFollowerScraper {
    responses: Mutex<VecDeque<Result<ScrapeOutcome, ScrapeError>>>,
    calls: Mutex<Vec<ScrapeCall>>,
    gate: Option<Semaphore>,
}

impl Default for MockFollowerScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFollowerScraper {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// A scraper whose calls block until [`release`](Self::release) is called.
    pub fn held() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Let `n` blocked (or future) calls proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn with_outcome(self, entries: Vec<RawFollower>, next_cursor: Option<&str>) -> Self {
        self.push_outcome(entries, next_cursor);
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.push_error(message);
        self
    }

    pub fn push_outcome(&self, entries: Vec<RawFollower>, next_cursor: Option<&str>) {
        self.responses.lock().unwrap_or_else(|e| e.into_inner()).push_back(Ok(ScrapeOutcome {
            entries,
            next_cursor: next_cursor.map(str::to_string),
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(ScrapeError::new(message)));
    }

    pub fn calls(&self) -> Vec<ScrapeCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Cursors forwarded so far, one per call.
    pub fn forwarded_cursors(&self) -> Vec<Option<String>> {
        self.calls().into_iter().map(|c| c.cursor).collect()
    }
}

#[async_trait]
impl BaseFollowerScraper for MockFollowerScraper {
    async fn execute(
        &self,
        request: &ScrapeRequest,
        cursor: Option<&str>,
    ) -> Result<ScrapeOutcome, ScrapeError> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(ScrapeCall {
            request: request.clone(),
            cursor: cursor.map(str::to_string),
        });

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(ScrapeOutcome::default()))
    }
}

/// Build `count` provider entries, the first `dmable` of which accept DMs.
pub fn raw_followers(count: usize, dmable: usize) -> Vec<RawFollower> {
    (0..count)
        .map(|i| RawFollower {
            id: Some(format!("{}", 1000 + i)),
            name: Some(format!("Follower {}", i)),
            screen_name: Some(format!("follower_{}", i)),
            description: None,
            followers_count: Some(i as i64),
            following_count: None,
            can_dm: Some(i < dmable),
        })
        .collect()
}

// =============================================================================
// TestDependencies
// =============================================================================

/// In-memory ServerDeps with handles kept for inspection.
pub struct TestDependencies {
    pub lead_lists: Arc<MemoryLeadListStore>,
    pub kv: Arc<MemoryKeyValueStore>,
    pub scraper: Arc<MockFollowerScraper>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_scraper(MockFollowerScraper::new())
    }

    pub fn with_scraper(scraper: MockFollowerScraper) -> Self {
        Self {
            lead_lists: Arc::new(MemoryLeadListStore::new()),
            kv: Arc::new(MemoryKeyValueStore::new()),
            scraper: Arc::new(scraper),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.lead_lists.clone(),
            self.kv.clone(),
            self.scraper.clone(),
        )
    }
}
