//! Client-side status poller.
//!
//! Fetches an owner's jobs on a fixed interval, publishes every snapshot on a
//! watch channel and stops by itself once nothing is `in_progress`. Each
//! poller owns its interval and cancellation token; nothing is shared between
//! pollers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::activities::{list_lead_jobs, LeadJobSummary};
use crate::common::LeadListId;
use crate::domains::leads::models::ErrorType;
use crate::kernel::ServerDeps;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Where the poller reads job summaries from.
#[async_trait]
pub trait LeadStatusSource: Send + Sync {
    async fn list(&self, owner_id: &str) -> Result<Vec<LeadJobSummary>>;
}

/// Reads straight from the stores, for callers living in the server process.
pub struct InProcessStatusSource {
    deps: ServerDeps,
}

impl InProcessStatusSource {
    pub fn new(deps: ServerDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl LeadStatusSource for InProcessStatusSource {
    async fn list(&self, owner_id: &str) -> Result<Vec<LeadJobSummary>> {
        Ok(list_lead_jobs(owner_id, &self.deps).await?)
    }
}

#[derive(serde::Deserialize)]
struct LeadsResponse {
    leads: Vec<LeadJobSummary>,
}

/// Reads `GET {base_url}/api/leads?userId=` from a running server.
pub struct HttpLeadStatusSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLeadStatusSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LeadStatusSource for HttpLeadStatusSource {
    async fn list(&self, owner_id: &str) -> Result<Vec<LeadJobSummary>> {
        let url = format!("{}/api/leads", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("userId", owner_id)])
            .send()
            .await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()
            .context("Failed to fetch lead lists")?;

        let body: LeadsResponse = response
            .json()
            .await
            .context("Failed to decode lead lists")?;
        Ok(body.leads)
    }
}

/// One poll result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollSnapshot {
    pub jobs: Vec<LeadJobSummary>,
}

impl PollSnapshot {
    pub fn has_in_progress(&self) -> bool {
        self.jobs.iter().any(LeadJobSummary::is_in_progress)
    }

    /// First job whose session credentials were rejected, if any. The user
    /// has to refresh their cookies before retrying it.
    pub fn auth_error(&self) -> Option<LeadListId> {
        self.jobs
            .iter()
            .find(|job| job.error_type == Some(ErrorType::AuthError))
            .map(|job| job.id)
    }
}

/// Why a poller stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerExit {
    /// No job left `in_progress`.
    Settled,
    Cancelled,
}

pub struct LeadJobPoller {
    source: Arc<dyn LeadStatusSource>,
    owner_id: String,
    interval: Duration,
    cancel: CancellationToken,
}

/// Handle on a running poller.
pub struct PollerHandle {
    pub snapshots: watch::Receiver<PollSnapshot>,
    cancel: CancellationToken,
    task: JoinHandle<PollerExit>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the poller to stop.
    pub async fn finished(self) -> Result<PollerExit> {
        self.task.await.context("lead job poller panicked")
    }
}

impl LeadJobPoller {
    pub fn new(source: Arc<dyn LeadStatusSource>, owner_id: impl Into<String>) -> Self {
        Self {
            source,
            owner_id: owner_id.into(),
            interval: DEFAULT_POLL_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Stop this poller together with a parent (e.g. server shutdown).
    pub fn with_parent(mut self, parent: &CancellationToken) -> Self {
        self.cancel = parent.child_token();
        self
    }

    /// Poll once right away, then every interval, on a spawned task.
    pub fn start(self) -> PollerHandle {
        let (tx, rx) = watch::channel(PollSnapshot::default());
        let cancel = self.cancel.clone();
        let task = tokio::spawn(self.run(tx));

        PollerHandle {
            snapshots: rx,
            cancel,
            task,
        }
    }

    async fn run(self, tx: watch::Sender<PollSnapshot>) -> PollerExit {
        info!(owner_id = %self.owner_id, interval_ms = self.interval.as_millis() as u64, "Lead job poller started");

        let mut reported_auth_error = None;

        loop {
            if self.cancel.is_cancelled() {
                return PollerExit::Cancelled;
            }

            match self.source.list(&self.owner_id).await {
                Ok(jobs) => {
                    let snapshot = PollSnapshot { jobs };

                    if let Some(id) = snapshot.auth_error() {
                        if reported_auth_error != Some(id) {
                            warn!(lead_id = %id, "Lead job needs fresh session cookies");
                            reported_auth_error = Some(id);
                        }
                    }

                    let settled = !snapshot.has_in_progress();
                    tx.send_replace(snapshot);

                    if settled {
                        debug!(owner_id = %self.owner_id, "No lead jobs in progress, poller stopping");
                        return PollerExit::Settled;
                    }
                }
                Err(e) => {
                    warn!(owner_id = %self.owner_id, error = %e, "Failed to poll lead jobs");
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => return PollerExit::Cancelled,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
