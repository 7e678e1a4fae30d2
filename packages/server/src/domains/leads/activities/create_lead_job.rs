//! Lead job entry points - validate input, record the job, start detached execution

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info};
use typed_builder::TypedBuilder;

use super::run_lead_job::run_lead_job;
use crate::common::LeadListId;
use crate::domains::leads::error::{LeadJobError, LeadJobResult};
use crate::domains::leads::models::{FriendshipType, JobStatus, StatusKind};
use crate::kernel::{ScrapeRequest, ServerDeps};

/// Upper bound on entries a single import may ask for.
pub const MAX_LEAD_COUNT: u32 = 10_000;

/// Input for a new import job.
#[derive(Clone, Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateLeadJob {
    pub owner_id: String,
    /// Handle, `@handle`, or profile URL.
    pub profile: String,
    pub count: i64,
    /// Session cookies for the provider, passed through untouched.
    pub credentials: serde_json::Value,
    /// Defaults to `{handle}_{YYYYMMDDHHMM}` when blank.
    #[builder(default)]
    pub lead_name: Option<String>,
    #[builder(default)]
    pub friendship_type: FriendshipType,
}

/// Input for re-running an existing job under the same id.
#[derive(Clone, Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct RetryLeadJob {
    pub profile: String,
    pub count: i64,
    pub credentials: serde_json::Value,
    #[builder(default)]
    pub friendship_type: FriendshipType,
}

/// What the caller gets back before any scraping happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadJobAccepted {
    pub status: StatusKind,
    pub job_id: LeadListId,
}

/// A job whose detached execution has been spawned.
///
/// Dropping `task` detaches it; awaiting it waits for the terminal writes.
#[derive(Debug)]
pub struct StartedLeadJob {
    pub job_id: LeadListId,
    pub task: JoinHandle<()>,
}

impl StartedLeadJob {
    pub fn accepted(&self) -> LeadJobAccepted {
        LeadJobAccepted {
            status: StatusKind::InProgress,
            job_id: self.job_id,
        }
    }
}

/// Create a lead list and start importing into it.
///
/// Blocks only on the record insert and the initial `in_progress` write.
/// Everything after that is reported through the job status.
pub async fn create_lead_job(input: CreateLeadJob, deps: &ServerDeps) -> LeadJobResult<StartedLeadJob> {
    let owner_id = input.owner_id.trim();
    if owner_id.is_empty() {
        return Err(LeadJobError::validation("userId is required"));
    }

    let (handle, request) = scrape_request(
        &input.profile,
        input.count,
        input.credentials,
        input.friendship_type,
    )?;

    let name = match input.lead_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_lead_name(&handle),
    };

    let list = deps.lead_lists.create(owner_id, &name).await?;

    // Record and initial status commit together; a record without a status
    // would poll as an empty completed import.
    if let Err(e) = JobStatus::in_progress().save(list.id, deps.kv.as_ref()).await {
        if let Err(delete_err) = deps.lead_lists.delete(list.id).await {
            error!(
                lead_id = %list.id,
                error = %delete_err,
                "Failed to remove lead list after status write failure"
            );
        }
        return Err(e.into());
    }

    info!(
        lead_id = %list.id,
        owner_id = %owner_id,
        profile = %request.profile_url,
        friendship_type = %request.friendship_type,
        count = request.desired_count,
        "Lead job created"
    );

    Ok(spawn_lead_job(list.id, request, deps))
}

/// Re-run an existing job. A stored cursor from an earlier attempt is picked
/// up by the normal execution path.
///
/// Only one attempt per job runs at a time: a job still `in_progress` is
/// rejected with [`LeadJobError::Conflict`].
pub async fn retry_lead_job(
    id: LeadListId,
    input: RetryLeadJob,
    deps: &ServerDeps,
) -> LeadJobResult<StartedLeadJob> {
    if deps.lead_lists.find_by_id(id).await?.is_none() {
        return Err(LeadJobError::NotFound(id));
    }

    if let Some(status) = JobStatus::find(id, deps.kv.as_ref()).await? {
        if status.status == StatusKind::InProgress {
            return Err(LeadJobError::Conflict(id));
        }
    }

    let (_, request) = scrape_request(
        &input.profile,
        input.count,
        input.credentials,
        input.friendship_type,
    )?;

    JobStatus::in_progress().save(id, deps.kv.as_ref()).await?;

    info!(lead_id = %id, profile = %request.profile_url, "Lead job retried");

    Ok(spawn_lead_job(id, request, deps))
}

fn spawn_lead_job(id: LeadListId, request: ScrapeRequest, deps: &ServerDeps) -> StartedLeadJob {
    let deps = deps.clone();
    let task = tokio::spawn(async move {
        run_lead_job(id, request, &deps).await;
    });

    StartedLeadJob { job_id: id, task }
}

/// Validate the scrape parameters shared by create and retry.
fn scrape_request(
    profile: &str,
    count: i64,
    credentials: serde_json::Value,
    friendship_type: FriendshipType,
) -> LeadJobResult<(String, ScrapeRequest)> {
    let handle = normalize_handle(profile)
        .ok_or_else(|| LeadJobError::validation("profileUrl is required"))?;

    let desired_count = u32::try_from(count)
        .ok()
        .filter(|c| (1..=MAX_LEAD_COUNT).contains(c))
        .ok_or_else(|| {
            LeadJobError::validation(format!("count must be between 1 and {}", MAX_LEAD_COUNT))
        })?;

    if !has_credentials(&credentials) {
        return Err(LeadJobError::validation("cookies are required"));
    }

    let request = ScrapeRequest {
        profile_url: profile_url(&handle),
        friendship_type: friendship_type.as_str().to_string(),
        desired_count,
        credentials,
    };

    Ok((handle, request))
}

/// Reduce a handle, `@handle` or x.com/twitter.com URL to the bare handle.
pub fn normalize_handle(raw: &str) -> Option<String> {
    let mut rest = raw.trim();

    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
        }
    }
    if let Some(stripped) = rest.strip_prefix("www.") {
        rest = stripped;
    }
    for host in ["x.com/", "twitter.com/"] {
        if let Some(stripped) = rest.strip_prefix(host) {
            rest = stripped;
        }
    }

    let handle = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('@');

    (!handle.is_empty()).then(|| handle.to_string())
}

pub fn profile_url(handle: &str) -> String {
    format!("https://x.com/{}", handle)
}

fn default_lead_name(handle: &str) -> String {
    format!("{}_{}", handle, Utc::now().format("%Y%m%d%H%M"))
}

fn has_credentials(credentials: &serde_json::Value) -> bool {
    match credentials {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
