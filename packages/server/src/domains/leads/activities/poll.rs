//! Read side of lead jobs: merge durable records with transient status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::LeadListId;
use crate::domains::leads::error::{LeadJobError, LeadJobResult};
use crate::domains::leads::models::{ErrorType, Follower, JobStatus, LeadList, StatusKind};
use crate::kernel::ServerDeps;

/// A lead list as a polling client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadJobSummary {
    pub id: LeadListId,
    pub lead_name: String,
    pub total_leads: i32,
    pub created_at: DateTime<Utc>,
    pub status: StatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeadJobSummary {
    /// Without a transient status the job is taken to be finished.
    pub fn merge(list: &LeadList, status: Option<JobStatus>) -> Self {
        let (status, error_type, message) = match status {
            Some(s) => (s.status, s.error_type, s.message),
            None => (StatusKind::Completed, None, None),
        };

        Self {
            id: list.id,
            lead_name: list.name.clone(),
            total_leads: list.total_leads,
            created_at: list.created_at,
            status,
            error_type,
            message,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == StatusKind::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDetails {
    pub id: LeadListId,
    pub lead_name: String,
    pub followers: Vec<Follower>,
}

/// Poll a single job.
pub async fn poll_lead_job(id: LeadListId, deps: &ServerDeps) -> LeadJobResult<LeadJobSummary> {
    let list = deps
        .lead_lists
        .find_by_id(id)
        .await?
        .ok_or(LeadJobError::NotFound(id))?;

    let status = JobStatus::find(id, deps.kv.as_ref()).await?;
    Ok(LeadJobSummary::merge(&list, status))
}

/// Poll every job of an owner, newest first. A blank owner has no jobs.
pub async fn list_lead_jobs(owner_id: &str, deps: &ServerDeps) -> LeadJobResult<Vec<LeadJobSummary>> {
    let owner_id = owner_id.trim();
    if owner_id.is_empty() {
        return Ok(Vec::new());
    }

    let lists = deps.lead_lists.find_by_owner(owner_id).await?;

    let mut summaries = Vec::with_capacity(lists.len());
    for list in &lists {
        let status = JobStatus::find(list.id, deps.kv.as_ref()).await?;
        summaries.push(LeadJobSummary::merge(list, status));
    }

    Ok(summaries)
}

pub async fn get_lead_details(id: LeadListId, deps: &ServerDeps) -> LeadJobResult<LeadDetails> {
    let list = deps
        .lead_lists
        .find_by_id(id)
        .await?
        .ok_or(LeadJobError::NotFound(id))?;

    Ok(LeadDetails {
        id: list.id,
        lead_name: list.name,
        followers: list.followers,
    })
}
