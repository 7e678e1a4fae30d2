use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::LeadListId;
use crate::kernel::BaseKeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    InProgress,
    Completed,
    Error,
}

impl StatusKind {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StatusKind::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The provider could not log in with the supplied session.
    AuthError,
    GeneralError,
}

/// Transient state of a job, stored under `status:{id}`.
///
/// Overwritten once at the terminal transition; `error_type` is only set
/// for `error` and `count` only for `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub status: StatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl JobStatus {
    pub fn in_progress() -> Self {
        Self {
            status: StatusKind::InProgress,
            message: Some("Scraping followers".to_string()),
            error_type: None,
            count: None,
        }
    }

    pub fn completed(count: usize) -> Self {
        Self {
            status: StatusKind::Completed,
            message: Some(format!("Imported {} leads", count)),
            error_type: None,
            count: Some(count),
        }
    }

    pub fn error(message: impl Into<String>, error_type: ErrorType) -> Self {
        Self {
            status: StatusKind::Error,
            message: Some(message.into()),
            error_type: Some(error_type),
            count: None,
        }
    }

    pub fn key(id: LeadListId) -> String {
        format!("status:{}", id)
    }

    /// Read the current status. A payload that does not decode is logged and
    /// treated as absent.
    pub async fn find(id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<Option<Self>> {
        let Some(raw) = kv.get(&Self::key(id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Self>(&raw) {
            Ok(status) => Ok(Some(status)),
            Err(e) => {
                warn!(lead_id = %id, error = %e, "Ignoring undecodable job status");
                Ok(None)
            }
        }
    }

    pub async fn save(&self, id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<()> {
        let payload = serde_json::to_string(self).context("Failed to encode job status")?;
        kv.set(&Self::key(id), &payload).await
    }

    pub async fn delete(id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<()> {
        kv.delete(&Self::key(id)).await
    }
}
