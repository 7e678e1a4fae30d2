use thiserror::Error;

use crate::common::LeadListId;

/// Errors a caller of the lead job operations can observe synchronously.
///
/// Provider failures never appear here: once a job id has been handed out,
/// its outcome is only visible through the job status.
#[derive(Debug, Error)]
pub enum LeadJobError {
    /// Missing or malformed input. The job was not created.
    #[error("{0}")]
    Validation(String),

    #[error("lead list not found: {0}")]
    NotFound(LeadListId),

    /// The job already has an attempt running.
    #[error("lead list is still importing: {0}")]
    Conflict(LeadListId),

    /// Record or status persistence failed.
    #[error("storage error: {0}")]
    Store(#[from] anyhow::Error),
}

impl LeadJobError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type LeadJobResult<T> = std::result::Result<T, LeadJobError>;
