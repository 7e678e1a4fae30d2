use tracing::info;

use crate::common::LeadListId;
use crate::domains::leads::error::LeadJobResult;
use crate::domains::leads::models::{JobStatus, LeadCursor};
use crate::kernel::ServerDeps;

/// Drop both the status and the cursor of a job.
///
/// Afterwards the job polls as `completed` and the next attempt starts from
/// the first page.
pub async fn clear_lead_error(id: LeadListId, deps: &ServerDeps) -> LeadJobResult<()> {
    JobStatus::delete(id, deps.kv.as_ref()).await?;
    LeadCursor::delete(id, deps.kv.as_ref()).await?;

    info!(lead_id = %id, "Cleared lead job status and cursor");
    Ok(())
}
