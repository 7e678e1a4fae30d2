use tracing::info;

use crate::common::LeadListId;
use crate::domains::leads::error::{LeadJobError, LeadJobResult};
use crate::kernel::ServerDeps;

/// Delete the durable record. Status and cursor keys are left behind; they
/// expire (when a TTL is configured) or can be cleared separately.
pub async fn delete_lead_job(id: LeadListId, deps: &ServerDeps) -> LeadJobResult<()> {
    if !deps.lead_lists.delete(id).await? {
        return Err(LeadJobError::NotFound(id));
    }

    info!(lead_id = %id, "Lead list deleted");
    Ok(())
}
