//! Detached execution of one lead job.
//!
//! Nothing here returns an error: once the job id has been handed out, every
//! outcome (provider failure or store failure) ends up in the job status or
//! in the logs.

use tracing::{error, info, warn};

use super::classify::classify_error;
use crate::common::LeadListId;
use crate::domains::leads::models::{dmable_followers, ErrorType, JobStatus, LeadCursor};
use crate::kernel::{ScrapeError, ScrapeOutcome, ScrapeRequest, ServerDeps};

/// Status message recorded when the finished import could not be saved.
const SAVE_FAILED_MESSAGE: &str = "Failed to save imported leads";

/// Run one scrape attempt for `id` and record its outcome.
pub async fn run_lead_job(id: LeadListId, request: ScrapeRequest, deps: &ServerDeps) {
    let cursor = match LeadCursor::find(id, deps.kv.as_ref()).await {
        Ok(cursor) => cursor,
        Err(e) => {
            warn!(lead_id = %id, error = %e, "Failed to read cursor, starting from the beginning");
            LeadCursor::Unset
        }
    };

    info!(
        lead_id = %id,
        resuming = cursor.forwardable().is_some(),
        "Starting follower scrape"
    );

    match deps.scraper.execute(&request, cursor.forwardable()).await {
        Ok(outcome) => record_success(id, outcome, deps).await,
        Err(e) => record_failure(id, e, deps).await,
    }
}

async fn record_success(id: LeadListId, outcome: ScrapeOutcome, deps: &ServerDeps) {
    let fetched = outcome.entries.len();
    let followers = dmable_followers(outcome.entries);
    let count = followers.len();

    // Record first: a poller that sees `completed` must also see the followers.
    match deps.lead_lists.update_followers(id, &followers).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(lead_id = %id, "Lead list deleted while importing, dropping results");
            return;
        }
        Err(e) => {
            error!(lead_id = %id, error = %e, "Failed to save imported leads");
            let status = JobStatus::error(SAVE_FAILED_MESSAGE, ErrorType::GeneralError);
            if let Err(e) = status.save(id, deps.kv.as_ref()).await {
                error!(lead_id = %id, error = %e, "Failed to write job status");
            }
            return;
        }
    }

    if let Err(e) = JobStatus::completed(count).save(id, deps.kv.as_ref()).await {
        error!(lead_id = %id, error = %e, "Failed to write completed status");
    }

    let cursor = LeadCursor::after_attempt(outcome.next_cursor);
    if let Err(e) = cursor.save(id, deps.kv.as_ref()).await {
        error!(lead_id = %id, error = %e, "Failed to write cursor");
    }

    info!(
        lead_id = %id,
        fetched,
        count,
        exhausted = cursor == LeadCursor::Exhausted,
        "Lead job completed"
    );
}

async fn record_failure(id: LeadListId, e: ScrapeError, deps: &ServerDeps) {
    let error_type = classify_error(&e.message);
    warn!(lead_id = %id, error = %e, ?error_type, "Lead job failed");

    // Cursor stays as it was so a retry resumes from the last good page.
    if let Err(store_err) = JobStatus::error(e.message, error_type)
        .save(id, deps.kv.as_ref())
        .await
    {
        error!(lead_id = %id, error = %store_err, "Failed to write error status");
    }
}
