//! Lead job operations.
//!
//! `create_lead_job` and `retry_lead_job` are the only entry points that
//! start work; `run_lead_job` is what the detached task executes.

pub mod classify;
pub mod clear_error;
pub mod create_lead_job;
pub mod delete_lead_job;
pub mod poll;
pub mod run_lead_job;

pub use classify::classify_error;
pub use clear_error::clear_lead_error;
pub use create_lead_job::{
    create_lead_job, normalize_handle, profile_url, retry_lead_job, CreateLeadJob,
    LeadJobAccepted, RetryLeadJob, StartedLeadJob, MAX_LEAD_COUNT,
};
pub use delete_lead_job::delete_lead_job;
pub use poll::{get_lead_details, list_lead_jobs, poll_lead_job, LeadDetails, LeadJobSummary};
pub use run_lead_job::run_lead_job;
