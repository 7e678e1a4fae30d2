//! Typed ids for the entities this service owns.

pub use super::id::Id;

/// Marker type for LeadList entities (one follower import job).
pub struct LeadList;

/// Typed ID for LeadList entities. Also the key of the job's status and cursor entries.
pub type LeadListId = Id<LeadList>;
