//! Lead import jobs: scrape a profile's followers into a lead list.

pub mod activities;
pub mod error;
pub mod models;
pub mod poller;
pub mod stores;

pub use activities::{LeadDetails, LeadJobAccepted, LeadJobSummary};
pub use error::{LeadJobError, LeadJobResult};
pub use models::{ErrorType, Follower, FriendshipType, JobStatus, LeadCursor, LeadList, StatusKind};
pub use poller::{HttpLeadStatusSource, InProcessStatusSource, LeadJobPoller, LeadStatusSource};
pub use stores::{LeadListStore, MemoryLeadListStore, PostgresLeadListStore};
