pub mod cursor;
pub mod follower;
pub mod friendship_type;
pub mod job_status;
pub mod lead_list;

pub use cursor::LeadCursor;
pub use follower::{dmable_followers, Follower, NEW_LEAD_STATUS};
pub use friendship_type::FriendshipType;
pub use job_status::{ErrorType, JobStatus, StatusKind};
pub use lead_list::{followers_total, LeadList};
