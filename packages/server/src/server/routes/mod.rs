// HTTP routes
pub mod health;
pub mod leads;

pub use health::*;
pub use leads::*;
