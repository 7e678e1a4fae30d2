// Common test utilities

pub mod containers;
pub mod harness;

pub use containers::*;
pub use harness::*;
