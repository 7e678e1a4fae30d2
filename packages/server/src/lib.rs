// Lead Import - API Core
//
// Imports the followers of a social profile into lead lists through an
// external scraping provider. Jobs run detached from the request that
// created them; clients learn the outcome by polling.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
