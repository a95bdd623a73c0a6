//! Member/Team persistence-access API library
//!
//! Entities, typed repository contracts with their SQLite adapters, and the
//! HTTP layer serving paginated member listings.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
