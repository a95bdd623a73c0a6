// Infrastructure layer module
// Contains database adapters, logging setup and startup fixtures
// Follows Hexagonal Architecture

pub mod database;
pub mod logging;
pub mod persistence_context;
pub mod repositories;
pub mod seed;
