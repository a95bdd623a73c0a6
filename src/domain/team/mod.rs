// Team domain module
// Contains the team entity and its identity value object

#![allow(clippy::module_inception)]

pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use team::{Team, TeamBuilder};
pub use value_objects::TeamId;
