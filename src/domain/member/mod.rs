// Member domain module
// Contains the member entity, its builder and identity value object

#![allow(clippy::module_inception)]

pub mod member;
pub mod value_objects;

// Re-export main types for convenience
pub use member::{Member, MemberBuilder, TeamRef};
pub use value_objects::MemberId;
