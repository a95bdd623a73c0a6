// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod dto;
pub mod errors;
pub mod member;
pub mod paging;
pub mod query;
pub mod repositories;
pub mod team;
