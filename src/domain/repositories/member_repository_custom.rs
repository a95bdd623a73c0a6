use async_trait::async_trait;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;

/// Hand-written member queries
///
/// Queries that are written directly against the connection pool rather
/// than composed from a [`MemberQuery`](crate::domain::query::MemberQuery).
/// Aggregated into [`MemberRepository`](super::MemberRepository) so callers
/// see a single contract.
#[async_trait]
pub trait MemberRepositoryCustom: Send + Sync {
    /// All members in insertion order
    async fn find_member_custom(&self) -> RepositoryResult<Vec<Member>>;

    /// Members of exactly `age`, ordered by username descending,
    /// skipping `offset` rows and returning at most `limit`
    async fn find_by_page(&self, age: i32, offset: i64, limit: i64)
        -> RepositoryResult<Vec<Member>>;

    /// Number of members of exactly `age`
    async fn total_count(&self, age: i32) -> RepositoryResult<i64>;
}
