use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::domain::dto::MemberDto;
use crate::domain::errors::RepositoryResult;
use crate::domain::member::{Member, MemberId};
use crate::domain::paging::{Page, PageRequest};
use crate::domain::query::{Fetch, MemberQuery};
use crate::domain::repositories::{CrudRepository, MemberRepositoryCustom};
use crate::domain::team::TeamId;

/// Repository trait for the Member entity
///
/// Combines the generic lifecycle operations, the hand-written queries of
/// [`MemberRepositoryCustom`] and the member-specific queries below into one
/// contract.
///
/// # Return shapes
/// - `Vec<Member>`: any number of rows
/// - `Option<Member>`: zero or one row; more than one is `NonUniqueResult`
/// - `Member`: exactly one row; none is `NotFound`, more is `NonUniqueResult`
///
/// `find_all` and `find_all_paged` load each member's team in the same
/// round trip.
#[async_trait]
pub trait MemberRepository: CrudRepository<Member, MemberId> + MemberRepositoryCustom {
    /// Run an arbitrary typed query
    async fn query(&self, query: MemberQuery, fetch: Fetch) -> RepositoryResult<Vec<Member>>;

    /// Run a typed query and return one page of it plus totals
    ///
    /// The page request's sort replaces the query's sort.
    async fn query_page(
        &self,
        query: MemberQuery,
        fetch: Fetch,
        page: PageRequest,
    ) -> RepositoryResult<Page<Member>>;

    /// All members, one page at a time, teams loaded
    async fn find_all_paged(&self, page: PageRequest) -> RepositoryResult<Page<Member>>;

    /// Members named `username` and strictly older than `age`
    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>>;

    /// Members named `username`
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Members named `username` of exactly `age`
    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>>;

    /// Every member's username, in insertion order
    async fn find_username_list(&self) -> RepositoryResult<Vec<String>>;

    /// DTO projection of every member that belongs to a team
    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>>;

    /// Members whose username is one of `names`
    async fn find_by_names(&self, names: &[String]) -> RepositoryResult<Vec<Member>>;

    /// Collection shape: all members named `username`
    async fn find_list_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Required single shape: the one member named `username`
    async fn find_member_by_username(&self, username: &str) -> RepositoryResult<Member>;

    /// Optional single shape: the member named `username`, if any
    async fn find_optional_by_username(&self, username: &str)
        -> RepositoryResult<Option<Member>>;

    /// Members of exactly `age`, paged, with a companion count query
    async fn find_by_age(&self, age: i32, page: PageRequest) -> RepositoryResult<Page<Member>>;

    /// Members that belong to `team_id`
    async fn find_by_team(&self, team_id: TeamId) -> RepositoryResult<Vec<Member>>;

    /// Increments the age of every member at least `age` years old
    ///
    /// Runs as a single set-based update and returns the number of rows
    /// changed. Entities already loaded in this repository are discarded so
    /// later reads see the new ages.
    async fn bulk_age_plus(&self, age: i32) -> RepositoryResult<u64>;

    /// All members with their team, using an explicit left outer join
    async fn find_member_fetch_join(&self) -> RepositoryResult<Vec<Member>>;

    /// All members with their team, using the team fetch graph
    async fn find_by_members_entity_graph(&self) -> RepositoryResult<Vec<Member>>;

    /// The one member named `username`, with its team
    async fn find_entity_graph_by_username(&self, username: &str) -> RepositoryResult<Member>;

    /// The one member named `username`, fetched with the named
    /// [`MEMBER_ALL_GRAPH`](crate::domain::query::MEMBER_ALL_GRAPH)
    async fn find_named_entity_graph_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Member>;

    /// The one member named `username`, not registered in the persistence
    /// context
    async fn find_read_only_by_username(&self, username: &str) -> RepositoryResult<Member>;

    /// Members named `username`, write-locked until `conn`'s transaction
    /// ends
    ///
    /// `conn` must be inside a transaction; the lock is released on commit
    /// or rollback.
    async fn find_lock_by_username(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> RepositoryResult<Vec<Member>>;
}
