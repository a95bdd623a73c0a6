use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use super::sql::{self, MemberRow, MEMBER_COLUMNS, MEMBER_TEAM_COLUMNS, TEAM_JOIN};
use crate::domain::dto::MemberDto;
use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::member::{Member, MemberId};
use crate::domain::paging::{Page, PageRequest};
use crate::domain::query::{Fetch, MemberQuery, MEMBER_ALL_GRAPH};
use crate::domain::repositories::{CrudRepository, MemberRepository};
use crate::domain::team::TeamId;
use crate::infrastructure::persistence_context::PersistenceContext;

/// Named query: members by username
const FIND_BY_USERNAME: &str =
    "SELECT {columns} FROM member m WHERE m.username = ? ORDER BY m.member_id";

/// Explicit query: members by username and exact age
const FIND_USER: &str =
    "SELECT {columns} FROM member m WHERE m.username = ? AND m.age = ? ORDER BY m.member_id";

fn with_columns(template: &str, columns: &str) -> String {
    template.replace("{columns}", columns)
}

/// SQLite implementation of MemberRepository
///
/// Every instance owns a [`PersistenceContext`]: members it loads or saves
/// are registered there and `find_by_id` is answered from it when possible.
/// Build one repository per unit of work.
pub struct SqliteMemberRepository {
    pub(super) pool: SqlitePool,
    pub(super) context: PersistenceContext,
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository with an empty persistence context
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            context: PersistenceContext::new(),
        }
    }

    /// The identity map backing this repository
    pub fn persistence_context(&self) -> &PersistenceContext {
        &self.context
    }

    /// Detaches every loaded member so the next reads go to storage
    pub async fn clear(&self) {
        self.context.clear().await;
    }

    async fn fetch(
        &self,
        query: &MemberQuery,
        fetch: Fetch,
        register: bool,
    ) -> RepositoryResult<Vec<Member>> {
        let mut builder = sql::select_members(query, fetch);
        sql::push_order_by(&mut builder, query.sort());

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;

        let members = sql::into_members(rows);
        if register {
            self.context.register_all(&members).await;
        }
        Ok(members)
    }

    /// Zero or one match; more than one is a contract violation
    async fn fetch_optional(
        &self,
        query: &MemberQuery,
        fetch: Fetch,
        register: bool,
    ) -> RepositoryResult<Option<Member>> {
        let mut members = self.fetch(query, fetch, register).await?;
        match members.len() {
            0 | 1 => Ok(members.pop()),
            count => Err(RepositoryError::NonUniqueResult { count }),
        }
    }

    /// Exactly one match
    async fn fetch_required(
        &self,
        query: &MemberQuery,
        fetch: Fetch,
        register: bool,
        key: &str,
    ) -> RepositoryResult<Member> {
        self.fetch_optional(query, fetch, register)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Member", key))
    }

    async fn count_matching(&self, query: &MemberQuery) -> RepositoryResult<u64> {
        let (count,) = sql::count_members(query)
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn insert(&self, mut member: Member) -> RepositoryResult<Member> {
        member.pre_persist(Utc::now());

        let result = sqlx::query(
            r#"
            INSERT INTO member (username, age, team_id, created_date, updated_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .bind(member.created_date())
        .bind(member.updated_date())
        .execute(&self.pool)
        .await?;

        let id = MemberId::new(result.last_insert_rowid());
        member.assign_id(id);
        tracing::debug!(%id, "Inserted member");
        Ok(member)
    }

    async fn update(&self, id: MemberId, mut member: Member) -> RepositoryResult<Member> {
        member.pre_update(Utc::now());

        let result = sqlx::query(
            r#"
            UPDATE member
            SET username = ?, age = ?, team_id = ?, updated_date = ?
            WHERE member_id = ?
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .bind(member.updated_date())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Member", id));
        }

        Ok(member)
    }
}

#[async_trait]
impl CrudRepository<Member, MemberId> for SqliteMemberRepository {
    async fn save(&self, member: Member) -> RepositoryResult<Member> {
        if let Some(team) = member.team_ref() {
            if team.id().is_none() {
                return Err(RepositoryError::TransientReference {
                    entity: "Member",
                    target: "Team",
                });
            }
        }

        let saved = match member.id() {
            None => self.insert(member).await?,
            Some(id) => self.update(id, member).await?,
        };

        self.context.register(&saved).await;
        Ok(saved)
    }

    async fn find_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        if let Some(member) = self.context.get(id).await {
            tracing::trace!(%id, "Member served from persistence context");
            return Ok(Some(member));
        }

        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM member m WHERE m.member_id = ?",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let member = row.map(MemberRow::into_member);
        if let Some(member) = &member {
            self.context.register(member).await;
        }
        Ok(member)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberQuery::new(), Fetch::Team, true).await
    }

    async fn delete(&self, id: MemberId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM member WHERE member_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.context.evict(id).await;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Member", id));
        }

        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM member")
            .execute(&self.pool)
            .await?;

        self.context.clear().await;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn query(&self, query: MemberQuery, fetch: Fetch) -> RepositoryResult<Vec<Member>> {
        self.fetch(&query, fetch, true).await
    }

    async fn query_page(
        &self,
        query: MemberQuery,
        fetch: Fetch,
        page: PageRequest,
    ) -> RepositoryResult<Page<Member>> {
        let limit = i64::from(page.size());
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let mut builder = sql::select_members(&query, fetch);
        sql::push_order_by(&mut builder, page.sort());
        sql::push_limit_offset(&mut builder, limit, offset);

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?;
        let members = sql::into_members(rows);
        self.context.register_all(&members).await;

        // A short, non-empty page (or a short first page) already tells the
        // total; otherwise run the count query.
        let short_page = (members.len() as i64) < limit;
        let total = if short_page && (offset == 0 || !members.is_empty()) {
            page.offset() + members.len() as u64
        } else {
            self.count_matching(&query).await?
        };

        Ok(Page::new(members, &page, total))
    }

    async fn find_all_paged(&self, page: PageRequest) -> RepositoryResult<Page<Member>> {
        self.query_page(MemberQuery::new(), Fetch::Team, page).await
    }

    async fn find_by_username_and_age_greater_than(
        &self,
        username: &str,
        age: i32,
    ) -> RepositoryResult<Vec<Member>> {
        self.fetch(
            &MemberQuery::new().username_eq(username).age_gt(age),
            Fetch::Lazy,
            true,
        )
        .await
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&with_columns(FIND_BY_USERNAME, MEMBER_COLUMNS))
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        let members = sql::into_members(rows);
        self.context.register_all(&members).await;
        Ok(members)
    }

    async fn find_user(&self, username: &str, age: i32) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&with_columns(FIND_USER, MEMBER_COLUMNS))
            .bind(username)
            .bind(age)
            .fetch_all(&self.pool)
            .await?;

        let members = sql::into_members(rows);
        self.context.register_all(&members).await;
        Ok(members)
    }

    async fn find_username_list(&self) -> RepositoryResult<Vec<String>> {
        let usernames =
            sqlx::query_scalar::<_, String>("SELECT username FROM member ORDER BY member_id")
                .fetch_all(&self.pool)
                .await?;
        Ok(usernames)
    }

    async fn find_member_dto(&self) -> RepositoryResult<Vec<MemberDto>> {
        let dtos = sqlx::query_as::<_, MemberDto>(
            r#"
            SELECT m.member_id AS id, m.username, t.name AS team_name
            FROM member m
            JOIN team t ON t.team_id = m.team_id
            ORDER BY m.member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(dtos)
    }

    async fn find_by_names(&self, names: &[String]) -> RepositoryResult<Vec<Member>> {
        self.fetch(
            &MemberQuery::new().username_in(names.iter().cloned()),
            Fetch::Lazy,
            true,
        )
        .await
    }

    async fn find_list_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberQuery::new().username_eq(username), Fetch::Lazy, true)
            .await
    }

    async fn find_member_by_username(&self, username: &str) -> RepositoryResult<Member> {
        self.fetch_required(
            &MemberQuery::new().username_eq(username),
            Fetch::Lazy,
            true,
            username,
        )
        .await
    }

    async fn find_optional_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<Member>> {
        self.fetch_optional(&MemberQuery::new().username_eq(username), Fetch::Lazy, true)
            .await
    }

    async fn find_by_age(&self, age: i32, page: PageRequest) -> RepositoryResult<Page<Member>> {
        self.query_page(MemberQuery::new().age_eq(age), Fetch::Lazy, page)
            .await
    }

    async fn find_by_team(&self, team_id: TeamId) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberQuery::new().team_id_eq(team_id), Fetch::Lazy, true)
            .await
    }

    async fn bulk_age_plus(&self, age: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE member SET age = age + 1 WHERE age >= ?")
            .bind(age)
            .execute(&self.pool)
            .await?;

        let affected = result.rows_affected();
        tracing::debug!(age, affected, "Bulk age increment applied");

        // Loaded members still carry the old ages.
        self.context.clear().await;

        Ok(affected)
    }

    async fn find_member_fetch_join(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM member m{} ORDER BY m.member_id",
            MEMBER_TEAM_COLUMNS, TEAM_JOIN
        ))
        .fetch_all(&self.pool)
        .await?;

        let members = sql::into_members(rows);
        self.context.register_all(&members).await;
        Ok(members)
    }

    async fn find_by_members_entity_graph(&self) -> RepositoryResult<Vec<Member>> {
        self.fetch(&MemberQuery::new(), Fetch::Team, true).await
    }

    async fn find_entity_graph_by_username(&self, username: &str) -> RepositoryResult<Member> {
        self.fetch_required(
            &MemberQuery::new().username_eq(username),
            Fetch::Team,
            true,
            username,
        )
        .await
    }

    async fn find_named_entity_graph_by_username(
        &self,
        username: &str,
    ) -> RepositoryResult<Member> {
        self.fetch_required(
            &MemberQuery::new().username_eq(username),
            MEMBER_ALL_GRAPH,
            true,
            username,
        )
        .await
    }

    async fn find_read_only_by_username(&self, username: &str) -> RepositoryResult<Member> {
        self.fetch_required(
            &MemberQuery::new().username_eq(username),
            Fetch::Lazy,
            false,
            username,
        )
        .await
    }

    async fn find_lock_by_username(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> RepositoryResult<Vec<Member>> {
        // SQLite locks the whole database rather than rows: the first write
        // in a transaction takes the write lock and keeps it until the
        // transaction ends.
        sqlx::query("UPDATE member SET username = username WHERE username = ?")
            .bind(username)
            .execute(&mut *conn)
            .await?;

        let query = MemberQuery::new().username_eq(username);
        let mut builder = sql::select_members(&query, Fetch::Lazy);
        sql::push_order_by(&mut builder, query.sort());

        let rows = builder
            .build_query_as::<MemberRow>()
            .fetch_all(&mut *conn)
            .await?;

        let members = sql::into_members(rows);
        self.context.register_all(&members).await;
        tracing::debug!(username, locked = members.len(), "Members locked for write");
        Ok(members)
    }
}
