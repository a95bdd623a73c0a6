//! Hand-written queries of [`SqliteMemberRepository`].
//!
//! These run straight against the pool and bypass the persistence context.

use async_trait::async_trait;

use super::sql::{self, MemberRow, MEMBER_COLUMNS};
use super::SqliteMemberRepository;
use crate::domain::errors::RepositoryResult;
use crate::domain::member::Member;
use crate::domain::repositories::MemberRepositoryCustom;

#[async_trait]
impl MemberRepositoryCustom for SqliteMemberRepository {
    async fn find_member_custom(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {} FROM member m ORDER BY m.member_id",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sql::into_members(rows))
    }

    async fn find_by_page(
        &self,
        age: i32,
        offset: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            r#"
            SELECT {}
            FROM member m
            WHERE m.age = ?
            ORDER BY m.username DESC, m.member_id ASC
            LIMIT ? OFFSET ?
            "#,
            MEMBER_COLUMNS
        ))
        .bind(age)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(sql::into_members(rows))
    }

    async fn total_count(&self, age: i32) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member WHERE age = ?")
            .bind(age)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
