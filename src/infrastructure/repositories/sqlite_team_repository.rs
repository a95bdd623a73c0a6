use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::repositories::{CrudRepository, TeamRepository};
use crate::domain::team::{Team, TeamId};

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    team_id: TeamId,
    name: String,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team::from_persistence(row.team_id, row.name)
    }
}

/// SQLite implementation of TeamRepository
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Team, TeamId> for SqliteTeamRepository {
    async fn save(&self, mut team: Team) -> RepositoryResult<Team> {
        match team.id() {
            None => {
                let result = sqlx::query("INSERT INTO team (name) VALUES (?)")
                    .bind(team.name())
                    .execute(&self.pool)
                    .await?;

                team.assign_id(TeamId::new(result.last_insert_rowid()));
            }
            Some(id) => {
                let result = sqlx::query("UPDATE team SET name = ? WHERE team_id = ?")
                    .bind(team.name())
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::not_found("Team", id));
                }
            }
        }

        Ok(team)
    }

    async fn find_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT team_id, name FROM team WHERE team_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Team::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>("SELECT team_id, name FROM team ORDER BY team_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn delete(&self, id: TeamId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM team WHERE team_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Team", id));
        }

        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM team").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl TeamRepository for SqliteTeamRepository {}
