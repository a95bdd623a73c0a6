use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

/// Schema for the `team` and `member` tables
///
/// One statement per entry; executed in order on every startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS team (
        team_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS member (
        member_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        age INTEGER NOT NULL,
        team_id INTEGER NULL REFERENCES team (team_id),
        created_date TEXT NOT NULL,
        updated_date TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_member_username ON member (username)",
    "CREATE INDEX IF NOT EXISTS idx_member_team_id ON member (team_id)",
];

/// Opens the connection pool described by `config`
///
/// In-memory databases get exactly one connection that is never recycled,
/// since closing it would drop the database.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_in_memory() {
        tracing::warn!("Using an in-memory database; data is lost on shutdown");
        if config.max_connections > 1 {
            tracing::warn!(
                "In-memory database requested with {} connections, using 1",
                config.max_connections
            );
        }
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
    };

    pool_options.connect_with(options).await
}

/// Creates the tables and indexes if they do not exist yet
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!("Schema ready ({} statements)", SCHEMA.len());
    Ok(())
}

/// Connects and migrates in one step
pub async fn init(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let (tables,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('team', 'member')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(tables, 2);
    }

    #[tokio::test]
    async fn in_memory_pool_keeps_schema_across_acquires() {
        let pool = init(&DatabaseConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO team (name) VALUES ('teamA')")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM team")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(count, 1);
    }
}
