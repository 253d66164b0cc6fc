use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Number of embedded migrations not yet applied to `pool`.
pub async fn pending_count(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;
    let applied: i64 = if exists == 0 {
        0
    } else {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    };

    let embedded = MIGRATOR.iter().filter(|migration| !migration.migration_type.is_down_migration()).count();
    Ok(embedded.saturating_sub(applied as usize))
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::{pending_count, run_pending, MIGRATOR};
    use crate::connect_in_memory;

    const MANAGED_SCHEMA_OBJECTS: &[&str] =
        &["sessions", "chat_logs", "idx_sessions_created_at", "idx_chat_logs_session_id"];

    #[tokio::test]
    async fn migrations_create_session_and_chat_tables() {
        let pool = connect_in_memory().await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        for table in ["sessions", "chat_logs"] {
            let count = sqlx::query(
                "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .expect("check table")
            .get::<i64, _>("count");
            assert_eq!(count, 1, "{table} should exist");
        }
    }

    #[tokio::test]
    async fn pending_count_drops_to_zero_after_run() {
        let pool = connect_in_memory().await.expect("connect");
        assert!(pending_count(&pool).await.expect("pending before") > 0);

        run_pending(&pool).await.expect("run migrations");
        assert_eq!(pending_count(&pool).await.expect("pending after"), 0);
    }

    #[tokio::test]
    async fn migrations_up_down_up_preserves_schema_signature() {
        let pool = connect_in_memory().await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let initial_signature = managed_schema_signature(&pool).await;
        assert_eq!(
            initial_signature.len(),
            MANAGED_SCHEMA_OBJECTS.len(),
            "initial migration pass should create all managed schema objects",
        );

        MIGRATOR.undo(&pool, 0).await.expect("undo migrations");
        assert!(
            managed_schema_signature(&pool).await.is_empty(),
            "managed schema objects should be removed after full undo",
        );

        run_pending(&pool).await.expect("re-run migrations");
        assert_eq!(
            managed_schema_signature(&pool).await,
            initial_signature,
            "up/down/up should preserve migration-managed schema signature",
        );
    }

    async fn managed_schema_signature(pool: &sqlx::SqlitePool) -> Vec<(String, String, String)> {
        let mut signature: Vec<(String, String, String)> = sqlx::query(
            "SELECT type, name, IFNULL(sql, '') AS sql
             FROM sqlite_master
             WHERE type IN ('table', 'index')",
        )
        .fetch_all(pool)
        .await
        .expect("load schema objects")
        .into_iter()
        .filter_map(|row| {
            let name = row.get::<String, _>("name");
            if MANAGED_SCHEMA_OBJECTS.contains(&name.as_str()) {
                Some((row.get::<String, _>("type"), name, row.get::<String, _>("sql")))
            } else {
                None
            }
        })
        .collect();
        signature.sort();
        signature
    }
}
