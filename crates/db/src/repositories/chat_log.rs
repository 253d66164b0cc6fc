use sqlx::{sqlite::SqliteRow, Row};

use agronova_core::domain::session::{ChatLogEntry, ChatRole, SessionId};

use super::{parse_language, parse_timestamp, ChatLogRepository, RepositoryError};
use crate::DbPool;

pub struct SqlChatLogRepository {
    pool: DbPool,
}

impl SqlChatLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ChatLogRepository for SqlChatLogRepository {
    async fn append(&self, entry: ChatLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO chat_logs (session_id, timestamp, role, message, language)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.session_id.as_str())
        .bind(entry.timestamp.to_rfc3339())
        .bind(entry.role.as_str())
        .bind(&entry.message)
        .bind(entry.language.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ChatLogEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT session_id, timestamp, role, message, language
             FROM chat_logs
             WHERE session_id = ?
             ORDER BY id ASC",
        )
        .bind(session_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(entry_from_row).collect()
    }
}

fn entry_from_row(row: SqliteRow) -> Result<ChatLogEntry, RepositoryError> {
    let role_raw = row.try_get::<String, _>("role")?;
    let role = role_raw.parse::<ChatRole>().map_err(RepositoryError::Decode)?;

    Ok(ChatLogEntry {
        session_id: SessionId(row.try_get("session_id")?),
        role,
        message: row.try_get("message")?,
        language: parse_language(row.try_get("language")?)?,
        timestamp: parse_timestamp("timestamp", row.try_get("timestamp")?)?,
    })
}
