use async_trait::async_trait;
use thiserror::Error;

use agronova_core::domain::session::{ChatLogEntry, NewSession, SessionId, SessionRecord};

pub mod chat_log;
pub mod memory;
pub mod session;

pub use chat_log::SqlChatLogRepository;
pub use memory::{InMemoryChatLogRepository, InMemorySessionRepository};
pub use session::SqlSessionRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session under a freshly generated id.
    async fn save(&self, session: NewSession) -> Result<SessionId, RepositoryError>;

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;

    /// Returns `false` when no session with `id` exists.
    async fn record_selected_crop(
        &self,
        id: &SessionId,
        crop_key: &str,
    ) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ChatLogRepository: Send + Sync {
    async fn append(&self, entry: ChatLogEntry) -> Result<(), RepositoryError>;

    /// Entries for one session, oldest first.
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ChatLogEntry>, RepositoryError>;
}

pub(crate) fn parse_timestamp(
    column: &str,
    value: String,
) -> Result<chrono::DateTime<chrono::Utc>, RepositoryError> {
    chrono::DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&chrono::Utc))
        .map_err(|error| {
            RepositoryError::Decode(format!("invalid timestamp in `{column}`: `{value}` ({error})"))
        })
}

pub(crate) fn parse_language(
    value: String,
) -> Result<agronova_core::Language, RepositoryError> {
    agronova_core::Language::parse(&value)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown language `{value}`")))
}
