pub mod connection;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_in_memory, connect_with_settings, DbPool};
pub use repositories::{
    ChatLogRepository, InMemoryChatLogRepository, InMemorySessionRepository, RepositoryError,
    SessionRepository, SqlChatLogRepository, SqlSessionRepository,
};
