use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use agronova_core::domain::session::{ChatLogEntry, NewSession, SessionId, SessionRecord};

use super::{ChatLogRepository, RepositoryError, SessionRepository};

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: NewSession) -> Result<SessionId, RepositoryError> {
        let id = SessionId::generate();
        let record = SessionRecord::from_new(id.clone(), Utc::now(), session);
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.0.clone(), record);
        Ok(id)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id.0).cloned())
    }

    async fn record_selected_crop(
        &self,
        id: &SessionId,
        crop_key: &str,
    ) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id.0) {
            Some(record) => {
                record.selected_crop = Some(crop_key.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryChatLogRepository {
    entries: RwLock<Vec<ChatLogEntry>>,
}

#[async_trait::async_trait]
impl ChatLogRepository for InMemoryChatLogRepository {
    async fn append(&self, entry: ChatLogEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ChatLogEntry>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|entry| &entry.session_id == session_id).cloned().collect())
    }
}
