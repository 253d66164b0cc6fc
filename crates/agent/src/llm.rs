use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use agronova_core::ChatRole;

/// One prior message in a conversation, as sent by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, messages: &[ChatTurn]) -> Result<String>;
}
