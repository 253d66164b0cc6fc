use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::climate::SourceConfidence;
use crate::domain::field::{SoilType, WaterLevel};
use crate::i18n::Language;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Inputs of one ranking request plus the crops it recommended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub annual_rainfall_mm: f64,
    pub soil_type: SoilType,
    pub water_level: WaterLevel,
    pub source_confidence: SourceConfidence,
    pub language: Language,
    pub recommended_crops: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub annual_rainfall_mm: f64,
    pub soil_type: SoilType,
    pub water_level: WaterLevel,
    pub source_confidence: SourceConfidence,
    pub language: Language,
    pub recommended_crops: Vec<String>,
    pub selected_crop: Option<String>,
}

impl SessionRecord {
    pub fn from_new(id: SessionId, created_at: DateTime<Utc>, session: NewSession) -> Self {
        Self {
            id,
            created_at,
            location: session.location,
            temperature_c: session.temperature_c,
            humidity_pct: session.humidity_pct,
            annual_rainfall_mm: session.annual_rainfall_mm,
            soil_type: session.soil_type,
            water_level: session.water_level,
            source_confidence: session.source_confidence,
            language: session.language,
            recommended_crops: session.recommended_crops,
            selected_crop: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(format!("unknown chat role `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub session_id: SessionId,
    pub role: ChatRole,
    pub message: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::{ChatRole, SessionId};

    #[test]
    fn generated_session_ids_are_unique_uuids() {
        let first = SessionId::generate();
        let second = SessionId::generate();
        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn chat_role_parses_storage_values() {
        assert_eq!("user".parse::<ChatRole>(), Ok(ChatRole::User));
        assert_eq!(ChatRole::Assistant.as_str().parse::<ChatRole>(), Ok(ChatRole::Assistant));
        assert!("system".parse::<ChatRole>().is_err());
    }
}
