use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use agronova_core::domain::session::{NewSession, SessionId, SessionRecord};
use agronova_core::{SoilType, SourceConfidence, WaterLevel};

use super::{parse_language, parse_timestamp, RepositoryError, SessionRepository};
use crate::DbPool;

pub struct SqlSessionRepository {
    pool: DbPool,
}

impl SqlSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn save(&self, session: NewSession) -> Result<SessionId, RepositoryError> {
        let id = SessionId::generate();
        let recommended_crops = serde_json::to_string(&session.recommended_crops)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;

        sqlx::query(
            "INSERT INTO sessions (
                id,
                created_at,
                location,
                temperature,
                humidity,
                rainfall,
                soil_type,
                water_level,
                source_confidence,
                language,
                recommended_crops
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(&session.location)
        .bind(session.temperature_c)
        .bind(session.humidity_pct)
        .bind(session.annual_rainfall_mm)
        .bind(session.soil_type.as_str())
        .bind(session.water_level.as_str())
        .bind(session.source_confidence.as_str())
        .bind(session.language.as_str())
        .bind(recommended_crops)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT
                id,
                created_at,
                location,
                temperature,
                humidity,
                rainfall,
                soil_type,
                water_level,
                source_confidence,
                language,
                recommended_crops,
                selected_crop
             FROM sessions
             WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(session_from_row).transpose()
    }

    async fn record_selected_crop(
        &self,
        id: &SessionId,
        crop_key: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE sessions SET selected_crop = ? WHERE id = ?")
            .bind(crop_key)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn session_from_row(row: SqliteRow) -> Result<SessionRecord, RepositoryError> {
    let soil_raw = row.try_get::<String, _>("soil_type")?;
    let soil_type = soil_raw
        .parse::<SoilType>()
        .map_err(|_| RepositoryError::Decode(format!("unknown soil type `{soil_raw}`")))?;

    let water_raw = row.try_get::<String, _>("water_level")?;
    let water_level = water_raw
        .parse::<WaterLevel>()
        .map_err(|_| RepositoryError::Decode(format!("unknown water level `{water_raw}`")))?;

    let confidence_raw = row.try_get::<String, _>("source_confidence")?;
    let source_confidence = confidence_raw.parse::<SourceConfidence>().map_err(|_| {
        RepositoryError::Decode(format!("unknown source confidence `{confidence_raw}`"))
    })?;

    let crops_raw = row.try_get::<String, _>("recommended_crops")?;
    let recommended_crops = serde_json::from_str::<Vec<String>>(&crops_raw).map_err(|error| {
        RepositoryError::Decode(format!("invalid recommended_crops `{crops_raw}` ({error})"))
    })?;

    Ok(SessionRecord {
        id: SessionId(row.try_get("id")?),
        created_at: parse_timestamp("created_at", row.try_get("created_at")?)?,
        location: row.try_get("location")?,
        temperature_c: row.try_get("temperature")?,
        humidity_pct: row.try_get("humidity")?,
        annual_rainfall_mm: row.try_get("rainfall")?,
        soil_type,
        water_level,
        source_confidence,
        language: parse_language(row.try_get("language")?)?,
        recommended_crops,
        selected_crop: row.try_get("selected_crop")?,
    })
}
