//! JSON API consumed by the farmer-facing frontend.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use agronova_agent::{ChatTurn, FarmAssistant};
use agronova_core::domain::climate::check_measurements;
use agronova_core::domain::crop::{CultivationGuidance, RankedCrop};
use agronova_core::domain::session::{ChatLogEntry, ChatRole, NewSession, SessionId};
use agronova_core::guidance::DEFAULT_AREA_HECTARES;
use agronova_core::i18n::ui_strings;
use agronova_core::{
    ApplicationError, CallerError, ClimateProfile, ClimateResolver, GuidanceGenerator,
    InterfaceError, Language, Message, SessionRecord, SoilType, SourceConfidence,
    SuitabilityScorer, WaterLevel,
};
use agronova_db::{ChatLogRepository, SessionRepository};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ClimateResolver>,
    pub scorer: SuitabilityScorer,
    pub guidance: GuidanceGenerator,
    pub sessions: Arc<dyn SessionRepository>,
    pub chat_logs: Arc<dyn ChatLogRepository>,
    pub assistant: FarmAssistant,
}

pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/weather", post(weather))
        .route("/api/recommend-crops", post(recommend_crops))
        .route("/api/crop-guidance", post(crop_guidance))
        .route("/api/chat", post(chat))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/translations/{language}", get(translations))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
}

/// JSON error body carrying the request's correlation id.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            InterfaceError::BadRequest { message, .. } => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            InterfaceError::NotFound { message, .. } => (StatusCode::NOT_FOUND, message.clone()),
            InterfaceError::ServiceUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, self.0.user_message().to_string())
            }
            InterfaceError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.user_message().to_string())
            }
        };
        let body = ErrorBody { error, correlation_id: self.0.correlation_id().to_string() };
        (status, Json(body)).into_response()
    }
}

fn reject(error: impl Into<ApplicationError>, correlation_id: &str) -> ApiError {
    let interface = error.into().into_interface(correlation_id);
    warn!(
        event_name = "api.request.rejected",
        correlation_id = %correlation_id,
        error = %interface,
        "request rejected"
    );
    ApiError(interface)
}

fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_language() -> String {
    Language::DEFAULT.as_str().to_string()
}

// Weather

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub location: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct ClimateReport {
    pub success: bool,
    #[serde(flatten)]
    pub climate: ClimateProfile,
    pub estimated: bool,
}

async fn weather(
    State(state): State<AppState>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<ClimateReport>, ApiError> {
    let correlation_id = new_correlation_id();

    if request.location.trim().is_empty() {
        let language = Language::resolve(&request.language).language;
        warn!(
            event_name = "api.weather.blank_location",
            correlation_id = %correlation_id,
            "weather requested without a location"
        );
        return Err(ApiError(InterfaceError::NotFound {
            message: Message::LocationNotFound.text(language).to_string(),
            correlation_id,
        }));
    }

    let climate = state.resolver.resolve(&request.location).await;
    Ok(Json(ClimateReport {
        success: true,
        estimated: climate.source_confidence.is_estimate(),
        climate,
    }))
}

// Recommendation

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub location: String,
    pub soil_type: String,
    pub water_level: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub source_confidence: Option<String>,
}

impl RecommendRequest {
    /// Caller-supplied measurements, if any. Partial or implausible readings are rejected and
    /// the caller must state their provenance.
    fn measured_climate(&self) -> Result<Option<ClimateProfile>, CallerError> {
        match (self.temperature, self.humidity, self.rainfall) {
            (None, None, None) => Ok(None),
            (Some(temperature), Some(humidity), Some(rainfall)) => {
                check_measurements(temperature, humidity, rainfall)?;
                let confidence = self
                    .source_confidence
                    .as_deref()
                    .ok_or(CallerError::MissingField("source_confidence"))?
                    .parse::<SourceConfidence>()?;
                Ok(Some(ClimateProfile::from_measurements(
                    self.location.trim(),
                    temperature,
                    humidity,
                    rainfall,
                    confidence,
                )))
            }
            (None, _, _) => Err(CallerError::MissingField("temperature")),
            (_, None, _) => Err(CallerError::MissingField("humidity")),
            (_, _, None) => Err(CallerError::MissingField("rainfall")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub session_id: Option<SessionId>,
    pub climate: ClimateProfile,
    pub crops: Vec<RankedCrop>,
}

async fn recommend_crops(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let correlation_id = new_correlation_id();

    let soil = request
        .soil_type
        .parse::<SoilType>()
        .map_err(|error| reject(error, &correlation_id))?;
    let water = request
        .water_level
        .parse::<WaterLevel>()
        .map_err(|error| reject(error, &correlation_id))?;
    let language = Language::resolve(&request.language).language;

    let measured = request.measured_climate().map_err(|error| reject(error, &correlation_id))?;
    let climate = match measured {
        Some(climate) => climate,
        None => state.resolver.resolve(&request.location).await,
    };

    let crops = state.scorer.rank(&climate, soil, water, language);

    let session = NewSession {
        location: climate.location_name.clone(),
        temperature_c: climate.temperature_c,
        humidity_pct: climate.humidity_pct,
        annual_rainfall_mm: climate.annual_rainfall_mm,
        soil_type: soil,
        water_level: water,
        source_confidence: climate.source_confidence,
        language,
        recommended_crops: crops.iter().map(|crop| crop.key.clone()).collect(),
    };
    let session_id = match state.sessions.save(session).await {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(
                event_name = "api.recommend.session_not_saved",
                correlation_id = %correlation_id,
                error = %error,
                "session could not be persisted"
            );
            None
        }
    };

    info!(
        event_name = "api.recommend.completed",
        correlation_id = %correlation_id,
        session_id = session_id.as_ref().map(SessionId::as_str).unwrap_or("none"),
        soil = soil.as_str(),
        water = water.as_str(),
        source_confidence = climate.source_confidence.as_str(),
        top_crop = crops.first().map(|crop| crop.key.as_str()).unwrap_or("none"),
        "crops ranked"
    );

    Ok(Json(RecommendResponse { session_id, climate, crops }))
}

// Guidance

fn default_area() -> f64 {
    DEFAULT_AREA_HECTARES
}

#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    pub crop_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_area")]
    pub area_hectares: f64,
    pub session_id: Option<SessionId>,
}

async fn crop_guidance(
    State(state): State<AppState>,
    Json(request): Json<GuidanceRequest>,
) -> Result<Json<CultivationGuidance>, ApiError> {
    let correlation_id = new_correlation_id();

    let session = match &request.session_id {
        Some(id) => load_session_quietly(state.sessions.as_ref(), id, &correlation_id).await,
        None => None,
    };
    let climate = session.as_ref().map(|record| {
        ClimateProfile::from_measurements(
            record.location.clone(),
            record.temperature_c,
            record.humidity_pct,
            record.annual_rainfall_mm,
            record.source_confidence,
        )
    });

    let guidance = state
        .guidance
        .generate_for_climate(
            &request.crop_key,
            &request.language,
            request.area_hectares,
            climate.as_ref(),
        )
        .map_err(|error| reject(error, &correlation_id))?
        .ok_or_else(|| {
            reject(
                ApplicationError::NotFound { entity: "crop", key: request.crop_key.clone() },
                &correlation_id,
            )
        })?;

    if let Some(record) = &session {
        if let Err(error) = state.sessions.record_selected_crop(&record.id, &guidance.crop_key).await
        {
            warn!(
                event_name = "api.guidance.selection_not_saved",
                correlation_id = %correlation_id,
                session_id = record.id.as_str(),
                error = %error,
                "selected crop could not be recorded"
            );
        }
    }

    info!(
        event_name = "api.guidance.completed",
        correlation_id = %correlation_id,
        crop = %guidance.crop_key,
        language = guidance.language.as_str(),
        language_fallback = guidance.language_fallback,
        area_hectares = guidance.area_hectares,
        "guidance generated"
    );

    Ok(Json(guidance))
}

async fn load_session_quietly(
    sessions: &dyn SessionRepository,
    id: &SessionId,
    correlation_id: &str,
) -> Option<SessionRecord> {
    match sessions.find_by_id(id).await {
        Ok(record) => record,
        Err(error) => {
            warn!(
                event_name = "api.session.lookup_failed",
                correlation_id = %correlation_id,
                session_id = id.as_str(),
                error = %error,
                "session lookup failed"
            );
            None
        }
    }
}

// Chat

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let correlation_id = new_correlation_id();

    if request.message.trim().is_empty() {
        return Err(reject(CallerError::MissingField("message"), &correlation_id));
    }

    let language = Language::resolve(&request.language).language;
    let reply =
        state.assistant.reply(&request.message, language, &request.context, &request.history).await;

    if let Some(session_id) = &request.session_id {
        let turns = [(ChatRole::User, request.message.clone()), (ChatRole::Assistant, reply.clone())];
        for (role, message) in turns {
            let entry = ChatLogEntry {
                session_id: session_id.clone(),
                role,
                message,
                language,
                timestamp: Utc::now(),
            };
            if let Err(error) = state.chat_logs.append(entry).await {
                warn!(
                    event_name = "api.chat.log_not_saved",
                    correlation_id = %correlation_id,
                    session_id = session_id.as_str(),
                    error = %error,
                    "chat turn could not be logged"
                );
                break;
            }
        }
    }

    Ok(Json(ChatResponse { reply }))
}

// Sessions and translations

async fn get_session(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<SessionRecord>, ApiError> {
    let correlation_id = new_correlation_id();
    let id = SessionId(id);

    state
        .sessions
        .find_by_id(&id)
        .await
        .map_err(|error| reject(ApplicationError::Persistence(error.to_string()), &correlation_id))?
        .map(Json)
        .ok_or_else(|| {
            let not_found = ApplicationError::NotFound { entity: "session", key: id.0.clone() };
            reject(not_found, &correlation_id)
        })
}

async fn translations(UrlPath(language): UrlPath<String>) -> Json<Value> {
    let resolution = Language::resolve(&language);
    Json(json!({
        "language": resolution.language,
        "requested": resolution.requested,
        "fell_back": resolution.fell_back,
        "translations": ui_strings(resolution.language),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use async_trait::async_trait;
    use chrono::Utc;

    use agronova_agent::FarmAssistant;
    use agronova_core::domain::session::{NewSession, SessionId, SessionRecord};
    use agronova_core::{
        Catalog, ClimateResolver, GuidanceGenerator, Language, SoilType, SourceConfidence,
        SuitabilityScorer, WaterLevel,
    };
    use agronova_db::{
        ChatLogRepository, InMemoryChatLogRepository, InMemorySessionRepository,
        RepositoryError, SessionRepository,
    };

    use super::{router, AppState};

    /// Session store whose writes always fail; reads return the preloaded record.
    struct FailingSessionRepository {
        stored: Option<SessionRecord>,
    }

    #[async_trait]
    impl SessionRepository for FailingSessionRepository {
        async fn save(&self, _session: NewSession) -> Result<SessionId, RepositoryError> {
            Err(RepositoryError::Decode("database is locked".to_string()))
        }

        async fn find_by_id(
            &self,
            id: &SessionId,
        ) -> Result<Option<SessionRecord>, RepositoryError> {
            Ok(self.stored.clone().filter(|record| &record.id == id))
        }

        async fn record_selected_crop(
            &self,
            _id: &SessionId,
            _crop_key: &str,
        ) -> Result<bool, RepositoryError> {
            Err(RepositoryError::Decode("database is locked".to_string()))
        }
    }

    struct Harness {
        app: Router,
        sessions: Arc<InMemorySessionRepository>,
        chat_logs: Arc<InMemoryChatLogRepository>,
    }

    fn app_with(
        sessions: Arc<dyn SessionRepository>,
        chat_logs: Arc<dyn ChatLogRepository>,
    ) -> Router {
        let catalog = Arc::new(Catalog::embedded().expect("embedded catalog"));
        let state = AppState {
            resolver: Arc::new(ClimateResolver::offline()),
            scorer: SuitabilityScorer::new(catalog.clone()),
            guidance: GuidanceGenerator::new(catalog),
            sessions,
            chat_logs,
            assistant: FarmAssistant::offline(),
        };
        router(state, Path::new("frontend"))
    }

    fn harness() -> Harness {
        let sessions = Arc::new(InMemorySessionRepository::default());
        let chat_logs = Arc::new(InMemoryChatLogRepository::default());
        Harness { app: app_with(sessions.clone(), chat_logs.clone()), sessions, chat_logs }
    }

    fn failing_sessions_app(stored: Option<SessionRecord>) -> Router {
        app_with(
            Arc::new(FailingSessionRepository { stored }),
            Arc::new(InMemoryChatLogRepository::default()),
        )
    }

    fn measured_request(temperature: f64, humidity: f64, rainfall: f64) -> Value {
        json!({
            "location": "Farm 7",
            "soil_type": "loam",
            "water_level": "medium",
            "temperature": temperature,
            "humidity": humidity,
            "rainfall": rainfall,
            "source_confidence": "live"
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, payload)
    }

    #[tokio::test]
    async fn weather_resolves_known_city_offline() {
        let harness = harness();
        let (status, payload) =
            send(&harness.app, "POST", "/api/weather", Some(json!({"location": "pune"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["location_name"], "Pune");
        assert_eq!(payload["temperature_c"], 26.0);
        assert_eq!(payload["annual_rainfall_mm"], 750.0);
        assert_eq!(payload["source_confidence"], "demo_lookup");
        assert_eq!(payload["estimated"], false);
    }

    #[tokio::test]
    async fn blank_weather_location_is_a_localized_not_found() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/weather",
            Some(json!({"location": "   ", "language": "hindi"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["error"], "स्थान नहीं मिला। कृपया नजदीकी शहर आज़माएं।");
        assert!(payload["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn recommendation_ranks_crops_and_records_session() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({"location": "Pune", "soil_type": "black", "water_level": "medium"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = payload["crops"]
            .as_array()
            .expect("crops")
            .iter()
            .map(|crop| crop["key"].as_str().expect("key"))
            .collect();
        assert_eq!(keys, vec!["cotton", "soybean", "maize"]);
        assert_eq!(payload["climate"]["source_confidence"], "demo_lookup");

        let session_id = SessionId(payload["session_id"].as_str().expect("session id").to_string());
        let record = harness.sessions.find_by_id(&session_id).await.expect("find").expect("record");
        assert_eq!(record.recommended_crops, vec!["cotton", "soybean", "maize"]);
    }

    #[tokio::test]
    async fn measured_climate_requires_source_confidence() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({
                "location": "Farm 7",
                "soil_type": "loam",
                "water_level": "high",
                "temperature": 27.0,
                "humidity": 70.0,
                "rainfall": 1400.0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").contains("source_confidence"));
    }

    #[tokio::test]
    async fn partial_measurements_are_rejected() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({
                "location": "Farm 7",
                "soil_type": "loam",
                "water_level": "high",
                "temperature": 27.0,
                "source_confidence": "live"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").contains("humidity"));
    }

    #[tokio::test]
    async fn measured_climate_is_used_as_given() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({
                "location": "Farm 7",
                "soil_type": "clay",
                "water_level": "high",
                "temperature": 28.0,
                "humidity": 80.0,
                "rainfall": 1800.0,
                "source_confidence": "live"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["climate"]["location_name"], "Farm 7");
        assert_eq!(payload["climate"]["source_confidence"], "live");
        assert_eq!(payload["crops"][0]["key"], "rice");
    }

    #[tokio::test]
    async fn implausible_temperature_is_rejected() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(measured_request(-400.0, 60.0, 900.0)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").starts_with("temperature -400"));
    }

    #[tokio::test]
    async fn humidity_above_saturation_is_rejected() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(measured_request(25.0, 250.0, 900.0)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").starts_with("humidity 250"));
    }

    #[tokio::test]
    async fn negative_rainfall_is_rejected() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(measured_request(25.0, 60.0, -1000.0)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").starts_with("rainfall -1000"));
    }

    #[tokio::test]
    async fn ranking_survives_a_failed_session_save() {
        let app = failing_sessions_app(None);
        let (status, payload) = send(
            &app,
            "POST",
            "/api/recommend-crops",
            Some(json!({"location": "Pune", "soil_type": "black", "water_level": "medium"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["session_id"], Value::Null);
        assert!(!payload["crops"].as_array().expect("crops").is_empty());
    }

    #[tokio::test]
    async fn guidance_survives_a_failed_selection_update() {
        let record = SessionRecord {
            id: SessionId::from("s-locked"),
            created_at: Utc::now(),
            location: "Pune".to_string(),
            temperature_c: 26.0,
            humidity_pct: 60.0,
            annual_rainfall_mm: 750.0,
            soil_type: SoilType::Black,
            water_level: WaterLevel::Medium,
            source_confidence: SourceConfidence::DemoLookup,
            language: Language::English,
            recommended_crops: vec!["cotton".to_string()],
            selected_crop: None,
        };
        let app = failing_sessions_app(Some(record));

        let (status, payload) = send(
            &app,
            "POST",
            "/api/crop-guidance",
            Some(json!({"crop_key": "cotton", "session_id": "s-locked"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["crop_key"], "cotton");
        assert_eq!(payload["area_hectares"], 1.0);
    }

    #[tokio::test]
    async fn unknown_soil_is_a_bad_request() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({"location": "Pune", "soil_type": "peat", "water_level": "medium"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").contains("peat"));
    }

    #[tokio::test]
    async fn guidance_scales_and_records_selected_crop() {
        let harness = harness();
        let (_, recommendation) = send(
            &harness.app,
            "POST",
            "/api/recommend-crops",
            Some(json!({"location": "Pune", "soil_type": "black", "water_level": "medium"})),
        )
        .await;
        let session_id = recommendation["session_id"].as_str().expect("session id").to_string();

        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/crop-guidance",
            Some(json!({"crop_key": "cotton", "area_hectares": 2.0, "session_id": session_id})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["crop_key"], "cotton");
        assert_eq!(payload["area_hectares"], 2.0);
        assert_eq!(payload["caveats"], json!([]));

        let record = harness
            .sessions
            .find_by_id(&SessionId(session_id))
            .await
            .expect("find")
            .expect("record");
        assert_eq!(record.selected_crop.as_deref(), Some("cotton"));
    }

    #[tokio::test]
    async fn guidance_errors_map_to_status_codes() {
        let harness = harness();

        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/crop-guidance",
            Some(json!({"crop_key": "dragonfruit"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["error"], "crop not found");

        let (status, _) = send(
            &harness.app,
            "POST",
            "/api/crop-guidance",
            Some(json!({"crop_key": "rice", "area_hectares": 0.0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_replies_and_logs_turns_for_a_session() {
        let harness = harness();
        let (status, payload) = send(
            &harness.app,
            "POST",
            "/api/chat",
            Some(json!({"message": "Which fertilizer?", "session_id": "s-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(payload["reply"].as_str().expect("reply").contains("NPK"));

        let entries =
            harness.chat_logs.list_for_session(&SessionId::from("s-1")).await.expect("list");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Which fertilizer?");
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let harness = harness();
        let (status, payload) = send(&harness.app, "GET", "/api/sessions/unknown", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["error"], "session not found");
    }

    #[tokio::test]
    async fn translations_fall_back_to_english() {
        let harness = harness();
        let (status, payload) = send(&harness.app, "GET", "/api/translations/Tamil", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["language"], "english");
        assert_eq!(payload["requested"], "Tamil");
        assert_eq!(payload["fell_back"], true);
        assert_eq!(
            payload["translations"]["location_not_found"],
            "Location not found. Please try a nearby city."
        );

        let (_, payload) = send(&harness.app, "GET", "/api/translations/MARATHI", None).await;
        assert_eq!(payload["language"], "marathi");
        assert_eq!(payload["fell_back"], false);
    }
}
