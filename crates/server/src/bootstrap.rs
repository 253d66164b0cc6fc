use std::sync::Arc;

use agronova_agent::{AnthropicClient, AnthropicSettings, FarmAssistant};
use agronova_core::config::{AppConfig, ConfigError, LoadOptions};
use agronova_core::weather::ProviderError;
use agronova_core::{Catalog, CatalogError, ClimateResolver, GuidanceGenerator, SuitabilityScorer};
use agronova_db::{
    connect_with_settings, migrations, ChatLogRepository, DbPool, SessionRepository,
    SqlChatLogRepository, SqlSessionRepository,
};
use thiserror::Error;
use tracing::info;

use crate::api::AppState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub catalog: Arc<Catalog>,
    pub resolver: Arc<ClimateResolver>,
    pub scorer: SuitabilityScorer,
    pub guidance: GuidanceGenerator,
    pub sessions: Arc<dyn SessionRepository>,
    pub chat_logs: Arc<dyn ChatLogRepository>,
    pub assistant: FarmAssistant,
}

impl Application {
    pub fn state(&self) -> AppState {
        AppState {
            resolver: self.resolver.clone(),
            scorer: self.scorer.clone(),
            guidance: self.guidance.clone(),
            sessions: self.sessions.clone(),
            chat_logs: self.chat_logs.clone(),
            assistant: self.assistant.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("crop catalog is invalid: {0}")]
    Catalog(#[source] CatalogError),
    #[error("weather client setup failed: {0}")]
    Weather(#[source] ProviderError),
    #[error("llm client setup failed: {0}")]
    Llm(String),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog =
        Arc::new(Catalog::load(config.catalog.path.as_deref()).map_err(BootstrapError::Catalog)?);
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        crops = catalog.len(),
        custom_path = config.catalog.path.is_some(),
        "crop catalog loaded"
    );

    let resolver = Arc::new(
        ClimateResolver::from_settings(config.live_weather_settings())
            .map_err(BootstrapError::Weather)?,
    );
    info!(
        event_name = "system.bootstrap.weather_ready",
        correlation_id = "bootstrap",
        live_lookup = resolver.has_live_lookup(),
        strategies = ?resolver.strategy_names(),
        "climate resolver ready"
    );

    let assistant = match AnthropicSettings::from_config(&config.llm) {
        Some(settings) => {
            let client = AnthropicClient::new(settings)
                .map_err(|error| BootstrapError::Llm(error.to_string()))?;
            FarmAssistant::with_llm(Arc::new(client))
        }
        None => FarmAssistant::offline(),
    };
    info!(
        event_name = "system.bootstrap.assistant_ready",
        correlation_id = "bootstrap",
        llm_enabled = assistant.has_llm(),
        "chat assistant ready"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    Ok(Application {
        scorer: SuitabilityScorer::new(catalog.clone()),
        guidance: GuidanceGenerator::new(catalog.clone()),
        sessions: Arc::new(SqlSessionRepository::new(db_pool.clone())),
        chat_logs: Arc::new(SqlChatLogRepository::new(db_pool.clone())),
        config,
        db_pool,
        catalog,
        resolver,
        assistant,
    })
}
