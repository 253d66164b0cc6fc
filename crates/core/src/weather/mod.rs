//! Climate resolution for a named location.
//!
//! A [`ClimateResolver`] walks an ordered chain of [`ClimateStrategy`]s and
//! always ends at the national default, so resolution never fails.

pub mod locations;
pub mod openweather;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::climate::{title_case, ClimateProfile, Coordinates, SourceConfidence};
use crate::rainfall::{estimate_annual_rainfall, NATIONAL_DEFAULT_RAINFALL_MM};

pub use openweather::OpenWeatherClient;

pub const DEFAULT_COUNTRY_CODE: &str = "IN";
pub const NATIONAL_DEFAULT_TEMPERATURE_C: f64 = 26.0;
pub const NATIONAL_DEFAULT_HUMIDITY_PCT: f64 = 62.0;
pub const DEFAULT_CONDITIONS: &str = "partly cloudy";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("location not found by weather provider")]
    NotFound,
    #[error("weather provider returned status {0}")]
    Status(u16),
    #[error("weather provider transport failure: {0}")]
    Transport(String),
    #[error("weather provider payload could not be decoded: {0}")]
    Decode(String),
}

/// A single current-conditions reading as reported by a provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveObservation {
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub conditions: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub rain_last_hour_mm: Option<f64>,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, query: &str) -> Result<LiveObservation, ProviderError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum StrategyOutcome {
    Resolved(ClimateProfile),
    TryNext,
}

#[async_trait]
pub trait ClimateStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn attempt(&self, location: &str) -> StrategyOutcome;
}

/// Provider lookup bounded by a single deadline covering both the hinted and bare queries.
pub struct LiveLookup {
    provider: Arc<dyn WeatherProvider>,
    country_hint: String,
    timeout: Duration,
}

impl LiveLookup {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        country_hint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self { provider, country_hint: country_hint.into(), timeout }
    }

    async fn observe(&self, location: &str) -> Result<LiveObservation, ProviderError> {
        let hinted = format!("{location},{}", self.country_hint);
        match self.provider.current(&hinted).await {
            Err(ProviderError::NotFound) => {
                debug!(location, "hinted query not found, retrying bare location");
                self.provider.current(location).await
            }
            other => other,
        }
    }

    fn to_profile(&self, location: &str, observation: LiveObservation) -> Option<ClimateProfile> {
        let coordinates = observation.coordinates?;
        // The hourly rain rate says nothing about the annual total; the zone estimate replaces it.
        let annual_rainfall_mm = estimate_annual_rainfall(coordinates.lat, coordinates.lon);

        let temperature = observation.temperature_c.filter(|value| value.is_finite());
        let humidity = observation.humidity_pct.filter(|value| value.is_finite());
        let source_confidence = if temperature.is_some() && humidity.is_some() {
            SourceConfidence::Live
        } else {
            SourceConfidence::RegionalEstimate
        };

        Some(ClimateProfile {
            location_name: observation.name.unwrap_or_else(|| title_case(location.trim())),
            temperature_c: round_tenth(temperature.unwrap_or(NATIONAL_DEFAULT_TEMPERATURE_C)),
            humidity_pct: round_tenth(humidity.unwrap_or(NATIONAL_DEFAULT_HUMIDITY_PCT)),
            annual_rainfall_mm,
            source_confidence,
            country_code: observation.country_code.unwrap_or_else(|| self.country_hint.clone()),
            conditions: observation.conditions.unwrap_or_else(|| DEFAULT_CONDITIONS.to_string()),
            coordinates: Some(coordinates),
        })
    }
}

#[async_trait]
impl ClimateStrategy for LiveLookup {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn attempt(&self, location: &str) -> StrategyOutcome {
        let location = location.trim();
        if location.is_empty() {
            return StrategyOutcome::TryNext;
        }

        let observation = match tokio::time::timeout(self.timeout, self.observe(location)).await {
            Ok(Ok(observation)) => observation,
            Ok(Err(error)) => {
                warn!(
                    event_name = "climate.live.unavailable",
                    location,
                    error = %error,
                    "live weather lookup failed"
                );
                return StrategyOutcome::TryNext;
            }
            Err(_) => {
                warn!(
                    event_name = "climate.live.timeout",
                    location,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "live weather lookup timed out"
                );
                return StrategyOutcome::TryNext;
            }
        };

        match self.to_profile(location, observation) {
            Some(profile) => StrategyOutcome::Resolved(profile),
            None => {
                warn!(
                    event_name = "climate.live.no_coordinates",
                    location, "live observation carried no coordinates"
                );
                StrategyOutcome::TryNext
            }
        }
    }
}

/// Static table of named locations.
pub struct DemoTable;

#[async_trait]
impl ClimateStrategy for DemoTable {
    fn name(&self) -> &'static str {
        "demo_table"
    }

    async fn attempt(&self, location: &str) -> StrategyOutcome {
        match locations::lookup(location) {
            Some(known) => StrategyOutcome::Resolved(ClimateProfile {
                location_name: title_case(location.trim()),
                temperature_c: known.temperature_c,
                humidity_pct: known.humidity_pct,
                annual_rainfall_mm: known.annual_rainfall_mm,
                source_confidence: SourceConfidence::DemoLookup,
                country_code: DEFAULT_COUNTRY_CODE.to_string(),
                conditions: DEFAULT_CONDITIONS.to_string(),
                coordinates: None,
            }),
            None => StrategyOutcome::TryNext,
        }
    }
}

/// Terminal strategy: national averages, always resolves.
pub struct NationalDefault;

impl NationalDefault {
    pub fn profile(location: &str) -> ClimateProfile {
        ClimateProfile {
            location_name: title_case(location.trim()),
            temperature_c: NATIONAL_DEFAULT_TEMPERATURE_C,
            humidity_pct: NATIONAL_DEFAULT_HUMIDITY_PCT,
            annual_rainfall_mm: NATIONAL_DEFAULT_RAINFALL_MM,
            source_confidence: SourceConfidence::Default,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            conditions: DEFAULT_CONDITIONS.to_string(),
            coordinates: None,
        }
    }
}

#[async_trait]
impl ClimateStrategy for NationalDefault {
    fn name(&self) -> &'static str {
        "national_default"
    }

    async fn attempt(&self, location: &str) -> StrategyOutcome {
        StrategyOutcome::Resolved(Self::profile(location))
    }
}

/// Settings needed to wire a live provider into the resolver.
#[derive(Clone, Debug)]
pub struct LiveWeatherSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub country_hint: String,
    pub timeout: Duration,
}

pub struct ClimateResolver {
    strategies: Vec<Box<dyn ClimateStrategy>>,
}

impl ClimateResolver {
    /// Demo table then national default; never touches the network.
    pub fn offline() -> Self {
        Self { strategies: vec![Box::new(DemoTable)] }
    }

    pub fn with_provider(
        provider: Arc<dyn WeatherProvider>,
        country_hint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            strategies: vec![
                Box::new(LiveLookup::new(provider, country_hint, timeout)),
                Box::new(DemoTable),
            ],
        }
    }

    /// Live OpenWeatherMap lookup when settings are given, offline otherwise.
    pub fn from_settings(settings: Option<LiveWeatherSettings>) -> Result<Self, ProviderError> {
        match settings {
            Some(settings) => {
                let client = OpenWeatherClient::new(
                    settings.base_url,
                    settings.api_key,
                    settings.timeout,
                )?;
                Ok(Self::with_provider(Arc::new(client), settings.country_hint, settings.timeout))
            }
            None => Ok(Self::offline()),
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name())
            .chain(std::iter::once(NationalDefault.name()))
            .collect()
    }

    pub fn has_live_lookup(&self) -> bool {
        self.strategies.iter().any(|strategy| strategy.name() == "live")
    }

    pub async fn resolve(&self, location: &str) -> ClimateProfile {
        for strategy in &self.strategies {
            if let StrategyOutcome::Resolved(profile) = strategy.attempt(location).await {
                info!(
                    event_name = "climate.resolved",
                    strategy = strategy.name(),
                    source_confidence = profile.source_confidence.as_str(),
                    location = %profile.location_name,
                    "climate profile resolved"
                );
                return profile;
            }
        }

        let profile = NationalDefault::profile(location);
        info!(
            event_name = "climate.resolved",
            strategy = NationalDefault.name(),
            source_confidence = profile.source_confidence.as_str(),
            location = %profile.location_name,
            "climate profile resolved"
        );
        profile
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
