use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::{LiveObservation, ProviderError, WeatherProvider};
use crate::domain::climate::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Current-conditions client for the OpenWeatherMap `weather` endpoint.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("agronova/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self { client, base_url: base_url.into(), api_key })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &str) -> Result<LiveObservation, ProviderError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", query), ("appid", self.api_key.expose_secret()), ("units", "metric")])
            .send()
            .await
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let payload: CurrentWeather =
            response.json().await.map_err(|error| ProviderError::Decode(error.to_string()))?;
        debug!(query, name = payload.name.as_deref().unwrap_or_default(), "weather observation");
        Ok(payload.into())
    }
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeather {
    name: Option<String>,
    coord: Option<Coord>,
    main: Option<MainReadings>,
    #[serde(default)]
    weather: Vec<Condition>,
    sys: Option<Sys>,
    rain: Option<Rain>,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl From<CurrentWeather> for LiveObservation {
    fn from(value: CurrentWeather) -> Self {
        let (temperature_c, humidity_pct) = match value.main {
            Some(main) => (main.temp, main.humidity),
            None => (None, None),
        };
        Self {
            name: value.name.filter(|name| !name.trim().is_empty()),
            country_code: value.sys.and_then(|sys| sys.country),
            temperature_c,
            humidity_pct,
            conditions: value.weather.into_iter().find_map(|condition| condition.description),
            coordinates: value.coord.map(|coord| Coordinates { lat: coord.lat, lon: coord.lon }),
            rain_last_hour_mm: value.rain.and_then(|rain| rain.one_hour),
        }
    }
}
