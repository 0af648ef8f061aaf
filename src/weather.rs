//! Weather provider client.
//!
//! [`WeatherSource`] is the seam between the pipeline and the outside world;
//! [`OpenWeatherClient`] implements it against the OpenWeatherMap
//! current-weather endpoint. Tests substitute their own sources.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{Location, RawReading};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Source of current conditions for one location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn get(&self, location: &Location) -> Result<RawReading, FetchError>;
}

/// Connection settings for the OpenWeatherMap API.
///
/// Built explicitly by the caller and handed to [`OpenWeatherClient::new`].
#[derive(Clone)]
pub struct WeatherApiConfig {
    // ---
    pub base_url: String,
    pub api_key: String,
    /// Transport-level timeout for one request.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for WeatherApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

pub struct OpenWeatherClient {
    client: Client,
    config: WeatherApiConfig,
}

impl OpenWeatherClient {
    // ---
    pub fn new(config: WeatherApiConfig) -> Result<Self, FetchError> {
        // ---
        let client = Client::builder()
            .user_agent(concat!("weatherflow/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn get(&self, location: &Location) -> Result<RawReading, FetchError> {
        // ---
        debug!("Fetching current weather for {}", location.name);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_current_weather(&location.name, &body)
    }
}

// ---

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: Option<MainBlock>,
    rain: Option<RainBlock>,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RainBlock {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// Turn an OpenWeatherMap body into a reading. A missing `rain` block means
/// no rainfall.
fn parse_current_weather(town: &str, body: &[u8]) -> Result<RawReading, FetchError> {
    // ---
    let payload: CurrentWeather =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let main = payload
        .main
        .ok_or_else(|| FetchError::Malformed("missing 'main'".into()))?;
    let temperature = main
        .temp
        .ok_or_else(|| FetchError::Malformed("missing 'main.temp'".into()))?;
    let humidity = main
        .humidity
        .ok_or_else(|| FetchError::Malformed("missing 'main.humidity'".into()))?;
    let rainfall = payload.rain.and_then(|r| r.one_hour).unwrap_or(0.0);
    let dt = payload
        .dt
        .ok_or_else(|| FetchError::Malformed("missing 'dt'".into()))?;

    if !temperature.is_finite() {
        return Err(FetchError::Malformed(format!(
            "temperature not finite: {temperature}"
        )));
    }
    if !(0.0..=100.0).contains(&humidity) {
        return Err(FetchError::Malformed(format!(
            "humidity out of range: {humidity}"
        )));
    }
    if !rainfall.is_finite() || rainfall < 0.0 {
        return Err(FetchError::Malformed(format!(
            "rainfall out of range: {rainfall}"
        )));
    }
    let observed_at = DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| FetchError::Malformed(format!("invalid 'dt': {dt}")))?;

    Ok(RawReading {
        location: town.to_string(),
        temperature,
        humidity,
        rainfall,
        observed_at,
    })
}
