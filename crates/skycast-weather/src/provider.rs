//! Forecast client for weatherapi.com.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{NetworkError, ReqwestErrorExt, WeatherConfig, WeatherError};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::types::LocationIdentifier;
use crate::view::{project, ViewModel};

/// Days of forecast requested per fetch.
pub const FORECAST_DAYS: usize = 5;

/// `GET /forecast.json` response, reduced to the fields the dashboard shows.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: ApiLocation,
    pub current: ApiCurrent,
    pub forecast: ApiForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLocation {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrent {
    pub temp_c: f64,
    pub wind_mph: f64,
    /// 1 during daylight at the location, 0 otherwise
    pub is_day: u8,
    pub condition: ApiCondition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    /// Scheme-relative, e.g. `//cdn.weatherapi.com/weather/64x64/day/113.png`
    pub icon: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiForecast {
    pub forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiForecastDay {
    pub date: NaiveDate,
    pub day: ApiDay,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDay {
    pub avgtemp_c: f64,
    pub condition: ApiCondition,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(&config.base_url, config.api_key.clone(), config.timeout())
    }

    fn forecast_url(&self, location: &LocationIdentifier) -> Result<Url, WeatherError> {
        let days = FORECAST_DAYS.to_string();
        Url::parse_with_params(
            &format!("{}/forecast.json", self.base_url),
            &[
                ("q", location.as_str()),
                ("days", days.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| WeatherError::Network(NetworkError::ConnectionFailed(e.to_string())))
    }

    /// Fetch current conditions plus the 5-day forecast for `location` and
    /// project them for display.
    pub async fn fetch(&self, location: &LocationIdentifier) -> Result<ViewModel, WeatherError> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = self.forecast_url(location)?;
        tracing::debug!("Fetching forecast for {}", location);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message,
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        if parsed.forecast.forecastday.len() < FORECAST_DAYS {
            tracing::warn!(
                "Forecast for {} has {} days, expected {}",
                location,
                parsed.forecast.forecastday.len(),
                FORECAST_DAYS
            );
        }

        Ok(project(&parsed))
    }
}
