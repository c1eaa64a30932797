//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use shared::{City, WeatherSnapshot};

use super::WeatherProvider;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    region_qualifier: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    main: OWMMain,
    rain: Option<OWMRain>,
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient sharing `client`
    pub fn new(client: Client, api_key: String, base_url: String, region_qualifier: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            region_qualifier,
        }
    }

    fn location_query(&self, city: &City) -> String {
        format!("{},{}", city.as_str(), self.region_qualifier)
    }

    /// Fetch current weather conditions for a city
    pub async fn get_current_weather(&self, city: &City) -> AppResult<WeatherSnapshot> {
        let url = format!("{}/weather", self.base_url);
        let location = self.location_query(city);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, city = %city, "Weather API returned an error");
            return Err(AppError::WeatherServiceUnavailable {
                status: status.as_u16(),
            });
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_current_response(city, data))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_weather(&self, city: &City) -> AppResult<WeatherSnapshot> {
        self.get_current_weather(city).await
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(city: &City, data: OWMCurrentResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.display_name(),
        temperature: data.main.temp,
        humidity: data.main.humidity,
        rainfall: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
        latitude: data.coord.lat,
        longitude: data.coord.lon,
        observed_at: data.dt.and_then(|dt| DateTime::from_timestamp(dt, 0)),
    }
}
