//! City advisory: weather, crop suggestions and irrigation advice

use std::sync::Arc;

use serde::Serialize;
use shared::{
    advise_irrigation, locate_water_bodies, recommend_crops, validate_city, City, CityError,
    CityRejection, CropList, IrrigationAdvice, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::external::{WaterFeatureProvider, WeatherProvider};

/// Result of the weather step for one request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WeatherOutcome {
    /// Weather was fetched for an allowed city
    Observed(WeatherSnapshot),
    /// The city is not on the allow-list; carries `{error: ...}`
    InvalidCity(CityRejection),
    /// The weather provider failed
    Unavailable { error: String },
}

/// Everything derived from a city lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvisoryReport {
    pub weather: WeatherOutcome,
    pub crops: CropList,
    pub water: Option<IrrigationAdvice>,
    /// Set when the water-body query failed, as opposed to finding nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_lookup_error: Option<String>,
}

impl AdvisoryReport {
    fn without_weather(weather: WeatherOutcome) -> Self {
        Self {
            weather,
            crops: Vec::new(),
            water: None,
            water_lookup_error: None,
        }
    }
}

/// Orchestrates the weather and water-body collaborators
#[derive(Clone)]
pub struct AdvisoryService {
    weather: Arc<dyn WeatherProvider>,
    water: Arc<dyn WaterFeatureProvider>,
    search_radius_m: u32,
}

impl AdvisoryService {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        water: Arc<dyn WaterFeatureProvider>,
        search_radius_m: u32,
    ) -> Self {
        Self {
            weather,
            water,
            search_radius_m,
        }
    }

    /// Build a report for raw user input. Rejections and provider failures
    /// are returned as data in [`WeatherOutcome`], never as errors.
    pub async fn report_for(&self, raw_city: &str) -> AdvisoryReport {
        let city = match validate_city(raw_city) {
            Ok(city) => city,
            Err(err) => {
                let CityError::NotAllowed { input } = &err;
                tracing::debug!(input = %input, error = %err, "Rejected city outside allow-list");
                return AdvisoryReport::without_weather(WeatherOutcome::InvalidCity(err.into()));
            }
        };

        match self.weather.current_weather(&city).await {
            Ok(snapshot) => self.assess(snapshot).await,
            Err(err) => {
                tracing::warn!(city = %city, error = %err, "Weather lookup failed");
                AdvisoryReport::without_weather(WeatherOutcome::Unavailable {
                    error: err.user_message(),
                })
            }
        }
    }

    /// Build a report for a validated city, propagating provider failures
    pub async fn strict_report_for(&self, city: &City) -> AppResult<AdvisoryReport> {
        let snapshot = self.weather.current_weather(city).await?;
        Ok(self.assess(snapshot).await)
    }

    /// Derive crops and irrigation advice from a weather snapshot
    pub async fn assess(&self, snapshot: WeatherSnapshot) -> AdvisoryReport {
        let crops = recommend_crops(snapshot.temperature, snapshot.humidity);

        let origin = snapshot.coordinates();
        let (water_bodies, water_lookup_error) =
            match self.water.water_features(origin, self.search_radius_m).await {
                Ok(features) => (locate_water_bodies(origin, features), None),
                Err(err) => {
                    tracing::warn!(error = %err, "Water body lookup failed");
                    (Vec::new(), Some(lookup_message(&err)))
                }
            };

        tracing::info!(
            city = %snapshot.city,
            crops = crops.len(),
            water_bodies = water_bodies.len(),
            "Advisory generated"
        );

        AdvisoryReport {
            water: Some(advise_irrigation(snapshot.rainfall, water_bodies)),
            weather: WeatherOutcome::Observed(snapshot),
            crops,
            water_lookup_error,
        }
    }
}

fn lookup_message(err: &AppError) -> String {
    format!("Water body lookup failed: {}", err.user_message())
}
