//! Overpass API client for locating water features near a point

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{GpsCoordinates, WaterFeature};

use super::WaterFeatureProvider;
use crate::error::{AppError, AppResult};

/// Overpass interpreter client
#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
    center: Option<OverpassPoint>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OverpassPoint {
    lat: f64,
    lon: f64,
}

impl From<OverpassElement> for WaterFeature {
    fn from(mut element: OverpassElement) -> Self {
        let position = match (element.center, element.lat, element.lon) {
            (Some(center), _, _) => Some(GpsCoordinates::new(center.lat, center.lon)),
            (None, Some(lat), Some(lon)) => Some(GpsCoordinates::new(lat, lon)),
            _ => None,
        };

        WaterFeature {
            name: element.tags.remove("name"),
            width: element.tags.remove("width"),
            position,
        }
    }
}

/// Overpass QL for standing water, water relations and waterways within
/// `radius_m` meters of `origin`
pub fn water_query(origin: GpsCoordinates, radius_m: u32) -> String {
    let around = format!("(around:{},{},{})", radius_m, origin.latitude, origin.longitude);
    format!(
        "[out:json];\n(\n  way[\"natural\"=\"water\"]{around};\n  relation[\"natural\"=\"water\"]{around};\n  way[\"waterway\"]{around};\n);\nout center tags;\n"
    )
}

impl OverpassClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Fetch water features around `origin`, in the order Overpass returns them
    pub async fn find_water_features(
        &self,
        origin: GpsCoordinates,
        radius_m: u32,
    ) -> AppResult<Vec<WaterFeature>> {
        let query = water_query(origin, radius_m);

        let response = self
            .client
            .post(&self.endpoint)
            .body(query)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Overpass request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "Overpass API returned an error");
            return Err(AppError::ExternalService(format!(
                "Overpass API returned {}",
                status
            )));
        }

        let data: OverpassResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Overpass response: {}", e))
        })?;

        tracing::debug!(elements = data.elements.len(), "Overpass query complete");

        Ok(data.elements.into_iter().map(WaterFeature::from).collect())
    }
}

#[async_trait]
impl WaterFeatureProvider for OverpassClient {
    async fn water_features(
        &self,
        origin: GpsCoordinates,
        radius_m: u32,
    ) -> AppResult<Vec<WaterFeature>> {
        self.find_water_features(origin, radius_m).await
    }
}
