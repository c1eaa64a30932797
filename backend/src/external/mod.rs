//! External collaborators: weather provider, geospatial provider and the
//! object detection model.
//!
//! Each collaborator sits behind a trait so the server can be driven with
//! substitutes in tests.

use std::path::Path;

use async_trait::async_trait;
use shared::{City, GpsCoordinates, WaterFeature, WeatherSnapshot};

use crate::error::AppResult;

pub mod detection;
pub mod overpass;
pub mod weather;

pub use detection::CommandDetector;
pub use overpass::OverpassClient;
pub use weather::WeatherClient;

/// Current weather for a validated city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &City) -> AppResult<WeatherSnapshot>;
}

/// Water features around a point
#[async_trait]
pub trait WaterFeatureProvider: Send + Sync {
    async fn water_features(
        &self,
        origin: GpsCoordinates,
        radius_m: u32,
    ) -> AppResult<Vec<WaterFeature>>;
}

/// Pretrained detection model.
///
/// `predict` reads `input` and writes at least one annotated image into
/// `output_root/run_name/`.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    async fn predict(&self, input: &Path, output_root: &Path, run_name: &str) -> AppResult<()>;
}
