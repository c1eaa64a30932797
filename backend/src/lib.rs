//! Farm Advisor server
//!
//! Weed detection on uploaded field images, plus weather-driven crop and
//! irrigation advice for Maharashtra cities.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod views;

pub use crate::config::Config;

use external::{CommandDetector, OverpassClient, WeatherClient};
use services::{detection, AdvisoryService, DetectionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisory: AdvisoryService,
    pub detection: DetectionService,
}

impl AppState {
    /// Wire the production collaborators from configuration
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout())
            .build()?;

        let weather = WeatherClient::new(
            http.clone(),
            config.weather.api_key.clone(),
            config.weather.api_endpoint.clone(),
            config.weather.region_qualifier.clone(),
        );
        let overpass = OverpassClient::new(http, config.overpass.api_endpoint.clone());
        let detector = CommandDetector::new(
            config.detection.program.clone(),
            config.detection.model_path.clone(),
            config.detection.timeout(),
        );

        let advisory = AdvisoryService::new(
            Arc::new(weather),
            Arc::new(overpass),
            config.overpass.search_radius_m,
        );
        let detection = DetectionService::new(
            Arc::new(detector),
            &config.storage,
            config.limits.max_concurrent_uploads,
        );

        Ok(Self {
            config: Arc::new(config),
            advisory,
            detection,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let storage = &state.config.storage;
    let body_limit = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .nest_service(
            detection::UPLOADS_URL_PREFIX,
            ServeDir::new(&storage.upload_dir),
        )
        .nest_service(
            detection::RESULTS_URL_PREFIX,
            ServeDir::new(&storage.result_dir),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
