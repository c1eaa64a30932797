//! Route definitions for the Farm Advisor server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/report", post(handlers::api_report))
        .route("/advisory", get(handlers::get_advisory))
        .route("/detections", post(handlers::create_detection))
}
