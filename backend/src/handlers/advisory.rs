//! JSON advisory endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::validate_city;

use crate::error::AppResult;
use crate::services::AdvisoryReport;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AdvisoryQuery {
    pub city: String,
}

/// Weather, crops and irrigation advice for a city
pub async fn get_advisory(
    State(state): State<AppState>,
    Query(query): Query<AdvisoryQuery>,
) -> AppResult<Json<AdvisoryReport>> {
    let city = validate_city(&query.city)?;
    let report = state.advisory.strict_report_for(&city).await?;
    Ok(Json(report))
}
