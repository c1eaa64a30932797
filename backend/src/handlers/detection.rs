//! JSON detection endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use shared::DetectionResult;

use super::form::ReportForm;
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Run detection on the `image` field of a multipart upload
pub async fn create_detection(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DetectionResult>> {
    let form = ReportForm::from_multipart(multipart).await?;
    let image = form.image.ok_or_else(|| AppError::Validation {
        field: "image".to_string(),
        message: "An image file is required".to_string(),
    })?;

    let result = state.detection.detect(&image).await?;
    Ok(Json(result))
}
