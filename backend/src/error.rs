//! Error handling for the Farm Advisor server
//!
//! Every failure is mapped to a JSON body of the form
//! `{"error": {"code": ..., "message": ...}}` with a matching status code.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::CityError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload exceeds the size limit: {0}")]
    PayloadTooLarge(String),

    // Detection errors
    #[error("Detection failed: {0}")]
    DetectionFailed(String),

    #[error("Detection timed out after {0} seconds")]
    DetectionTimeout(u64),

    #[error("Detection produced no output in {0}")]
    EmptyDetectionOutput(String),

    #[error("Too many uploads in progress")]
    Busy,

    // External service errors
    #[error("Weather service unavailable (status {status})")]
    WeatherServiceUnavailable { status: u16 },

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),
}

impl From<CityError> for AppError {
    fn from(err: CityError) -> Self {
        AppError::Validation {
            field: "city".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest(format!("Invalid multipart form: {}", err))
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => "The uploaded file is too large".to_string(),
            AppError::DetectionFailed(_) => {
                "Weed detection failed. Please try another image.".to_string()
            }
            AppError::DetectionTimeout(_) => {
                "Weed detection took too long. Please try again.".to_string()
            }
            AppError::EmptyDetectionOutput(_) => {
                "Weed detection produced no result image. Please try another image.".to_string()
            }
            AppError::Busy => "The server is busy processing other images. Please retry shortly."
                .to_string(),
            AppError::WeatherServiceUnavailable { .. } => {
                "Weather service is temporarily unavailable".to_string()
            }
            AppError::ExternalService(_) => "An external service is unavailable".to_string(),
            AppError::StorageError(_) => "Could not store the uploaded image".to_string(),
        }
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::DetectionFailed(_) => (StatusCode::BAD_GATEWAY, "DETECTION_FAILED"),
            AppError::DetectionTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "DETECTION_TIMEOUT"),
            AppError::EmptyDetectionOutput(_) => {
                (StatusCode::BAD_GATEWAY, "EMPTY_DETECTION_OUTPUT")
            }
            AppError::Busy => (StatusCode::SERVICE_UNAVAILABLE, "BUSY"),
            AppError::WeatherServiceUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "WEATHER_SERVICE_UNAVAILABLE")
            }
            AppError::ExternalService(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
            AppError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let field = match &self {
            AppError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };
        let error_detail = ErrorDetail {
            code: code.to_string(),
            message: self.user_message(),
            field,
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_error_maps_to_validation() {
        let err: AppError = shared::validate_city("Delhi").unwrap_err().into();
        assert_eq!(err.user_message(), shared::INVALID_CITY_MESSAGE);
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));
    }

    #[test]
    fn test_empty_output_is_a_gateway_error() {
        let err = AppError::EmptyDetectionOutput("static/results/x.jpg".to_string());
        assert_eq!(err.status_and_code().1, "EMPTY_DETECTION_OUTPUT");
        assert!(err.user_message().contains("no result image"));
    }

    #[test]
    fn test_every_variant_has_a_distinct_code() {
        let errors = vec![
            AppError::Validation {
                field: "city".to_string(),
                message: "bad".to_string(),
            },
            AppError::BadRequest("bad".to_string()),
            AppError::PayloadTooLarge("big".to_string()),
            AppError::DetectionFailed("crash".to_string()),
            AppError::DetectionTimeout(120),
            AppError::EmptyDetectionOutput("dir".to_string()),
            AppError::Busy,
            AppError::WeatherServiceUnavailable { status: 500 },
            AppError::ExternalService("down".to_string()),
            AppError::StorageError(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
        ];

        let mut codes = std::collections::HashSet::new();
        for err in &errors {
            assert!(codes.insert(err.status_and_code().1), "duplicate code for {:?}", err);
            assert!(!err.user_message().is_empty());
        }
        assert_eq!(
            AppError::PayloadTooLarge("big".to_string()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_weather_unavailable_status() {
        let response = AppError::WeatherServiceUnavailable { status: 401 }.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
