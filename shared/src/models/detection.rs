//! Object detection results

use serde::{Deserialize, Serialize};

/// Annotated output of one detection run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionResult {
    /// Generated name the upload was stored under
    pub upload_filename: String,
    /// Public URL of the annotated image
    pub result_url: String,
}
