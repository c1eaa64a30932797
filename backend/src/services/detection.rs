//! Upload storage and weed detection

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::DetectionResult;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::external::ObjectDetector;

/// URL prefix the upload directory is served under
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads";

/// URL prefix the result directory is served under
pub const RESULTS_URL_PREFIX: &str = "/static/results";

/// Extension given to every stored upload
const UPLOAD_EXTENSION: &str = "jpg";

/// Stores uploads and runs the detector on them
#[derive(Clone)]
pub struct DetectionService {
    detector: Arc<dyn ObjectDetector>,
    upload_dir: PathBuf,
    result_dir: PathBuf,
    permits: Arc<Semaphore>,
}

impl DetectionService {
    pub fn new(
        detector: Arc<dyn ObjectDetector>,
        storage: &StorageConfig,
        max_concurrent: usize,
    ) -> Self {
        Self {
            detector,
            upload_dir: storage.upload_dir.clone(),
            result_dir: storage.result_dir.clone(),
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Persist `image`, run detection and locate the annotated result
    pub async fn detect(&self, image: &[u8]) -> AppResult<DetectionResult> {
        let _permit = self
            .permits
            .clone()
            .try_acquire_owned()
            .map_err(|_| AppError::Busy)?;

        let filename = format!("{}.{}", Uuid::new_v4(), UPLOAD_EXTENSION);

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.result_dir).await?;

        let input_path = self.upload_dir.join(&filename);
        tokio::fs::write(&input_path, image).await?;
        tracing::info!(file = %filename, bytes = image.len(), "Stored upload");

        self.detector
            .predict(&input_path, &self.result_dir, &filename)
            .await?;

        let run_dir = self.result_dir.join(&filename);
        let entry = first_result_entry(&run_dir).await?;

        Ok(DetectionResult {
            result_url: format!("{}/{}/{}", RESULTS_URL_PREFIX, filename, entry),
            upload_filename: filename,
        })
    }
}

/// First file name in `run_dir`, by name. A missing or empty directory
/// means the detector produced nothing.
pub async fn first_result_entry(run_dir: &Path) -> AppResult<String> {
    let empty = || AppError::EmptyDetectionOutput(run_dir.display().to_string());

    let mut entries = match tokio::fs::read_dir(run_dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(empty()),
        Err(err) => return Err(err.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    names.into_iter().next().ok_or_else(empty)
}
