//! Object detection through an external model runner
//!
//! The default runner is the Ultralytics CLI:
//! `yolo predict model=<weights> source=<image> project=<dir> name=<run>`

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::ObjectDetector;
use crate::error::{AppError, AppResult};

/// Runs the detection model as a child process
#[derive(Debug, Clone)]
pub struct CommandDetector {
    program: String,
    model_path: PathBuf,
    timeout: Duration,
}

impl CommandDetector {
    pub fn new(program: String, model_path: PathBuf, timeout: Duration) -> Self {
        Self {
            program,
            model_path,
            timeout,
        }
    }

    fn arguments(&self, input: &Path, output_root: &Path, run_name: &str) -> Vec<String> {
        vec![
            "predict".to_string(),
            format!("model={}", self.model_path.display()),
            format!("source={}", input.display()),
            "save=True".to_string(),
            format!("project={}", output_root.display()),
            format!("name={}", run_name),
            "exist_ok=True".to_string(),
        ]
    }
}

#[async_trait]
impl ObjectDetector for CommandDetector {
    async fn predict(&self, input: &Path, output_root: &Path, run_name: &str) -> AppResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.arguments(input, output_root, run_name))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(program = %self.program, input = %input.display(), "Running detector");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| AppError::DetectionTimeout(self.timeout.as_secs()))?
            .map_err(|e| {
                AppError::DetectionFailed(format!("Could not start {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(AppError::DetectionFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_direct_output_into_run_directory() {
        let detector = CommandDetector::new(
            "yolo".to_string(),
            PathBuf::from("models/best.pt"),
            Duration::from_secs(5),
        );
        let args = detector.arguments(
            Path::new("static/uploads/a.jpg"),
            Path::new("static/results"),
            "a.jpg",
        );
        assert_eq!(args[0], "predict");
        assert!(args.contains(&"model=models/best.pt".to_string()));
        assert!(args.contains(&"source=static/uploads/a.jpg".to_string()));
        assert!(args.contains(&"project=static/results".to_string()));
        assert!(args.contains(&"name=a.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_detection_failure() {
        let detector = CommandDetector::new(
            "definitely-not-a-real-detector-binary".to_string(),
            PathBuf::from("best.pt"),
            Duration::from_secs(5),
        );
        let err = detector
            .predict(Path::new("in.jpg"), Path::new("out"), "run")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DetectionFailed(_)));
    }
}
