//! Configuration management for the Farm Advisor server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FARM_ prefix (e.g. FARM__WEATHER__API_KEY)

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upload and result storage
    pub storage: StorageConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Overpass (OpenStreetMap) API configuration
    pub overpass: OverpassConfig,

    /// Object detection model configuration
    pub detection: DetectionConfig,

    /// Outbound HTTP settings
    pub http: HttpConfig,

    /// Request limits
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory original uploads are written to
    pub upload_dir: PathBuf,

    /// Directory annotated results are written under, one subdirectory per upload
    pub result_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Appended to the city in lookups, e.g. "MH,IN"
    pub region_qualifier: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    /// Overpass interpreter endpoint
    pub api_endpoint: String,

    /// Search radius around the city in meters
    pub search_radius_m: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectionConfig {
    /// Executable that runs the model (Ultralytics CLI by default)
    pub program: String,

    /// Path to the trained model weights
    pub model_path: PathBuf,

    /// Upper bound on a single detection run
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout applied to every outbound request
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    /// Detection runs allowed in flight at once
    pub max_concurrent_uploads: usize,

    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.upload_dir", "static/uploads")?
            .set_default("storage.result_dir", "static/results")?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.region_qualifier", "MH,IN")?
            .set_default(
                "overpass.api_endpoint",
                "https://overpass-api.de/api/interpreter",
            )?
            .set_default("overpass.search_radius_m", 5000)?
            .set_default("detection.program", "yolo")?
            .set_default("detection.timeout_secs", 120)?
            .set_default("http.timeout_secs", 15)?
            .set_default("limits.max_concurrent_uploads", 4)?
            .set_default("limits.max_upload_bytes", 10 * 1024 * 1024)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARM prefix)
            .add_source(
                Environment::with_prefix("FARM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would only fail at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "weather.api_key must be set (FARM__WEATHER__API_KEY)".to_string(),
            ));
        }
        if self.detection.model_path.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "detection.model_path must be set (FARM__DETECTION__MODEL_PATH)".to_string(),
            ));
        }
        if self.limits.max_concurrent_uploads == 0 {
            return Err(ConfigError::Message(
                "limits.max_concurrent_uploads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DetectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static/uploads"),
            result_dir: PathBuf::from("static/results"),
        }
    }
}
