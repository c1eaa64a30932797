//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use farm_advisor_backend::{
    config::{
        DetectionConfig, HttpConfig, LimitsConfig, OverpassConfig, ServerConfig, StorageConfig,
        WeatherConfig,
    },
    error::{AppError, AppResult},
    external::{ObjectDetector, OverpassClient, WeatherClient},
    services::{AdvisoryService, DetectionService},
    AppState, Config,
};

pub const BOUNDARY: &str = "farm-advisor-test-boundary";

/// Canned responses served by the fake upstream APIs
#[derive(Clone)]
pub struct Upstream {
    pub weather_status: StatusCode,
    pub weather_body: serde_json::Value,
    pub overpass_status: StatusCode,
    pub overpass_body: serde_json::Value,
    /// `q` parameters the weather API received
    pub weather_queries: Arc<Mutex<Vec<String>>>,
    /// Bodies the Overpass API received
    pub overpass_queries: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub fn pune(overpass_elements: serde_json::Value) -> Self {
        Self {
            weather_status: StatusCode::OK,
            weather_body: serde_json::json!({
                "coord": { "lat": 18.52, "lon": 73.85 },
                "main": { "temp": 27.0, "humidity": 65 },
                "rain": { "1h": 5.0 },
                "name": "Pune"
            }),
            overpass_status: StatusCode::OK,
            overpass_body: serde_json::json!({ "elements": overpass_elements }),
            weather_queries: Arc::default(),
            overpass_queries: Arc::default(),
        }
    }
}

/// Start fake weather and Overpass APIs; returns their base URL
pub async fn spawn_upstream(upstream: Upstream) -> String {
    let weather = upstream.clone();
    let overpass = upstream.clone();

    let app = Router::new()
        .route(
            "/weather",
            get(
                move |axum::extract::Query(params): axum::extract::Query<
                    std::collections::HashMap<String, String>,
                >| {
                    let weather = weather.clone();
                    async move {
                        if let Some(q) = params.get("q") {
                            weather.weather_queries.lock().unwrap().push(q.clone());
                        }
                        (weather.weather_status, Json(weather.weather_body))
                    }
                },
            ),
        )
        .route(
            "/interpreter",
            post(move |body: String| {
                let overpass = overpass.clone();
                async move {
                    overpass.overpass_queries.lock().unwrap().push(body);
                    (overpass.overpass_status, Json(overpass.overpass_body))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Detector that writes (or withholds) an annotated image
pub struct StubDetector {
    pub produce_output: bool,
    pub calls: Mutex<Vec<(PathBuf, String)>>,
}

impl StubDetector {
    pub fn new(produce_output: bool) -> Self {
        Self {
            produce_output,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ObjectDetector for StubDetector {
    async fn predict(&self, input: &Path, output_root: &Path, run_name: &str) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), run_name.to_string()));

        let run_dir = output_root.join(run_name);
        tokio::fs::create_dir_all(&run_dir).await?;
        if self.produce_output {
            let original = tokio::fs::read(input).await?;
            tokio::fs::write(run_dir.join(run_name), original).await?;
        }
        Ok(())
    }
}

/// Detector that always fails
pub struct FailingDetector;

#[async_trait]
impl ObjectDetector for FailingDetector {
    async fn predict(&self, _input: &Path, _output_root: &Path, _run_name: &str) -> AppResult<()> {
        Err(AppError::DetectionFailed("model crashed".to_string()))
    }
}

pub fn test_config(storage_root: &Path, upstream_url: &str) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        storage: StorageConfig {
            upload_dir: storage_root.join("uploads"),
            result_dir: storage_root.join("results"),
        },
        weather: WeatherConfig {
            api_endpoint: upstream_url.to_string(),
            api_key: "test-key".to_string(),
            region_qualifier: "MH,IN".to_string(),
        },
        overpass: OverpassConfig {
            api_endpoint: format!("{}/interpreter", upstream_url),
            search_radius_m: 5000,
        },
        detection: DetectionConfig {
            program: "yolo".to_string(),
            model_path: PathBuf::from("best.pt"),
            timeout_secs: 5,
        },
        http: HttpConfig { timeout_secs: 5 },
        limits: LimitsConfig {
            max_concurrent_uploads: 2,
            max_upload_bytes: 1024 * 1024,
        },
    }
}

/// App state using real HTTP clients against `upstream_url` and `detector`
pub fn test_state(
    storage_root: &Path,
    upstream_url: &str,
    detector: Arc<dyn ObjectDetector>,
) -> AppState {
    let config = test_config(storage_root, upstream_url);
    let http = reqwest::Client::builder()
        .timeout(config.http.timeout())
        .build()
        .unwrap();

    let advisory = AdvisoryService::new(
        Arc::new(WeatherClient::new(
            http.clone(),
            config.weather.api_key.clone(),
            config.weather.api_endpoint.clone(),
            config.weather.region_qualifier.clone(),
        )),
        Arc::new(OverpassClient::new(
            http,
            config.overpass.api_endpoint.clone(),
        )),
        config.overpass.search_radius_m,
    );
    let detection = DetectionService::new(
        detector,
        &config.storage,
        config.limits.max_concurrent_uploads,
    );

    AppState {
        config: Arc::new(config),
        advisory,
        detection,
    }
}

/// Encode a multipart form with optional city and image fields
pub fn multipart_body(city: Option<&str>, image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(city) = city {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"city\"\r\n\r\n{city}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
