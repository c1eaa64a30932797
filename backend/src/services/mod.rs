//! Business logic services for the Farm Advisor server

pub mod advisory;
pub mod detection;

pub use advisory::{AdvisoryReport, AdvisoryService, WeatherOutcome};
pub use detection::DetectionService;
