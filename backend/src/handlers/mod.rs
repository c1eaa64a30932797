//! HTTP handlers for the Farm Advisor server

pub mod advisory;
pub mod detection;
pub mod form;
pub mod health;
pub mod index;

pub use advisory::get_advisory;
pub use detection::create_detection;
pub use health::health_check;
pub use index::{api_report, index, submit};
