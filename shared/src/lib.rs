//! Shared types and domain logic for the Farm Advisor platform
//!
//! Everything in this crate is free of I/O: city validation, crop
//! recommendation, water-body selection and irrigation advice. The backend
//! feeds it data fetched from external collaborators.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
