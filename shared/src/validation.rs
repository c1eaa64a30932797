//! Input validation for the Farm Advisor platform
//!
//! Weather lookups are restricted to a fixed allow-list of Maharashtra
//! districts; no other place name is ever sent to the weather provider.

use serde::Serialize;
use thiserror::Error;

/// Message shown to the user when a city outside the allow-list is entered
pub const INVALID_CITY_MESSAGE: &str = "Enter Maharashtra city only";

/// Maharashtra cities accepted for weather lookups (lowercase)
pub const MAHARASHTRA_CITIES: &[&str] = &[
    "mumbai",
    "pune",
    "nagpur",
    "nashik",
    "aurangabad",
    "solapur",
    "kolhapur",
    "satara",
    "sangli",
    "jalgaon",
    "akola",
    "amravati",
    "latur",
    "nanded",
    "beed",
    "parbhani",
    "hingoli",
    "wardha",
    "chandrapur",
    "gondia",
    "bhandara",
    "ratnagiri",
    "sindhudurg",
    "ahmednagar",
    "dhule",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CityError {
    #[error("{}", INVALID_CITY_MESSAGE)]
    NotAllowed { input: String },
}

/// Structured error value carried back to the caller as data
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CityRejection {
    pub error: String,
}

impl From<CityError> for CityRejection {
    fn from(err: CityError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// A city name that passed allow-list validation. Always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct City(String);

impl City {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased name for display ("ahmednagar" -> "Ahmednagar")
    pub fn display_name(&self) -> String {
        self.0
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize `raw` (trim, lowercase) and check it against the allow-list
pub fn validate_city(raw: &str) -> Result<City, CityError> {
    let normalized = raw.trim().to_lowercase();
    if MAHARASHTRA_CITIES.contains(&normalized.as_str()) {
        Ok(City(normalized))
    } else {
        Err(CityError::NotAllowed {
            input: raw.to_string(),
        })
    }
}
