//! Irrigation advice from rainfall and nearby water sources

use serde::{Deserialize, Serialize};

use super::water::WaterBody;

/// Rainfall band used to pick an irrigation strategy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RainfallStatus {
    #[serde(rename = "High Rainfall")]
    High,
    #[serde(rename = "Moderate Rainfall")]
    Moderate,
    #[serde(rename = "Low Rainfall")]
    Low,
}

impl RainfallStatus {
    /// High above 150, moderate for 50..=150, low below 50
    pub fn classify(rainfall_mm: f64) -> Self {
        if rainfall_mm > 150.0 {
            RainfallStatus::High
        } else if (50.0..=150.0).contains(&rainfall_mm) {
            RainfallStatus::Moderate
        } else {
            RainfallStatus::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RainfallStatus::High => "High Rainfall",
            RainfallStatus::Moderate => "Moderate Rainfall",
            RainfallStatus::Low => "Low Rainfall",
        }
    }

    pub fn irrigation(&self) -> &'static str {
        match self {
            RainfallStatus::High => "No irrigation required",
            RainfallStatus::Moderate => "Supplementary irrigation if required",
            RainfallStatus::Low => "Drip or sprinkler irrigation recommended",
        }
    }

    pub fn warning(&self) -> &'static str {
        match self {
            RainfallStatus::High => "Ensure drainage to prevent waterlogging",
            RainfallStatus::Moderate => "Monitor soil moisture",
            RainfallStatus::Low => "Use water-saving techniques",
        }
    }
}

impl std::fmt::Display for RainfallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const SOURCE_AVAILABLE: &str = "Nearby water bodies available";
pub const SOURCE_HARVEST_RAINWATER: &str = "No nearby water source – Harvest rainwater";

/// Water management recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationAdvice {
    pub status: RainfallStatus,
    pub irrigation: String,
    pub warning: String,
    pub source: String,
    pub details: Vec<WaterBody>,
}

/// Build irrigation advice; `water_bodies` is carried through verbatim
pub fn advise_irrigation(rainfall_mm: f64, water_bodies: Vec<WaterBody>) -> IrrigationAdvice {
    let status = RainfallStatus::classify(rainfall_mm);
    let source = if water_bodies.is_empty() {
        SOURCE_HARVEST_RAINWATER
    } else {
        SOURCE_AVAILABLE
    };

    IrrigationAdvice {
        status,
        irrigation: status.irrigation().to_string(),
        warning: status.warning().to_string(),
        source: source.to_string(),
        details: water_bodies,
    }
}
