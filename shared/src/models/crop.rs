//! Crop recommendation from current temperature and humidity

/// Ordered crop suggestions, each of the form "Crop – Soil type"
pub type CropList = Vec<String>;

const WARM_HUMID: &[&str] = &[
    "Rice – Clayey / Alluvial soil",
    "Cotton – Black cotton soil",
    "Jowar – Medium to deep black soil",
    "Soybean – Well-drained black soil",
    "Bajra – Sandy loam soil",
];

const MILD_DRY: &[&str] = &[
    "Wheat – Loamy soil",
    "Gram – Sandy loam soil",
    "Mustard – Alluvial soil",
    "Safflower – Deep black soil",
];

const WARM: &[&str] = &[
    "Sugarcane – Deep black soil (irrigated)",
    "Sunflower – Well-drained loamy soil",
    "Banana – Rich alluvial soil",
    "Turmeric – Sandy loam soil",
];

const FALLBACK: &[&str] = &["Vegetables – Loamy soil"];

/// Climate bucket a (temperature, humidity) reading falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropSeason {
    WarmHumid,
    MildDry,
    Warm,
    Other,
}

impl CropSeason {
    /// Classify a reading; rules are checked in order and the first match wins
    pub fn classify(temperature_celsius: f64, humidity_percent: f64) -> Self {
        if temperature_celsius >= 25.0 && humidity_percent >= 60.0 {
            CropSeason::WarmHumid
        } else if (10.0..25.0).contains(&temperature_celsius) && humidity_percent < 60.0 {
            CropSeason::MildDry
        } else if temperature_celsius >= 21.0 {
            CropSeason::Warm
        } else {
            CropSeason::Other
        }
    }

    pub fn crops(&self) -> &'static [&'static str] {
        match self {
            CropSeason::WarmHumid => WARM_HUMID,
            CropSeason::MildDry => MILD_DRY,
            CropSeason::Warm => WARM,
            CropSeason::Other => FALLBACK,
        }
    }
}

/// Suggested crops for the given temperature (°C) and relative humidity (%)
pub fn recommend_crops(temperature_celsius: f64, humidity_percent: f64) -> CropList {
    CropSeason::classify(temperature_celsius, humidity_percent)
        .crops()
        .iter()
        .map(|c| c.to_string())
        .collect()
}
