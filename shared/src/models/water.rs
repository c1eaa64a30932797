//! Nearby water body selection

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{round2, GpsCoordinates};

/// Features narrower than this (in the data source's units) are ignored
pub const MIN_WATER_WIDTH: f64 = 3.0;

/// A named water body near the query point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterBody {
    pub name: String,
    /// Great-circle distance from the query point in km, two decimals
    pub distance: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Candidate map feature as returned by a geospatial provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterFeature {
    pub name: Option<String>,
    /// Raw `width` tag; may not be numeric
    pub width: Option<String>,
    /// Representative point: the feature centre if known, else its own position
    pub position: Option<GpsCoordinates>,
}

impl WaterFeature {
    /// True when the width tag is numeric and below [`MIN_WATER_WIDTH`].
    /// Unparsable widths never count as narrow.
    pub fn is_narrow(&self) -> bool {
        self.width
            .as_deref()
            .and_then(|w| w.trim().parse::<f64>().ok())
            .map(|w| w < MIN_WATER_WIDTH)
            .unwrap_or(false)
    }
}

/// Select named water bodies around `origin`, in input order.
///
/// The first feature seen for a name wins; later features with the same
/// name are dropped even when they are closer.
pub fn locate_water_bodies<I>(origin: GpsCoordinates, features: I) -> Vec<WaterBody>
where
    I: IntoIterator<Item = WaterFeature>,
{
    let mut water_bodies = Vec::new();
    let mut seen_names = HashSet::new();

    for feature in features {
        let name = match feature.name.as_deref() {
            Some(name) if !name.is_empty() && !seen_names.contains(name) => name.to_string(),
            _ => continue,
        };

        if feature.is_narrow() {
            continue;
        }

        let Some(position) = feature.position else {
            continue;
        };

        water_bodies.push(WaterBody {
            distance: round2(origin.distance_km(&position)),
            lat: position.latitude,
            lon: position.longitude,
            name: name.clone(),
        });
        seen_names.insert(name);
    }

    water_bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(name: &str, width: Option<&str>, lat: f64, lon: f64) -> WaterFeature {
        WaterFeature {
            name: Some(name.to_string()),
            width: width.map(str::to_string),
            position: Some(GpsCoordinates::new(lat, lon)),
        }
    }

    fn origin() -> GpsCoordinates {
        GpsCoordinates::new(18.52, 73.85)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let bodies = locate_water_bodies(
            origin(),
            vec![
                feature("Mula River", None, 18.60, 73.90),
                feature("Mula River", None, 18.521, 73.851),
            ],
        );
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].lat, 18.60);
    }

    #[test]
    fn test_width_filter() {
        let bodies = locate_water_bodies(
            origin(),
            vec![
                feature("Narrow Canal", Some("2"), 18.53, 73.86),
                feature("Wide Canal", Some("5"), 18.53, 73.86),
                feature("Odd Canal", Some("abc"), 18.53, 73.86),
            ],
        );
        let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Wide Canal", "Odd Canal"]);
    }

    #[test]
    fn test_unnamed_and_unlocated_features_are_skipped() {
        let bodies = locate_water_bodies(
            origin(),
            vec![
                WaterFeature {
                    name: None,
                    width: None,
                    position: Some(GpsCoordinates::new(18.53, 73.86)),
                },
                WaterFeature {
                    name: Some("Ghost Lake".to_string()),
                    width: None,
                    position: None,
                },
                feature("Ghost Lake", None, 18.54, 73.87),
            ],
        );
        // A feature skipped for missing coordinates does not claim its name
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].name, "Ghost Lake");
    }

    #[test]
    fn test_narrow_feature_does_not_claim_name() {
        let bodies = locate_water_bodies(
            origin(),
            vec![
                feature("Mutha Canal", Some("1.5"), 18.53, 73.86),
                feature("Mutha Canal", Some("4"), 18.54, 73.87),
            ],
        );
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].lat, 18.54);
    }

    #[test]
    fn test_distance_is_rounded() {
        let bodies = locate_water_bodies(origin(), vec![feature("Lake", None, 18.53, 73.86)]);
        let d = bodies[0].distance;
        assert_eq!(d, round2(d));
        assert!(d > 1.3 && d < 1.6);
    }

    #[test]
    fn test_is_narrow_trims_whitespace() {
        assert!(feature("x", Some(" 2 "), 0.0, 0.0).is_narrow());
        assert!(!feature("x", Some("3"), 0.0, 0.0).is_narrow());
        assert!(!feature("x", Some("2 m"), 0.0, 0.0).is_narrow());
        assert!(!feature("x", None, 0.0, 0.0).is_narrow());
    }
}
