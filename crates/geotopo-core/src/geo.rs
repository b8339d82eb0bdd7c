// crates/geotopo-core/src/geo.rs
use serde::{Deserialize, Serialize};

/// Kilometres per degree used by the flat-earth distance estimate.
pub const KM_PER_DEGREE: f64 = 111.32;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `(0, 0)` is the "unknown" sentinel used by device inventories.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Coarse distance estimate between two points.
    ///
    /// Squared degree deltas scaled by [`KM_PER_DEGREE`]. This is only a
    /// visual weighting for synthesized links, not a geodesic distance.
    pub fn rough_distance_km(&self, other: &GeoCoordinate) -> f64 {
        let d_lat = other.latitude - self.latitude;
        let d_lon = other.longitude - self.longitude;
        (d_lat * d_lat + d_lon * d_lon) * KM_PER_DEGREE
    }

    /// Continental label for a coordinate, used for node annotations.
    pub fn region(&self) -> GeoRegion {
        GeoRegion::classify(self.longitude)
    }
}

/// A pixel position on a map surface or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapCoordinate {
    pub x: f64,
    pub y: f64,
}

impl MapCoordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Broad geographic region derived from longitude bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoRegion {
    NorthAmerica,
    SouthAmerica,
    EuropeAfrica,
    AsiaOceania,
    Unknown,
}

impl GeoRegion {
    /// Bands are checked in order, so the North America band wins where it
    /// overlaps with South America.
    pub fn classify(longitude: f64) -> Self {
        if (-130.0..=-60.0).contains(&longitude) {
            GeoRegion::NorthAmerica
        } else if (-20.0..=50.0).contains(&longitude) {
            GeoRegion::EuropeAfrica
        } else if (50.0..=180.0).contains(&longitude) {
            GeoRegion::AsiaOceania
        } else if (-90.0..=-30.0).contains(&longitude) {
            GeoRegion::SouthAmerica
        } else {
            GeoRegion::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeoRegion::NorthAmerica => "North America",
            GeoRegion::SouthAmerica => "South America",
            GeoRegion::EuropeAfrica => "Europe/Africa",
            GeoRegion::AsiaOceania => "Asia/Oceania",
            GeoRegion::Unknown => "Unknown Region",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sentinel() {
        assert!(GeoCoordinate::default().is_zero());
        assert!(!GeoCoordinate::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn rough_distance_uses_squared_deltas() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(3.0, 4.0);
        assert!((a.rough_distance_km(&b) - 25.0 * KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn regions_by_longitude() {
        assert_eq!(GeoCoordinate::new(40.7, -74.0).region(), GeoRegion::NorthAmerica);
        assert_eq!(GeoCoordinate::new(-23.5, -46.6).region(), GeoRegion::SouthAmerica);
        assert_eq!(GeoCoordinate::new(51.5, -0.1).region(), GeoRegion::EuropeAfrica);
        assert_eq!(GeoCoordinate::new(35.7, 139.7).region(), GeoRegion::AsiaOceania);
        assert_eq!(GeoCoordinate::new(21.3, -157.8).region(), GeoRegion::Unknown);
    }
}
