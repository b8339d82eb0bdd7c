// crates/geotopo-core/src/projection/tables.rs

//! Hand-curated corrections applied around the base projection.

use crate::geo::MapCoordinate;

/// Pixel space the override coordinates were measured in.
pub const OVERRIDE_SPACE: (f64, f64) = (1000.0, 500.0);

/// A well-known point with a fixed map position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Override {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Position in [`OVERRIDE_SPACE`].
    pub x: f64,
    pub y: f64,
}

const fn point(name: &'static str, latitude: f64, longitude: f64, x: f64, y: f64) -> Override {
    Override {
        name,
        latitude,
        longitude,
        x,
        y,
    }
}

pub const OVERRIDES: &[Override] = &[
    point("New York", 40.7128, -74.0060, 304.1, 139.8),
    point("Los Angeles", 34.0522, -118.2426, 186.3, 163.9),
    point("Chicago", 41.8781, -87.6298, 267.8, 135.6),
    point("Toronto", 43.6532, -79.3832, 303.5, 130.6),
    point("London", 51.5074, -0.1278, 493.7, 100.9),
    point("Paris", 48.8566, 2.3522, 497.8, 109.5),
    point("Frankfurt", 50.1109, 8.6821, 514.5, 106.0),
    point("Amsterdam", 52.3676, 4.9041, 504.8, 97.8),
    point("Tokyo", 35.6762, 139.6503, 855.7, 155.9),
    point("Singapore", 1.3521, 103.8198, 812.9, 289.8),
    point("Mumbai", 19.0760, 72.8777, 694.7, 218.7),
    point("Seoul", 37.5665, 126.9780, 830.6, 151.2),
    point("Sydney", -33.8688, 151.2093, 895.2, 407.6),
    point("Melbourne", -37.8136, 144.9631, 880.0, 420.3),
    point("São Paulo", -23.5505, -46.6333, 361.5, 381.1),
    point("Bogotá", 4.7110, -74.0721, 287.0, 280.5),
    point("Cairo", 30.0444, 31.2357, 579.9, 180.5),
    point("Cape Town", -33.9249, 18.4241, 543.6, 419.8),
];

/// Lookup key: coordinates rounded to four decimals.
pub fn override_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}_{longitude:.4}")
}

pub fn find_override(latitude: f64, longitude: f64) -> Option<&'static Override> {
    let key = override_key(latitude, longitude);
    OVERRIDES
        .iter()
        .find(|o| override_key(o.latitude, o.longitude) == key)
}

impl Override {
    /// Position scaled into a surface of `width` × `height`.
    pub fn scaled_to(&self, width: f64, height: f64) -> MapCoordinate {
        MapCoordinate::new(
            self.x / OVERRIDE_SPACE.0 * width,
            self.y / OVERRIDE_SPACE.1 * height,
        )
    }
}

/// Named bounding box with a pixel nudge in reference-map space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionNudge {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub dx: f64,
    pub dy: f64,
}

impl RegionNudge {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

const fn region(
    name: &'static str,
    lat: (f64, f64),
    lon: (f64, f64),
    dx: f64,
    dy: f64,
) -> RegionNudge {
    RegionNudge {
        name,
        min_lat: lat.0,
        max_lat: lat.1,
        min_lon: lon.0,
        max_lon: lon.1,
        dx,
        dy,
    }
}

/// Checked in order; the first containing region applies.
pub const REGION_NUDGES: &[RegionNudge] = &[
    region("Japan", (30.0, 46.0), (129.0, 146.0), -4.0, 0.0),
    region("British Isles", (49.5, 59.0), (-11.0, 2.0), 3.0, 0.0),
    region("New Zealand", (-48.0, -34.0), (166.0, 179.0), -3.0, 0.0),
    region("Chile", (-56.0, -17.0), (-76.0, -66.0), 3.0, 0.0),
    region("Caribbean", (10.0, 27.0), (-90.0, -59.0), 0.0, -2.0),
    region("Southeast Asia", (-11.0, 20.0), (95.0, 125.0), 0.0, -3.0),
    region("Mediterranean", (30.0, 46.0), (-6.0, 36.0), 0.0, -2.0),
];

pub fn find_region(latitude: f64, longitude: f64) -> Option<&'static RegionNudge> {
    REGION_NUDGES.iter().find(|r| r.contains(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_keys_round_to_four_decimals() {
        assert_eq!(override_key(40.71283, -74.00601), "40.7128_-74.0060");
        assert_eq!(find_override(40.712800001, -74.006).unwrap().name, "New York");
        assert!(find_override(40.7, -74.0).is_none());
    }

    #[test]
    fn override_table_has_unique_keys() {
        for (i, a) in OVERRIDES.iter().enumerate() {
            for b in &OVERRIDES[i + 1..] {
                assert_ne!(
                    override_key(a.latitude, a.longitude),
                    override_key(b.latitude, b.longitude)
                );
            }
        }
    }

    #[test]
    fn overrides_scale_from_their_space() {
        let ny = find_override(40.7128, -74.0060).unwrap();
        let p = ny.scaled_to(2000.0, 857.0);
        assert!((p.x - 608.2).abs() < 1e-9);
        assert!((p.y - 139.8 / 500.0 * 857.0).abs() < 1e-9);
    }

    #[test]
    fn first_matching_region_wins() {
        assert_eq!(find_region(34.69, 135.50).unwrap().name, "Japan");
        assert_eq!(find_region(53.35, -6.26).unwrap().name, "British Isles");
        assert!(find_region(0.0, 0.0).is_none());
        assert!(find_region(-89.0, 0.0).is_none());
    }
}
