// crates/geotopo-core/src/topology/metrics.rs

//! Derived topology metrics: counts, health and map framing.

use super::model::{Device, GeographicBounds, HealthLevel, HealthStatus, Statistics};
use crate::geo::GeoCoordinate;
use chrono::{SecondsFormat, Utc};

/// Zoom level reported with every set of bounds.
pub const DEFAULT_ZOOM_LEVEL: u32 = 8;

/// Estimated edge count for `n` nodes: a spanning chain plus the density
/// pass budget. The synthesized edge list may hold fewer.
pub fn estimated_edges(n: u32) -> u32 {
    n.saturating_sub(1).saturating_add(n / 3)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub fn statistics(devices: &[&Device]) -> Statistics {
    let total = saturating_u32(devices.len());
    let active = saturating_u32(devices.iter().filter(|d| d.is_online()).count());
    let edges = estimated_edges(total);
    let possible = u64::from(total) * u64::from(total.saturating_sub(1)) / 2;
    let density = if possible == 0 {
        0.0
    } else {
        f64::from(edges) / possible as f64
    };

    Statistics {
        total_nodes: total,
        active_nodes: active,
        total_edges: edges,
        active_edges: edges,
        network_density: density,
    }
}

pub fn health(devices: &[&Device]) -> HealthStatus {
    let total = devices.len();
    let online = devices.iter().filter(|d| d.is_online()).count();
    let score = if total == 0 {
        0.0
    } else {
        online as f64 / total as f64 * 100.0
    };

    HealthStatus {
        status: HealthLevel::classify(score),
        health_score: score,
        assessment_time: timestamp(),
    }
}

/// Bounding box over devices with usable coordinates.
///
/// Devices at `(0, 0)` are treated as unlocated. With no usable device all
/// corners and the center are zero.
pub fn bounds(devices: &[&Device], zoom_level: u32) -> GeographicBounds {
    let mut located = devices
        .iter()
        .filter_map(|d| d.coordinate())
        .filter(|c| !c.is_zero());

    let Some(first) = located.next() else {
        return GeographicBounds {
            zoom_level,
            ..GeographicBounds::default()
        };
    };

    let (mut min, mut max) = (first, first);
    for c in located {
        min.latitude = min.latitude.min(c.latitude);
        min.longitude = min.longitude.min(c.longitude);
        max.latitude = max.latitude.max(c.latitude);
        max.longitude = max.longitude.max(c.longitude);
    }

    GeographicBounds {
        north_east: max,
        south_west: min,
        center: GeoCoordinate::new(
            (min.latitude + max.latitude) / 2.0,
            (min.longitude + max.longitude) / 2.0,
        ),
        zoom_level,
    }
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{DeviceStatus, DeviceType, Equipment};

    fn device(id: &str, status: DeviceStatus, lat: f64, lon: f64) -> Device {
        Device::new(id).with_equipment(
            Equipment::new(id, DeviceType::Switch, status, "").with_coordinates(lat, lon),
        )
    }

    #[test]
    fn statistics_use_the_estimate() {
        let devices: Vec<Device> = (0..6)
            .map(|i| device(&format!("d{i}"), DeviceStatus::Online, 0.0, 0.0))
            .collect();
        let refs: Vec<&Device> = devices.iter().collect();
        let stats = statistics(&refs);
        assert_eq!(stats.total_nodes, 6);
        assert_eq!(stats.total_edges, 7);
        assert!((stats.network_density - 7.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn statistics_do_not_underflow() {
        assert_eq!(statistics(&[]), Statistics::default());
        let one = device("solo", DeviceStatus::Offline, 0.0, 0.0);
        let stats = statistics(&[&one]);
        assert_eq!(stats.total_edges, 0);
        assert_eq!(stats.network_density, 0.0);
    }

    #[test]
    fn counts_saturate_at_u32_max() {
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
        assert_eq!(estimated_edges(u32::MAX), u32::MAX);
    }

    #[test]
    fn health_score_and_level() {
        let up = device("a", DeviceStatus::Online, 0.0, 0.0);
        let down = device("b", DeviceStatus::Offline, 0.0, 0.0);
        let h = health(&[&up, &up, &down]);
        assert!((h.health_score - 66.666).abs() < 0.01);
        assert_eq!(h.status, HealthLevel::Critical);
        assert!(chrono::DateTime::parse_from_rfc3339(&h.assessment_time).is_ok());

        assert_eq!(health(&[]).health_score, 0.0);
    }

    #[test]
    fn bounds_skip_unlocated_devices() {
        let a = device("a", DeviceStatus::Online, 40.0, -74.0);
        let b = device("b", DeviceStatus::Online, 0.0, 0.0);
        let c = device("c", DeviceStatus::Online, 52.0, 13.0);
        let bb = bounds(&[&a, &b, &c], DEFAULT_ZOOM_LEVEL);
        assert_eq!(bb.north_east, GeoCoordinate::new(52.0, 13.0));
        assert_eq!(bb.south_west, GeoCoordinate::new(40.0, -74.0));
        assert_eq!(bb.center, GeoCoordinate::new(46.0, -30.5));
        assert_eq!(bb.zoom_level, 8);

        let empty = bounds(&[&b], DEFAULT_ZOOM_LEVEL);
        assert_eq!(empty.center, GeoCoordinate::default());
        assert_eq!(empty.zoom_level, 8);
    }
}
