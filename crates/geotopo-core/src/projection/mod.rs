// crates/geotopo-core/src/projection/mod.rs

//! # Projection Engine
//!
//! Converts geographic coordinates to pixels on a consumer viewport.
//!
//! The pipeline works in the pixel space of a reference map asset
//! ([`MapSurface`], 2000×857 by default):
//!
//! 1. longitude maps linearly across the surface width;
//! 2. latitude, clamped to ±85°, goes through the Web Mercator curve;
//! 3. well-known points in [`tables::OVERRIDES`] replace the computed value;
//! 4. otherwise the first matching [`tables::REGION_NUDGES`] entry shifts it;
//! 5. the result is rescaled into the [`Viewport`] (1000×500 by default).
//!
//! Every step clamps, so the output is always inside the viewport.

mod descriptor;
pub mod tables;

pub use descriptor::{MapDescriptor, ViewBox};

use crate::geo::{GeoCoordinate, MapCoordinate};
use crate::resolver::LocationResolver;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Latitude limit of the Mercator curve, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0;

/// Pixel size of the reference map asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSurface {
    pub width: f64,
    pub height: f64,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new(2000.0, 857.0)
    }
}

impl MapSurface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Surface described by the SVG at `path`, or the default surface when
    /// the file can't be read.
    pub fn from_descriptor_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match MapDescriptor::load(path) {
            Ok(d) => d.surface(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Using default map surface: {}", e);
                Self::default()
            }
        }
    }

    fn clamp(&self, p: MapCoordinate) -> MapCoordinate {
        MapCoordinate::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

/// Pixel size of the consuming visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 500.0)
    }
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projector {
    surface: MapSurface,
    viewport: Viewport,
}

impl Projector {
    /// Non-positive or non-finite dimensions fall back to the defaults.
    pub fn new(surface: MapSurface, viewport: Viewport) -> Self {
        let valid = |w: f64, h: f64| w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0;
        Self {
            surface: if valid(surface.width, surface.height) {
                surface
            } else {
                MapSurface::default()
            },
            viewport: if valid(viewport.width, viewport.height) {
                viewport
            } else {
                Viewport::default()
            },
        }
    }

    pub fn surface(&self) -> MapSurface {
        self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Viewport pixel position for a coordinate.
    ///
    /// Non-finite input is treated as `(0, 0)`. Output is rounded to two
    /// decimals.
    pub fn convert(&self, latitude: f64, longitude: f64) -> MapCoordinate {
        let (latitude, longitude) = if latitude.is_finite() && longitude.is_finite() {
            (latitude, longitude)
        } else {
            (0.0, 0.0)
        };

        let reference = match tables::find_override(latitude, longitude) {
            Some(o) => self
                .surface
                .clamp(o.scaled_to(self.surface.width, self.surface.height)),
            None => self.nudge(
                latitude,
                longitude,
                self.project_base(latitude, longitude),
            ),
        };

        let vx = reference.x / self.surface.width * self.viewport.width;
        let vy = reference.y / self.surface.height * self.viewport.height;
        MapCoordinate::new(
            round2(vx).clamp(0.0, self.viewport.width),
            round2(vy).clamp(0.0, self.viewport.height),
        )
    }

    /// Linear longitude and Web Mercator latitude in reference-map pixels,
    /// without overrides or nudges.
    pub fn project_base(&self, latitude: f64, longitude: f64) -> MapCoordinate {
        let lon = longitude.clamp(-180.0, 180.0);
        let lat = latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();

        let x = (lon + 180.0) / 360.0 * self.surface.width;
        let mercator = (PI / 4.0 + lat / 2.0).tan().ln();
        let y = (1.0 - (mercator + PI) / (2.0 * PI)) * self.surface.height;
        self.surface.clamp(MapCoordinate::new(x, y))
    }

    /// Apply the region nudge for `(latitude, longitude)` to a
    /// reference-map point.
    pub fn nudge(&self, latitude: f64, longitude: f64, point: MapCoordinate) -> MapCoordinate {
        let shifted = match tables::find_region(latitude, longitude) {
            Some(r) => MapCoordinate::new(point.x + r.dx, point.y + r.dy),
            None => point,
        };
        self.surface.clamp(shifted)
    }

    /// Resolve location text and project it.
    pub fn project_location(
        &self,
        resolver: &LocationResolver,
        text: &str,
    ) -> Option<(GeoCoordinate, MapCoordinate)> {
        let coord = resolver.resolve(text)?;
        Some((coord, self.convert(coord.latitude, coord.longitude)))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
