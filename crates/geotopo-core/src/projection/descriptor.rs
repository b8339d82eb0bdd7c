// crates/geotopo-core/src/projection/descriptor.rs

//! Reads the reference map size from an SVG asset.

use super::MapSurface;
use crate::error::{GeoTopoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static SVG_ROOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<svg\b[^>]*>").expect("valid svg root pattern"));
static WIDTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\swidth\s*=\s*"([0-9.]+)(?:px)?""#).expect("valid width pattern")
});
static HEIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sheight\s*=\s*"([0-9.]+)(?:px)?""#).expect("valid height pattern")
});
static VIEW_BOX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sviewbox\s*=\s*"([0-9.,\s-]+)""#).expect("valid viewBox pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Size attributes of the reference map's root `<svg>` element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapDescriptor {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub view_box: Option<ViewBox>,
}

impl MapDescriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeoTopoError::NotFound(format!("Map asset not found at {}: {}", path.display(), e))
        })?;
        let descriptor = Self::parse(&content);
        tracing::info!(
            path = %path.display(),
            width = descriptor.surface().width,
            height = descriptor.surface().height,
            "Loaded map descriptor"
        );
        Ok(descriptor)
    }

    /// Extract sizes from SVG text. Missing or unparsable values stay `None`.
    pub fn parse(svg: &str) -> Self {
        let Some(root) = SVG_ROOT.find(svg) else {
            return Self::default();
        };
        let root = root.as_str();

        let view_box = VIEW_BOX.captures(root).and_then(|c| {
            let parts: Vec<f64> = c[1]
                .split(|ch: char| ch.is_whitespace() || ch == ',')
                .filter(|p| !p.is_empty())
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .ok()?;
            match parts[..] {
                [x, y, width, height] => Some(ViewBox {
                    x,
                    y,
                    width,
                    height,
                }),
                _ => None,
            }
        });

        Self {
            width: positive(&WIDTH, root),
            height: positive(&HEIGHT, root),
            view_box,
        }
    }

    /// Reference surface in view-box units, falling back to the declared
    /// size and then to the default surface.
    pub fn surface(&self) -> MapSurface {
        let default = MapSurface::default();
        let vb = self.view_box.filter(|vb| vb.width > 0.0 && vb.height > 0.0);
        MapSurface {
            width: vb
                .map(|vb| vb.width)
                .or(self.width)
                .unwrap_or(default.width),
            height: vb
                .map(|vb| vb.height)
                .or(self.height)
                .unwrap_or(default.height),
        }
    }
}

fn positive(re: &Regex, root: &str) -> Option<f64> {
    re.captures(root)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}
