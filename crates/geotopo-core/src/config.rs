// crates/geotopo-core/src/config.rs
use crate::error::Result;
use crate::gazetteer::Gazetteer;
use crate::projection::{MapSurface, Projector, Viewport};
use crate::resolver::LocationResolver;
use crate::topology::metrics::DEFAULT_ZOOM_LEVEL;
use crate::topology::{Synthesizer, TOPOLOGY_ID};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const ENV_GAZETTEER: &str = "GEOTOPO_GAZETTEER";
pub const ENV_MAP: &str = "GEOTOPO_MAP";
pub const ENV_SEED: &str = "GEOTOPO_SEED";

/// Runtime settings for loading reference data and synthesizing topologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// City table (`.csv` or `.csv.gz`).
    pub gazetteer_path: PathBuf,
    /// Optional SVG asset used to calibrate the reference surface.
    pub map_path: Option<PathBuf>,
    /// Reference surface used when no map asset is configured.
    pub reference: MapSurface,
    pub viewport: Viewport,
    pub zoom_level: u32,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub topology_id: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            gazetteer_path: Gazetteer::default_data_dir().join(Gazetteer::default_dataset_filename()),
            map_path: None,
            reference: MapSurface::default(),
            viewport: Viewport::default(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            seed: None,
            topology_id: TOPOLOGY_ID.to_string(),
        }
    }
}

impl TopologyConfig {
    /// Defaults with environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `GEOTOPO_*` environment variables on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup, using the `GEOTOPO_*` names.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_GAZETTEER).filter(|v| !v.trim().is_empty()) {
            self.gazetteer_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_MAP).filter(|v| !v.trim().is_empty()) {
            self.map_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_SEED),
            }
        }
        self
    }

    /// Projector for the configured map asset and viewport.
    pub fn projector(&self) -> Projector {
        let surface = match &self.map_path {
            Some(path) => MapSurface::from_descriptor_or_default(path),
            None => self.reference,
        };
        Projector::new(surface, self.viewport)
    }

    /// Synthesizer with the configured seed, id and zoom, resolving
    /// locations against `gazetteer`.
    pub fn synthesizer(&self, gazetteer: Arc<Gazetteer>) -> Synthesizer<StdRng> {
        let synth = match self.seed {
            Some(seed) => Synthesizer::seeded(seed),
            None => Synthesizer::from_entropy(),
        };
        synth
            .with_resolver(LocationResolver::new(gazetteer))
            .with_topology_id(self.topology_id.clone())
            .with_zoom_level(self.zoom_level)
    }
}
