// crates/geotopo-core/src/topology/mod.rs

//! Device inventory and synthesized topology types, plus the synthesizer.

pub mod metrics;
mod model;
mod synth;

pub use model::*;
pub use synth::{link_distance, Synthesizer, BANDWIDTHS, TOPOLOGY_NAME};
