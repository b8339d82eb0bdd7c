// crates/geotopo-core/src/lib.rs

//! Geographic enrichment and topology synthesis for network inventories.
//!
//! - [`gazetteer`]: world-cities reference table with ranked name lookups
//! - [`resolver`]: free-text location → coordinates
//! - [`projection`]: coordinates → viewport pixels
//! - [`topology`]: device inventory → graph with metrics
//! - [`service`]: inventory fetch, synthesis and caching

pub mod config;
pub mod error;
pub mod gazetteer;
pub mod geo;
pub mod prelude;
pub mod projection;
pub mod resolver;
pub mod service;
pub mod text;
pub mod topology;

pub use crate::config::TopologyConfig;
pub use crate::error::{GeoTopoError, Result};
pub use crate::gazetteer::{CapitalKind, CityRecord, Gazetteer, GazetteerStats};
pub use crate::geo::{GeoCoordinate, GeoRegion, MapCoordinate};
pub use crate::projection::{MapDescriptor, MapSurface, Projector, Viewport};
pub use crate::resolver::{parse_location, LocationResolver, ParsedLocation};
pub use crate::service::{
    InventoryQuery, InventorySource, MemoryTopologyStore, TopologyService, TopologyStore,
};
pub use crate::topology::{Device, Equipment, Synthesizer, Topology};
