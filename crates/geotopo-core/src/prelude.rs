// crates/geotopo-core/src/prelude.rs
pub use crate::config::TopologyConfig;
pub use crate::error::{GeoTopoError, Result};
pub use crate::gazetteer::{self, CityRecord, Gazetteer};
pub use crate::geo::{GeoCoordinate, MapCoordinate};
pub use crate::projection::{MapSurface, Projector, Viewport};
pub use crate::resolver::LocationResolver;
pub use crate::service::{
    InventorySource, JsonFileInventory, MemoryTopologyStore, StaticInventory, TopologyService,
    TopologyStore,
};
pub use crate::topology::{Device, DeviceStatus, DeviceType, Equipment, Synthesizer, Topology};
