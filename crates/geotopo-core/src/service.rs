// crates/geotopo-core/src/service.rs

//! # Topology Service
//!
//! Orchestrates inventory fetch → synthesis → cache. The inventory and the
//! cache are external systems behind [`InventorySource`] and
//! [`TopologyStore`]; in-process implementations are provided for tests and
//! the CLI.

use crate::error::{GeoTopoError, Result};
use crate::topology::{Device, Synthesizer, Topology, TOPOLOGY_ID};
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError, RwLock};

/// Default cap on devices requested from inventory.
pub const DEFAULT_INVENTORY_LIMIT: usize = 3000;

/// Request sent to the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub service_name: String,
    pub service_area: u8,
    pub filter: String,
    pub limit: usize,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            service_name: "Inventory".to_string(),
            service_area: 0,
            filter: "Id=*".to_string(),
            limit: DEFAULT_INVENTORY_LIMIT,
        }
    }
}

impl InventoryQuery {
    /// Default query without a device cap, for local files.
    pub fn unlimited() -> Self {
        Self {
            limit: usize::MAX,
            ..Self::default()
        }
    }
}

/// Upstream device inventory.
pub trait InventorySource {
    fn fetch_devices(&self, query: &InventoryQuery) -> Result<Vec<Device>>;
}

/// Fixed in-memory inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    devices: Vec<Device>,
}

impl StaticInventory {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

impl InventorySource for StaticInventory {
    fn fetch_devices(&self, query: &InventoryQuery) -> Result<Vec<Device>> {
        Ok(self.devices.iter().take(query.limit).cloned().collect())
    }
}

/// Inventory read from a JSON array of devices on disk.
#[derive(Debug, Clone)]
pub struct JsonFileInventory {
    path: PathBuf,
}

impl JsonFileInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventorySource for JsonFileInventory {
    fn fetch_devices(&self, query: &InventoryQuery) -> Result<Vec<Device>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            GeoTopoError::Upstream(format!("{}: {}", self.path.display(), e))
        })?;
        let mut devices: Vec<Device> = serde_json::from_str(&content)?;
        devices.truncate(query.limit);
        Ok(devices)
    }
}

/// Downstream topology cache keyed by topology id.
pub trait TopologyStore {
    fn get(&self, id: &str) -> Option<Topology>;
    fn put(&self, topology: Topology) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTopologyStore {
    slots: RwLock<HashMap<String, Topology>>,
}

impl MemoryTopologyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopologyStore for MemoryTopologyStore {
    fn get(&self, id: &str) -> Option<Topology> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn put(&self, topology: Topology) -> Result<()> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(topology.topology_id.clone(), topology);
        Ok(())
    }
}

/// Keeps the single well-known topology slot up to date.
///
/// Regeneration is serialized by a mutex around the synthesizer, so two
/// concurrent [`TopologyService::ensure`] calls fetch and synthesize once.
pub struct TopologyService<I, S, R: Rng> {
    inventory: I,
    store: S,
    query: InventoryQuery,
    key: String,
    synthesizer: Mutex<Synthesizer<R>>,
}

impl<I, S, R> TopologyService<I, S, R>
where
    I: InventorySource,
    S: TopologyStore,
    R: Rng,
{
    pub fn new(inventory: I, store: S, synthesizer: Synthesizer<R>) -> Self {
        Self {
            inventory,
            store,
            query: InventoryQuery::default(),
            key: TOPOLOGY_ID.to_string(),
            synthesizer: Mutex::new(synthesizer),
        }
    }

    pub fn with_query(mut self, query: InventoryQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached topology, if one has been generated.
    pub fn read(&self) -> Option<Topology> {
        let topology = self.store.get(&self.key);
        if topology.is_none() {
            tracing::warn!(key = %self.key, "No topology in cache");
        }
        topology
    }

    /// Store an externally built topology under the service key.
    pub fn submit(&self, mut topology: Topology) -> Result<()> {
        topology.topology_id = self.key.clone();
        self.store.put(topology)
    }

    /// Fetch, synthesize and store, replacing any cached topology.
    ///
    /// Returns `Ok(None)` when the inventory has no devices; the cache is
    /// left untouched in that case.
    pub fn regenerate(&self) -> Result<Option<Topology>> {
        let mut synth = self.synthesizer.lock().unwrap_or_else(PoisonError::into_inner);
        self.regenerate_with(&mut synth)
    }

    /// Generate only when the slot is empty; otherwise return the cached
    /// topology.
    pub fn ensure(&self) -> Result<Option<Topology>> {
        let mut synth = self.synthesizer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.store.get(&self.key) {
            return Ok(Some(existing));
        }
        self.regenerate_with(&mut synth)
    }

    fn regenerate_with(&self, synth: &mut Synthesizer<R>) -> Result<Option<Topology>> {
        tracing::info!(
            service = %self.query.service_name,
            area = self.query.service_area,
            limit = self.query.limit,
            "Requesting device data"
        );
        let mut devices = self.inventory.fetch_devices(&self.query)?;

        let Some(mut topology) = synth.generate(Some(&mut devices)) else {
            tracing::warn!("Inventory returned no devices, keeping cached topology");
            return Ok(None);
        };
        topology.topology_id = self.key.clone();
        self.store.put(topology.clone())?;
        Ok(Some(topology))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{DeviceStatus, DeviceType, Equipment};
    use rand::rngs::StdRng;
    use std::cell::Cell;

    struct CountingInventory {
        devices: Vec<Device>,
        calls: Cell<usize>,
    }

    impl InventorySource for CountingInventory {
        fn fetch_devices(&self, _query: &InventoryQuery) -> Result<Vec<Device>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.devices.clone())
        }
    }

    struct FailingInventory;

    impl InventorySource for FailingInventory {
        fn fetch_devices(&self, _query: &InventoryQuery) -> Result<Vec<Device>> {
            Err(GeoTopoError::Upstream("inventory timed out".into()))
        }
    }

    fn devices(n: usize) -> Vec<Device> {
        (0..n)
            .map(|i| {
                Device::new(format!("d{i}")).with_equipment(Equipment::new(
                    format!("sw{i}"),
                    DeviceType::Switch,
                    DeviceStatus::Online,
                    "",
                ))
            })
            .collect()
    }

    fn service(n: usize) -> TopologyService<CountingInventory, MemoryTopologyStore, StdRng> {
        let inventory = CountingInventory {
            devices: devices(n),
            calls: Cell::new(0),
        };
        TopologyService::new(inventory, MemoryTopologyStore::new(), Synthesizer::seeded(1))
    }

    #[test]
    fn read_is_empty_before_generation() {
        assert!(service(3).read().is_none());
    }

    #[test]
    fn ensure_generates_once() {
        let svc = service(4);
        let first = svc.ensure().unwrap().unwrap();
        assert_eq!(first.topology_id, "topo");
        let second = svc.ensure().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.inventory.calls.get(), 1);
        assert_eq!(svc.read(), Some(first));
    }

    #[test]
    fn submitted_topology_is_read_back() {
        let svc = service(3).with_key("lab");
        let mut built = Synthesizer::seeded(9)
            .generate(Some(&mut devices(2)))
            .unwrap();
        built.name = "Hand built".into();
        svc.submit(built).unwrap();

        let cached = svc.read().unwrap();
        assert_eq!(cached.topology_id, "lab");
        assert_eq!(cached.name, "Hand built");
        assert_eq!(cached.nodes.len(), 2);
        assert_eq!(svc.ensure().unwrap(), Some(cached));
        assert_eq!(svc.inventory.calls.get(), 0);
    }

    #[test]
    fn regenerate_always_fetches() {
        let svc = service(4);
        svc.ensure().unwrap();
        svc.regenerate().unwrap();
        assert_eq!(svc.inventory.calls.get(), 2);
    }

    #[test]
    fn empty_inventory_keeps_cache_untouched() {
        let svc = service(0);
        assert!(svc.regenerate().unwrap().is_none());
        assert!(svc.read().is_none());
    }

    #[test]
    fn upstream_errors_surface() {
        let svc = TopologyService::new(
            FailingInventory,
            MemoryTopologyStore::new(),
            Synthesizer::seeded(1),
        );
        assert!(matches!(svc.ensure(), Err(GeoTopoError::Upstream(_))));
        assert!(svc.read().is_none());
    }

    #[test]
    fn custom_key_and_query_limit() {
        let svc = TopologyService::new(
            StaticInventory::new(devices(10)),
            MemoryTopologyStore::new(),
            Synthesizer::seeded(2),
        )
        .with_key("lab")
        .with_query(InventoryQuery {
            limit: 5,
            ..InventoryQuery::default()
        });
        let topo = svc.regenerate().unwrap().unwrap();
        assert_eq!(topo.topology_id, "lab");
        assert_eq!(topo.nodes.len(), 5);
        assert!(svc.store().get("topo").is_none());
    }

    #[test]
    fn unlimited_query_returns_every_device() {
        let inventory = StaticInventory::new(devices(DEFAULT_INVENTORY_LIMIT + 1));
        let capped = inventory.fetch_devices(&InventoryQuery::default()).unwrap();
        assert_eq!(capped.len(), DEFAULT_INVENTORY_LIMIT);
        let all = inventory.fetch_devices(&InventoryQuery::unlimited()).unwrap();
        assert_eq!(all.len(), DEFAULT_INVENTORY_LIMIT + 1);
    }

    #[test]
    fn json_file_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devices.json");
        fs::write(&path, serde_json::to_string(&devices(3)).unwrap()).unwrap();
        let got = JsonFileInventory::new(&path)
            .fetch_devices(&InventoryQuery::default())
            .unwrap();
        assert_eq!(got.len(), 3);

        let missing = JsonFileInventory::new(dir.path().join("nope.json"))
            .fetch_devices(&InventoryQuery::default());
        assert!(matches!(missing, Err(GeoTopoError::Upstream(_))));
    }
}
