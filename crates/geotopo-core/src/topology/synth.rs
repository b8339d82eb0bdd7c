// crates/geotopo-core/src/topology/synth.rs

//! # Topology Synthesizer
//!
//! Turns a device inventory into a [`Topology`]: one node per device with
//! equipment metadata, a connected edge set, simulated per-device links and
//! the derived metrics.
//!
//! All randomness comes from the injected RNG, so a seeded synthesizer
//! replays the same graph for the same input.

use super::metrics::{self, DEFAULT_ZOOM_LEVEL};
use super::model::{
    Device, Edge, EdgeStatus, EdgeType, Link, LinkStatus, LinkType, Node, NodeCapabilities,
    NodeStatus, NodeType, Topology, TopologyType, TOPOLOGY_ID,
};
use crate::geo::{GeoCoordinate, GeoRegion};
use crate::resolver::LocationResolver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const TOPOLOGY_NAME: &str = "Generated Network Topology";

pub const BANDWIDTHS: &[&str] = &["1Gbps", "10Gbps", "25Gbps", "40Gbps", "100Gbps"];

/// Builds topologies from device inventories.
#[derive(Debug)]
pub struct Synthesizer<R: Rng = StdRng> {
    rng: R,
    resolver: Option<LocationResolver>,
    topology_id: String,
    zoom_level: u32,
}

impl Synthesizer<StdRng> {
    /// Reproducible synthesizer for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            resolver: None,
            topology_id: TOPOLOGY_ID.to_string(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
        }
    }

    /// Attach a resolver so device coordinates are refreshed from their
    /// location text before synthesis.
    pub fn with_resolver(mut self, resolver: LocationResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_topology_id(mut self, id: impl Into<String>) -> Self {
        self.topology_id = id.into();
        self
    }

    pub fn with_zoom_level(mut self, zoom_level: u32) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    /// Synthesize a topology. Absent or empty input yields `None`.
    pub fn generate(&mut self, devices: Option<&mut [Device]>) -> Option<Topology> {
        self.generate_devices(devices?)
    }

    /// Synthesize a topology from a device slice.
    ///
    /// Devices without equipment metadata are skipped. Device coordinates
    /// and link lists are rewritten in place.
    pub fn generate_devices(&mut self, devices: &mut [Device]) -> Option<Topology> {
        if devices.is_empty() {
            tracing::debug!("No devices to synthesize");
            return None;
        }

        if let Some(resolver) = &self.resolver {
            let mut updated = 0usize;
            for device in devices.iter_mut() {
                if resolver.refresh_device(device) {
                    updated += 1;
                }
            }
            tracing::debug!(updated, total = devices.len(), "Refreshed device coordinates");
        }

        let surviving: Vec<usize> = devices
            .iter()
            .enumerate()
            .filter(|(_, d)| d.equipment.is_some())
            .map(|(i, _)| i)
            .collect();
        let skipped = devices.len() - surviving.len();
        if skipped > 0 {
            tracing::debug!(skipped, "Skipping devices without equipment metadata");
        }

        let (topology, links) = {
            let refs: Vec<&Device> = surviving.iter().map(|&i| &devices[i]).collect();
            let nodes: Vec<Node> = refs.iter().filter_map(|d| node_for(d)).collect();
            let edges = self.connect(&refs);
            let links: Vec<Vec<Link>> = refs
                .iter()
                .enumerate()
                .map(|(pos, _)| self.links_for(&refs, pos))
                .collect();

            let topology = Topology {
                topology_id: self.topology_id.clone(),
                name: TOPOLOGY_NAME.to_string(),
                topology_type: TopologyType::Physical,
                statistics: metrics::statistics(&refs),
                health_status: metrics::health(&refs),
                geographic_bounds: metrics::bounds(&refs, self.zoom_level),
                last_updated: metrics::timestamp(),
                nodes,
                edges,
            };
            (topology, links)
        };

        for (&idx, device_links) in surviving.iter().zip(links) {
            devices[idx].links = device_links;
        }

        tracing::info!(
            nodes = topology.nodes.len(),
            edges = topology.edges.len(),
            health = topology.health_status.health_score,
            "Synthesized topology"
        );
        Some(topology)
    }

    /// Two-pass edge generation.
    ///
    /// The first pass guarantees every device appears in at least one edge.
    /// The second makes `n / 3` random attempts at extra edges, skipping
    /// self-loops and pairs that already exist in either direction.
    fn connect(&mut self, devices: &[&Device]) -> Vec<Edge> {
        let mut edges = Vec::new();
        let n = devices.len();
        if n < 2 {
            return edges;
        }

        let mut connected: HashSet<&str> = HashSet::with_capacity(n);
        for (i, device) in devices.iter().enumerate() {
            if connected.contains(device.id.as_str()) {
                continue;
            }
            let target = devices
                .iter()
                .enumerate()
                .find(|(j, t)| *j != i && t.id != device.id)
                .map(|(_, t)| t);
            if let Some(target) = target {
                edges.push(self.edge(&device.id, &target.id));
                connected.insert(device.id.as_str());
                connected.insert(target.id.as_str());
            }
        }

        for _ in 0..n / 3 {
            let src = &devices[self.rng.gen_range(0..n)].id;
            let dst = &devices[self.rng.gen_range(0..n)].id;
            if src == dst || edges.iter().any(|e| e.connects(src, dst)) {
                continue;
            }
            edges.push(self.edge(src, dst));
        }

        edges
    }

    fn edge(&mut self, source: &str, target: &str) -> Edge {
        Edge {
            edge_id: format!("edge-{source}-{target}"),
            source_node: source.to_string(),
            target_node: target.to_string(),
            edge_type: EdgeType::Physical,
            status: EdgeStatus::Up,
            weight: self.rng.gen::<f64>() * 100.0 + 1.0,
            cost: self.rng.gen_range(1..=100),
            label: format!("Link {source} to {target}"),
        }
    }

    /// One to three links from `devices[pos]` to randomly chosen peers.
    fn links_for(&mut self, devices: &[&Device], pos: usize) -> Vec<Link> {
        let device = devices[pos];
        let peers: Vec<&Device> = devices
            .iter()
            .copied()
            .filter(|d| d.id != device.id)
            .collect();
        if peers.is_empty() {
            return Vec::new();
        }

        let count = self.rng.gen_range(1..=3);
        let from = device.coordinate().unwrap_or_default();
        (0..count)
            .map(|i| {
                let target = peers[self.rng.gen_range(0..peers.len())];
                let to = target.coordinate().unwrap_or_default();
                Link {
                    link_id: format!("link-{}-{}-{}", device.id, target.id, i),
                    name: format!("Link to {}", target.display_name()),
                    from_node: device.id.clone(),
                    to_node: target.id.clone(),
                    link_status: LinkStatus::Active,
                    link_type: LinkType::Ethernet,
                    bandwidth: BANDWIDTHS[self.rng.gen_range(0..BANDWIDTHS.len())].to_string(),
                    utilization_percent: self.rng.gen::<f64>() * 80.0,
                    latency_ms: self.rng.gen::<f64>() * 50.0 + 1.0,
                    distance_km: link_distance(&mut self.rng, &from, &to),
                    uptime: format!(
                        "{}d {}h",
                        self.rng.gen_range(0..365),
                        self.rng.gen_range(0..24)
                    ),
                    error_rate: self.rng.gen::<f64>() * 0.1,
                    availability_percent: 95.0 + self.rng.gen::<f64>() * 5.0,
                }
            })
            .collect()
    }
}

fn node_for(device: &Device) -> Option<Node> {
    let equipment = device.equipment.as_ref()?;
    let coordinates = equipment.coordinate();
    Some(Node {
        node_id: device.id.clone(),
        name: equipment.sys_name.clone(),
        node_type: NodeType::from(equipment.device_type),
        status: NodeStatus::from(equipment.device_status),
        location: equipment.location.clone(),
        coordinates,
        region: if coordinates.is_zero() {
            GeoRegion::Unknown
        } else {
            coordinates.region()
        },
        capabilities: NodeCapabilities::from(equipment.device_type),
    })
}

/// Distance for a simulated link.
///
/// Unlocated endpoints get a placeholder in `100..1100` km, and estimates
/// under 1 km are raised to a random `1..=50` km.
pub fn link_distance<R: Rng>(rng: &mut R, from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    if from.is_zero() || to.is_zero() {
        return f64::from(rng.gen_range(100..1100u32));
    }
    let distance = from.rough_distance_km(to);
    if distance < 1.0 {
        return f64::from(rng.gen_range(1..=50u32));
    }
    distance
}
