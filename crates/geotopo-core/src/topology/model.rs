// crates/geotopo-core/src/topology/model.rs
use crate::geo::{GeoCoordinate, GeoRegion};
use serde::{Deserialize, Serialize};

/// Well-known key of the single materialized topology.
pub const TOPOLOGY_ID: &str = "topo";

/// Equipment category as reported by inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Router,
    Switch,
    Firewall,
    Server,
    LoadBalancer,
    Gateway,
    AccessPoint,
    Storage,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Operational state as reported by inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
    Warning,
    Critical,
    Maintenance,
    Partial,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Equipment metadata of a managed device.
///
/// `latitude`/`longitude` are write targets of the location resolver;
/// `(0, 0)` means "unknown".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    pub sys_name: String,
    pub device_type: DeviceType,
    pub device_status: DeviceStatus,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Equipment {
    pub fn new(
        sys_name: impl Into<String>,
        device_type: DeviceType,
        device_status: DeviceStatus,
        location: impl Into<String>,
    ) -> Self {
        Self {
            sys_name: sys_name.into(),
            device_type,
            device_status,
            location: location.into(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    #[inline]
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// A managed device from the inventory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default, alias = "equipmentinfo")]
    pub equipment: Option<Equipment>,
    #[serde(default, alias = "networkLinks")]
    pub links: Vec<Link>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            equipment: None,
            links: Vec::new(),
        }
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.equipment
            .as_ref()
            .map(|e| e.sys_name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        self.equipment.as_ref().map(Equipment::coordinate)
    }

    pub fn is_online(&self) -> bool {
        self.equipment
            .as_ref()
            .is_some_and(|e| e.device_status == DeviceStatus::Online)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Router,
    Switch,
    Firewall,
    Server,
    LoadBalancer,
    Gateway,
    Unknown,
}

impl From<DeviceType> for NodeType {
    fn from(t: DeviceType) -> Self {
        match t {
            DeviceType::Router => NodeType::Router,
            DeviceType::Switch => NodeType::Switch,
            DeviceType::Firewall => NodeType::Firewall,
            DeviceType::Server => NodeType::Server,
            DeviceType::LoadBalancer => NodeType::LoadBalancer,
            DeviceType::Gateway => NodeType::Gateway,
            _ => NodeType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Online,
    Offline,
    Warning,
    Critical,
    Maintenance,
    Unknown,
}

impl From<DeviceStatus> for NodeStatus {
    fn from(s: DeviceStatus) -> Self {
        match s {
            DeviceStatus::Online => NodeStatus::Online,
            DeviceStatus::Offline => NodeStatus::Offline,
            DeviceStatus::Warning => NodeStatus::Warning,
            DeviceStatus::Critical => NodeStatus::Critical,
            DeviceStatus::Maintenance => NodeStatus::Maintenance,
            _ => NodeStatus::Unknown,
        }
    }
}

/// What a node can do, derived from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCapabilities {
    pub routing_capable: bool,
    pub switching_capable: bool,
    pub firewall_capable: bool,
    pub load_balancing_capable: bool,
}

impl From<DeviceType> for NodeCapabilities {
    fn from(t: DeviceType) -> Self {
        Self {
            routing_capable: t == DeviceType::Router,
            switching_capable: t == DeviceType::Switch,
            firewall_capable: t == DeviceType::Firewall,
            load_balancing_capable: t == DeviceType::LoadBalancer,
        }
    }
}

/// Graph vertex for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: String,
    pub name: String,
    pub node_type: NodeType,
    pub status: NodeStatus,
    pub location: String,
    pub coordinates: GeoCoordinate,
    pub region: GeoRegion,
    pub capabilities: NodeCapabilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Physical,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    Up,
    Down,
}

/// Undirected connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub edge_id: String,
    pub source_node: String,
    pub target_node: String,
    pub edge_type: EdgeType,
    pub status: EdgeStatus,
    pub weight: f64,
    pub cost: u32,
    pub label: String,
}

impl Edge {
    /// `true` if this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source_node == a && self.target_node == b)
            || (self.source_node == b && self.target_node == a)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source_node == id || self.target_node == id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Ethernet,
    Fiber,
}

/// Per-device descriptive connection with simulated telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: String,
    pub name: String,
    pub from_node: String,
    pub to_node: String,
    pub link_status: LinkStatus,
    pub link_type: LinkType,
    pub bandwidth: String,
    pub utilization_percent: f64,
    pub latency_ms: f64,
    pub distance_km: f64,
    pub uptime: String,
    pub error_rate: f64,
    pub availability_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_nodes: u32,
    pub active_nodes: u32,
    pub total_edges: u32,
    pub active_edges: u32,
    pub network_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Healthy,
    Warning,
    Critical,
}

impl HealthLevel {
    /// ≥90 healthy, ≥70 warning, anything else critical.
    pub fn classify(score: f64) -> Self {
        if score >= 90.0 {
            HealthLevel::Healthy
        } else if score >= 70.0 {
            HealthLevel::Warning
        } else {
            HealthLevel::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthLevel,
    pub health_score: f64,
    pub assessment_time: String,
}

/// Map framing for the devices with known coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicBounds {
    pub north_east: GeoCoordinate,
    pub south_west: GeoCoordinate,
    pub center: GeoCoordinate,
    pub zoom_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyType {
    #[default]
    Physical,
    Logical,
}

/// The synthesized network graph and its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub topology_id: String,
    pub name: String,
    pub topology_type: TopologyType,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub statistics: Statistics,
    pub health_status: HealthStatus,
    pub geographic_bounds: GeographicBounds,
    pub last_updated: String,
}

impl Topology {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.node_id == id)
    }

    /// Edges incident to `id`.
    pub fn edges_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_and_status_mapping() {
        assert_eq!(NodeType::from(DeviceType::LoadBalancer), NodeType::LoadBalancer);
        assert_eq!(NodeType::from(DeviceType::Storage), NodeType::Unknown);
        assert_eq!(NodeStatus::from(DeviceStatus::Maintenance), NodeStatus::Maintenance);
        assert_eq!(NodeStatus::from(DeviceStatus::Partial), NodeStatus::Unknown);
        let caps = NodeCapabilities::from(DeviceType::Firewall);
        assert!(caps.firewall_capable && !caps.routing_capable);
    }

    #[test]
    fn health_boundaries() {
        assert_eq!(HealthLevel::classify(90.0), HealthLevel::Healthy);
        assert_eq!(HealthLevel::classify(89.99), HealthLevel::Warning);
        assert_eq!(HealthLevel::classify(70.0), HealthLevel::Warning);
        assert_eq!(HealthLevel::classify(69.9), HealthLevel::Critical);
    }

    #[test]
    fn device_json_accepts_unknown_enums_and_missing_fields() {
        let json = r#"[
            {"id": "r1", "equipment": {"sysName": "core", "deviceType": "router",
              "deviceStatus": "online", "location": "Paris, France"}},
            {"id": "x1", "equipment": {"deviceType": "toaster"}},
            {"id": "bare"}
        ]"#;
        let devices: Vec<Device> = serde_json::from_str(json).unwrap();
        assert_eq!(devices[0].display_name(), "core");
        assert!(devices[0].is_online());
        let x1 = devices[1].equipment.as_ref().unwrap();
        assert_eq!(x1.device_type, DeviceType::Unknown);
        assert_eq!(x1.device_status, DeviceStatus::Unknown);
        assert_eq!(devices[1].display_name(), "x1");
        assert!(devices[2].equipment.is_none());
    }

    #[test]
    fn edge_direction_is_ignored() {
        let e = Edge {
            edge_id: "edge-a-b".into(),
            source_node: "a".into(),
            target_node: "b".into(),
            edge_type: EdgeType::Physical,
            status: EdgeStatus::Up,
            weight: 1.0,
            cost: 1,
            label: "Link a to b".into(),
        };
        assert!(e.connects("b", "a"));
        assert!(e.touches("a") && !e.touches("c"));
    }
}
