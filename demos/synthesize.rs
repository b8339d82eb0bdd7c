//! Topology synthesis example for geotopo-rs
//!
//! Runs the full service flow against an in-memory inventory and cache:
//! fetch → resolve locations → synthesize → store → read back.

use geotopo_rs::prelude::*;

fn inventory() -> Vec<Device> {
    let rows = [
        ("r-nyc", DeviceType::Router, DeviceStatus::Online, "New York, NY, USA"),
        ("r-lon", DeviceType::Router, DeviceStatus::Online, "London, UK"),
        ("fw-fra", DeviceType::Firewall, DeviceStatus::Online, "Frankfurt-DC-02"),
        ("sw-tyo", DeviceType::Switch, DeviceStatus::Warning, "Tokyo"),
        ("lb-syd", DeviceType::LoadBalancer, DeviceStatus::Online, "Sydney, Australia"),
        ("srv-gru", DeviceType::Server, DeviceStatus::Offline, "São Paulo, Brazil"),
    ];
    rows.into_iter()
        .map(|(id, kind, status, location)| {
            Device::new(id).with_equipment(Equipment::new(id, kind, status, location))
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = TopologyConfig {
        seed: Some(42),
        ..TopologyConfig::from_env()
    };
    let gz = gazetteer::shared(&config.gazetteer_path);
    let service = TopologyService::new(
        StaticInventory::new(inventory()),
        MemoryTopologyStore::new(),
        config.synthesizer(gz),
    );

    let Some(topo) = service.ensure()? else {
        println!("Inventory was empty");
        return Ok(());
    };

    println!("{} ({:?})", topo.name, topo.topology_type);
    println!(
        "nodes={} edges={} density={:.2}",
        topo.nodes.len(),
        topo.edges.len(),
        topo.statistics.network_density
    );
    println!(
        "health: {:?} {:.1}",
        topo.health_status.status, topo.health_status.health_score
    );

    let projector = config.projector();
    for node in &topo.nodes {
        let px = projector.convert(node.coordinates.latitude, node.coordinates.longitude);
        println!(
            "  {:<8} {:<14} {:>8.2},{:>7.2}  {}",
            node.node_id,
            node.region.label(),
            px.x,
            px.y,
            topo.edges_of(&node.node_id).count()
        );
    }

    let cached = service.read().expect("topology was just stored");
    println!("{}", serde_json::to_string_pretty(&cached.geographic_bounds)?);
    Ok(())
}
