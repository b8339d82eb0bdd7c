use geotopo_core::prelude::*;
use geotopo_core::topology::HealthLevel;
use std::fs;
use std::sync::Arc;

const CITIES: &str = "\
city,city_ascii,lat,lng,country,iso2,iso3,admin_name,capital,population,id
Boston,Boston,52.9789,-0.0266,United Kingdom,GB,GBR,Lincolnshire,,35124,1826000001
Boston,Boston,42.3188,-71.0852,United States,US,USA,Massachusetts,admin,4688346,1840000455
London,London,51.5072,-0.1275,United Kingdom,GB,GBR,\"London, City of\",primary,11262000,1826645935
Tokyo,Tokyo,35.6897,139.6922,Japan,JP,JPN,Tōkyō,primary,37732000,1392685764
Bogotá,Bogota,4.7111,-74.0722,Colombia,CO,COL,Bogotá,primary,9464000,1170483426
";

fn gazetteer() -> Arc<Gazetteer> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worldcities.csv");
    fs::write(&path, CITIES).unwrap();
    Arc::new(Gazetteer::load(&path).unwrap())
}

fn device(id: &str, status: DeviceStatus, location: &str) -> Device {
    Device::new(id).with_equipment(Equipment::new(
        format!("{id}-core"),
        DeviceType::Router,
        status,
        location,
    ))
}

#[test]
fn three_device_scenario() {
    let mut devices = vec![
        device("bos", DeviceStatus::Online, "Boston, MA, USA"),
        device("tyo", DeviceStatus::Online, "Tokyo-DC-01"),
        device("lon", DeviceStatus::Offline, "London"),
    ];

    let topo = Synthesizer::seeded(2024)
        .with_resolver(LocationResolver::new(gazetteer()))
        .generate(Some(&mut devices))
        .expect("non-empty inventory");

    assert_eq!(topo.topology_id, "topo");
    assert_eq!(topo.nodes.len(), 3);
    assert!(topo.edges.len() >= 2);
    for node in &topo.nodes {
        assert!(topo.edges_of(&node.node_id).next().is_some());
    }

    assert_eq!(topo.statistics.total_nodes, 3);
    assert_eq!(topo.statistics.active_nodes, 2);
    assert!((topo.health_status.health_score - 66.7).abs() < 0.05);
    assert_eq!(topo.health_status.status, HealthLevel::Critical);

    let bos = topo.node("bos").unwrap();
    assert_eq!(bos.coordinates, GeoCoordinate::new(42.3188, -71.0852));
    let bounds = topo.geographic_bounds;
    assert_eq!(bounds.north_east, GeoCoordinate::new(51.5072, 139.6922));
    assert_eq!(bounds.south_west, GeoCoordinate::new(35.6897, -71.0852));
    assert_eq!(bounds.zoom_level, 8);

    assert!(devices.iter().all(|d| !d.links.is_empty()));
}

#[test]
fn three_unlocated_devices_without_resolver() {
    for seed in 0..50 {
        let mut devices = vec![
            device("a", DeviceStatus::Online, ""),
            device("b", DeviceStatus::Online, ""),
            device("c", DeviceStatus::Offline, ""),
        ];
        let topo = Synthesizer::seeded(seed)
            .generate(Some(&mut devices))
            .expect("non-empty inventory");

        assert_eq!(topo.nodes.len(), 3);
        assert!(topo.edges.len() >= 2, "seed {seed}");
        assert_eq!(topo.statistics.total_nodes, 3);
        assert_eq!(topo.statistics.active_nodes, 2);
        assert!((topo.health_status.health_score - 66.7).abs() < 0.05);
        assert_eq!(topo.health_status.status, HealthLevel::Critical);
        assert!(topo.nodes.iter().all(|n| n.coordinates.is_zero()));
    }
}

#[test]
fn projection_of_resolved_devices_stays_on_map() {
    let resolver = LocationResolver::new(gazetteer());
    let projector = Projector::default();
    for text in ["Boston, USA", "Bogota", "Tokyo", "London, UK"] {
        let (_, px) = projector
            .project_location(&resolver, text)
            .unwrap_or_else(|| panic!("{text} should resolve"));
        assert!((0.0..=1000.0).contains(&px.x));
        assert!((0.0..=500.0).contains(&px.y));
    }
}

#[test]
fn service_round_trip_through_store() {
    let gz = gazetteer();
    let inventory = StaticInventory::new(vec![
        device("a", DeviceStatus::Online, "Bogotá"),
        device("b", DeviceStatus::Online, "Tokyo"),
    ]);
    let synth = Synthesizer::seeded(5).with_resolver(LocationResolver::new(gz));
    let service = TopologyService::new(inventory, MemoryTopologyStore::new(), synth);

    assert!(service.read().is_none());
    let topo = service.ensure().unwrap().unwrap();
    assert_eq!(topo.health_status.status, HealthLevel::Healthy);
    assert_eq!(service.read().unwrap(), topo);

    let json = serde_json::to_value(&topo).unwrap();
    assert_eq!(json["topologyId"], "topo");
    assert_eq!(json["healthStatus"]["status"], "healthy");
}
