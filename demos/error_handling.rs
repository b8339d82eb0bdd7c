//! Error handling example for geotopo-rs
//!
//! Missing reference data degrades instead of aborting: a missing gazetteer
//! means no location matches, a missing map asset means the default surface.

use geotopo_rs::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== geotopo-rs Error Handling Example ===\n");

    // Example 1: Missing gazetteer file
    println!("--- Example 1: Loading a missing gazetteer ---");
    let gz = match Gazetteer::load("/nonexistent/worldcities.csv") {
        Ok(gz) => gz,
        Err(GeoTopoError::NotFound(msg)) => {
            println!("  ✗ {msg}");
            println!("  → continuing with an empty gazetteer");
            Gazetteer::empty()
        }
        Err(e) => return Err(e),
    };
    println!();

    // Example 2: Resolution misses are not errors
    println!("--- Example 2: Resolving against an empty gazetteer ---");
    let resolver = LocationResolver::new(Arc::new(gz));
    for text in ["Tokyo", "", "Boston, USA"] {
        println!("  {text:?} → {:?}", resolver.resolve(text));
    }
    println!();

    // Example 3: Missing map asset
    println!("--- Example 3: Missing map descriptor ---");
    let surface = MapSurface::from_descriptor_or_default("/nonexistent/world.svg");
    println!("  surface: {}x{}", surface.width, surface.height);
    println!();

    // Example 4: Empty or unlocated inventories
    println!("--- Example 4: Synthesis edge cases ---");
    let mut synth = Synthesizer::seeded(1).with_resolver(resolver);
    println!("  no devices → {:?}", synth.generate(None).map(|t| t.nodes.len()));

    let mut devices = vec![
        Device::new("orphan"),
        Device::new("edge-1").with_equipment(Equipment::new(
            "edge-1",
            DeviceType::Switch,
            DeviceStatus::Offline,
            "Atlantis",
        )),
    ];
    if let Some(topo) = synth.generate(Some(&mut devices)) {
        println!(
            "  nodes={} edges={} health={:?} ({:.1})",
            topo.nodes.len(),
            topo.edges.len(),
            topo.health_status.status,
            topo.health_status.health_score
        );
    }

    Ok(())
}
