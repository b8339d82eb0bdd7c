//! Basic usage example for geotopo-rs
//!
//! This example demonstrates how to:
//! - Load the city gazetteer
//! - Resolve free-text device locations
//! - Project coordinates onto the map viewport

use geotopo_rs::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== geotopo-rs Basic Usage Example ===\n");

    // Load the bundled gazetteer (a binary cache is written next to it)
    println!("Loading city gazetteer...");
    let path = Gazetteer::default_data_dir().join(Gazetteer::default_dataset_filename());
    let gz = Arc::new(Gazetteer::load(&path)?);
    let stats = gz.stats();
    println!("✓ {} cities in {} countries\n", stats.records, stats.countries);

    // Example 1: Simple and composite lookups
    println!("--- Example 1: Name lookups ---");
    if let Some(city) = gz.lookup("Springfield") {
        println!("Springfield → {} ({})", city.admin_name, city.country);
    }
    if let Some(city) = gz.lookup_with_country("Boston", "GB") {
        println!("Boston, GB → {:.4}, {:.4}", city.latitude, city.longitude);
    }
    println!();

    // Example 2: Resolve inventory-style location strings
    println!("--- Example 2: Resolve locations ---");
    let resolver = LocationResolver::new(gz.clone());
    for text in ["Boston, MA, USA", "Boston", "NYC-New York-DC-01", "Zurich", "Atlantis"] {
        match resolver.resolve(text) {
            Some(c) => println!("{text:<22} → {:.4}, {:.4}", c.latitude, c.longitude),
            None => println!("{text:<22} → not found"),
        }
    }
    println!();

    // Example 3: Project onto the default 1000×500 viewport
    println!("--- Example 3: Map projection ---");
    let projector = Projector::default();
    for text in ["Tokyo", "London, UK", "Sydney", "Denver"] {
        if let Some((geo, px)) = projector.project_location(&resolver, text) {
            println!(
                "{text:<12} ({:>8.3}, {:>8.3}) → x={:>7.2} y={:>7.2}",
                geo.latitude, geo.longitude, px.x, px.y
            );
        }
    }

    Ok(())
}
