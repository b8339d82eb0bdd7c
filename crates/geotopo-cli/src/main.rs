//! geotopo — command-line driver for geotopo-core
//!
//! Usage examples
//! --------------
//!
//! - Gazetteer summary
//!   $ geotopo stats
//!
//! - Resolve location text
//!   $ geotopo resolve "Boston, MA, USA"
//!   $ geotopo resolve Tokyo-DC-01
//!
//! - Project a coordinate onto the 1000×500 viewport
//!   $ geotopo project 40.7128 -74.0060
//!   $ geotopo --map world.svg project 35.68 139.69
//!
//! - Synthesize a topology from a device list
//!   $ geotopo --seed 42 synth devices.json
//!
//! Configuration
//! -------------
//!
//! Settings come from defaults, then `--config <file.json>`, then the
//! `GEOTOPO_GAZETTEER`, `GEOTOPO_MAP` and `GEOTOPO_SEED` environment
//! variables, then command-line flags.
mod args;
mod logging;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geotopo_core::gazetteer;
use geotopo_core::prelude::*;
use geotopo_core::resolver::parse_location;
use geotopo_core::service::InventoryQuery;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => TopologyConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TopologyConfig::default(),
    }
    .with_env();
    if let Some(path) = args.gazetteer {
        config.gazetteer_path = path;
    }
    if let Some(path) = args.map {
        config.map_path = Some(path);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    match args.command {
        Commands::Stats => {
            let gz = gazetteer::shared(&config.gazetteer_path);
            let stats = gz.stats();
            println!("Gazetteer statistics:");
            println!("  Source: {}", config.gazetteer_path.display());
            println!("  Cities: {}", stats.records);
            println!("  Countries: {}", stats.countries);
            println!("  Name keys: {}", stats.simple_keys);
            println!("  Name+country keys: {}", stats.composite_keys);
        }

        Commands::Resolve { text } => {
            let parsed = parse_location(&text);
            println!("City: {}", parsed.city);
            println!("Country: {}", parsed.country.as_deref().unwrap_or("-"));

            let resolver = LocationResolver::new(gazetteer::shared(&config.gazetteer_path));
            match resolver.resolve_record(&text) {
                Some(city) => {
                    let px = config.projector().convert(city.latitude, city.longitude);
                    println!("Match: {}, {} ({})", city.name, city.country, city.iso2);
                    println!("Coordinates: {:.4}, {:.4}", city.latitude, city.longitude);
                    println!("Region: {}", city.coordinate().region().label());
                    println!("Map: {:.2}, {:.2}", px.x, px.y);
                }
                None => tracing::warn!(%text, "No coordinates found"),
            }
        }

        Commands::Project { lat, lon } => {
            let projector = config.projector();
            let px = projector.convert(lat, lon);
            let base = projector.project_base(lat, lon);
            println!(
                "Reference surface: {}x{}",
                projector.surface().width,
                projector.surface().height
            );
            println!("Base: {:.2}, {:.2}", base.x, base.y);
            println!(
                "Viewport ({}x{}): {:.2}, {:.2}",
                projector.viewport().width,
                projector.viewport().height,
                px.x,
                px.y
            );
        }

        Commands::Synth {
            devices,
            with_devices,
        } => {
            let mut list = JsonFileInventory::new(&devices)
                .fetch_devices(&InventoryQuery::unlimited())
                .with_context(|| format!("loading devices from {}", devices.display()))?;

            let gz = gazetteer::shared(&config.gazetteer_path);
            let mut synth = config.synthesizer(gz);
            let Some(topology) = synth.generate(Some(&mut list)) else {
                tracing::warn!(path = %devices.display(), "No devices in inventory file");
                return Ok(());
            };

            let output = if with_devices {
                serde_json::json!({ "topology": topology, "devices": list })
            } else {
                serde_json::to_value(&topology)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
