use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geotopo
#[derive(Debug, Parser)]
#[command(
    name = "geotopo",
    version,
    about = "Resolve device locations, project them onto a map and synthesize network topologies"
)]
pub struct CliArgs {
    /// City table to load (.csv or .csv.gz; default: bundled worldcities.csv)
    #[arg(short = 'g', long = "gazetteer", global = true)]
    pub gazetteer: Option<PathBuf>,

    /// SVG map asset used to calibrate the reference surface
    #[arg(short = 'm', long = "map", global = true)]
    pub map: Option<PathBuf>,

    /// JSON config file; GEOTOPO_* environment variables and flags override it
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible synthesis
    #[arg(short = 's', long = "seed", global = true)]
    pub seed: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded gazetteer
    Stats,

    /// Resolve free-text location to coordinates
    Resolve {
        /// Location text (e.g. "Boston, MA, USA" or "Tokyo-DC-01")
        text: String,
    },

    /// Project a coordinate onto the viewport
    Project {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Synthesize a topology from a JSON device list and print it as JSON
    Synth {
        /// Path to a JSON array of devices
        devices: PathBuf,

        /// Also print the devices with their generated links
        #[arg(long = "with-devices")]
        with_devices: bool,
    },
}
