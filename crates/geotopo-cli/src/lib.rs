//! geotopo-cli
//! ===========
//!
//! Command-line driver for the `geotopo-core` crate.
//!
//! The binary (`geotopo`) is the deliverable; this library target only
//! exists so the crate has a rendered documentation page.
//!
//! ```text
//! geotopo stats
//! geotopo resolve "Boston, MA, USA"
//! geotopo project 40.7128 -74.0060
//! geotopo --seed 42 synth devices.json
//! ```
//!
//! For programmatic access use [`geotopo-core`] directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
