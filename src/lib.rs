//! Workspace facade for the demos: re-exports `geotopo-core`.
pub use geotopo_core::*;
