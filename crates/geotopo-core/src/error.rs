// crates/geotopo-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by `geotopo-core`.
///
/// Most conditions inside the engine degrade instead of failing: a missing
/// gazetteer or map descriptor is reported through this type so the caller
/// can log it and fall back to defaults, while unresolvable locations and
/// empty inputs never produce an error at all.
#[derive(Debug, Error)]
pub enum GeoTopoError {
    /// A reference file (gazetteer table, map descriptor) was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A single row of a delimited table could not be parsed.
    #[error("Malformed record at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The external inventory source or topology store reported a failure.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, GeoTopoError>;
