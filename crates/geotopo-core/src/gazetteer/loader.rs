// crates/geotopo-core/src/gazetteer/loader.rs

//! # Gazetteer Loader
//!
//! Handles the physical layer (I/O, decompression, binary cache) and
//! delegates row parsing to [`CityTableParser`].

use super::{CityRecord, CityTableParser, Gazetteer};
use crate::error::{GeoTopoError, Result};
use once_cell::sync::OnceCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Suffix appended to the source file name for the bincode cache.
pub const CACHE_SUFFIX: &str = "bin";

static SHARED_GAZETTEER: OnceCell<Arc<Gazetteer>> = OnceCell::new();

impl Gazetteer {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "worldcities.csv"
    }

    /// **Smart Load:** uses the binary cache when it is fresh, otherwise
    /// parses the source table and refreshes the cache.
    ///
    /// A missing source is [`GeoTopoError::NotFound`]. Callers that want
    /// degraded operation fall back to [`Gazetteer::empty`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GeoTopoError::NotFound(format!(
                "City table not found at {}",
                path.display()
            )));
        }

        let cache_path = cache_path_for(path);
        if is_cache_fresh(path, &cache_path) {
            match read_cache(&cache_path) {
                Ok(records) => {
                    tracing::debug!(path = %cache_path.display(), "Loaded gazetteer from binary cache");
                    return Ok(Self::from_records(records));
                }
                Err(e) => {
                    tracing::debug!(path = %cache_path.display(), "Ignoring unreadable cache: {}", e);
                }
            }
        }

        let records = Self::parse_source(path)?;
        if let Err(e) = write_cache(&cache_path, &records) {
            tracing::debug!(path = %cache_path.display(), "Could not write gazetteer cache: {}", e);
        }
        Ok(Self::from_records(records))
    }

    /// Parse the source table without touching the binary cache.
    pub fn load_uncached(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse_source(path.as_ref()).map(Self::from_records)
    }

    /// Build a gazetteer from any reader yielding the plain-text table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        CityTableParser::parse_all(reader).map(Self::from_records)
    }

    fn parse_source(path: &Path) -> Result<Vec<CityRecord>> {
        let reader = open_stream(path)?;
        let records = CityTableParser::parse_all(reader)?;
        tracing::info!(path = %path.display(), count = records.len(), "Parsed city table");
        Ok(records)
    }
}

/// Process-wide gazetteer, loaded on first use.
///
/// Loading happens at most once per process; later calls return the same
/// instance regardless of `path`. If the first load fails the failure is
/// logged and an empty gazetteer is installed, so location resolution
/// degrades instead of aborting topology generation.
pub fn shared(path: impl AsRef<Path>) -> Arc<Gazetteer> {
    SHARED_GAZETTEER
        .get_or_init(|| {
            let path = path.as_ref();
            match Gazetteer::load(path) {
                Ok(gz) => Arc::new(gz),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "Could not load city gazetteer, location lookup disabled: {}",
                        e
                    );
                    Arc::new(Gazetteer::empty())
                }
            }
        })
        .clone()
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the file
/// name ends in `.gz`.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoTopoError::NotFound(format!("City table not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == "gz") {
        #[cfg(feature = "compact")]
        {
            tracing::debug!(path = %path.display(), "Loading gzip compressed city table");
            return Ok(Box::new(flate2::read::GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GeoTopoError::InvalidData(
                "Gzip input requires the 'compact' feature".into(),
            ));
        }
    }

    Ok(Box::new(reader))
}

fn cache_path_for(source: &Path) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gazetteer".to_string());
    source.with_file_name(format!("{filename}.{CACHE_SUFFIX}"))
}

fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => false,
    }
}

fn read_cache(path: &Path) -> Result<Vec<CityRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}

fn write_cache(path: &Path, records: &[CityRecord]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "\
city,city_ascii,lat,lng,country,iso2,iso3,admin_name,capital,population,id
London,London,51.5072,-0.1275,United Kingdom,GB,GBR,\"London, City of\",primary,11262000,1826645935
Paris,Paris,48.8567,2.3522,France,FR,FRA,Île-de-France,primary,11060000,1250015082
";

    fn write_table(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(TABLE.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Gazetteer::load(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, GeoTopoError::NotFound(_)));
    }

    #[test]
    fn load_writes_and_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "worldcities.csv");

        let first = Gazetteer::load(&path).unwrap();
        assert_eq!(first.len(), 2);
        let cache = dir.path().join("worldcities.csv.bin");
        assert!(cache.exists());

        let second = Gazetteer::load(&path).unwrap();
        assert_eq!(second.cities(), first.cities());
        assert_eq!(second.lookup("paris").unwrap().iso3, "FRA");
    }

    #[test]
    fn corrupt_cache_falls_back_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "cities.csv");
        Gazetteer::load(&path).unwrap();
        fs::write(dir.path().join("cities.csv.bin"), b"garbage").unwrap();

        let gz = Gazetteer::load(&path).unwrap();
        assert_eq!(gz.len(), 2);
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzip_tables() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worldcities.csv.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(TABLE.as_bytes()).unwrap();
        enc.finish().unwrap();

        let gz = Gazetteer::load_uncached(&path).unwrap();
        assert_eq!(gz.lookup("London").unwrap().admin_name, "London, City of");
    }

    #[test]
    fn cache_path_appends_suffix() {
        let p = cache_path_for(Path::new("/data/worldcities.csv"));
        assert_eq!(p, PathBuf::from("/data/worldcities.csv.bin"));
    }
}
