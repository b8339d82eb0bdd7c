//! Parser for the world-cities table.
//!
//! The table is comma-delimited text, one city per line, with optional
//! double quotes around fields:
//!
//! ```text
//! "city","city_ascii","lat","lng","country","iso2","iso3","admin_name","capital","population","id"
//! "Tokyo","Tokyo","35.6897","139.6922","Japan","JP","JPN","Tōkyō","primary","37732000","1392685764"
//! ```
//!
//! A leading header row is recognized by its `lat` column and skipped.

use std::io::{BufRead, BufReader, Read};

use super::{CapitalKind, CityRecord};
use crate::error::{GeoTopoError, Result};

/// Number of columns a row must carry to be accepted.
pub const CITY_TABLE_FIELDS: usize = 11;

/// Parser for the world-cities table.
pub struct CityTableParser;

impl CityTableParser {
    /// Parse city rows from a reader.
    ///
    /// Yields one item per non-blank, non-header line. Malformed rows come
    /// through as [`GeoTopoError::Parse`] so callers decide whether to skip
    /// them; read failures come through as [`GeoTopoError::Io`] and end the
    /// iteration.
    pub fn parse<R: Read>(reader: R) -> impl Iterator<Item = Result<CityRecord>> {
        CityTableIterator::new(BufReader::new(reader))
    }

    /// Parse all rows into a vector.
    ///
    /// Skips malformed rows and logs warnings. Only I/O failures are fatal.
    pub fn parse_all<R: Read>(reader: R) -> Result<Vec<CityRecord>> {
        let mut cities = Vec::new();
        let mut skipped = 0usize;
        for result in Self::parse(reader) {
            match result {
                Ok(city) => cities.push(city),
                Err(GeoTopoError::Parse { line, message }) => {
                    skipped += 1;
                    tracing::warn!(line, "Skipping city row: {}", message);
                }
                Err(e) => return Err(e),
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, parsed = cities.len(), "City table had malformed rows");
        }
        Ok(cities)
    }

    /// Parse a single line into a record.
    pub fn parse_line(line: &str, line_number: usize) -> Result<CityRecord> {
        let fields = split_fields(line);
        if fields.len() < CITY_TABLE_FIELDS {
            return Err(GeoTopoError::Parse {
                line: line_number,
                message: format!(
                    "expected {} fields, found {}",
                    CITY_TABLE_FIELDS,
                    fields.len()
                ),
            });
        }

        let latitude: f64 = fields[2].trim().parse().map_err(|_| GeoTopoError::Parse {
            line: line_number,
            message: format!("invalid latitude '{}' for city {}", fields[2], fields[0]),
        })?;
        let longitude: f64 = fields[3].trim().parse().map_err(|_| GeoTopoError::Parse {
            line: line_number,
            message: format!("invalid longitude '{}' for city {}", fields[3], fields[0]),
        })?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoTopoError::Parse {
                line: line_number,
                message: format!("non-finite coordinate for city {}", fields[0]),
            });
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let name = next();
        let ascii_name = next();
        let _ = (next(), next());
        let country = next();
        let iso2 = next();
        let iso3 = next();
        let admin_name = next();
        let capital = CapitalKind::parse(&next());
        // Population is sometimes written as a float ("1234.0").
        let population = next().trim().parse::<f64>().ok().map(|p| p as u64);
        let id = next();

        Ok(CityRecord {
            name,
            ascii_name,
            latitude,
            longitude,
            country,
            iso2,
            iso3,
            admin_name,
            capital,
            population,
            id,
        })
    }
}

/// Split a comma-delimited line, honouring double quotes and `""` escapes.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(CITY_TABLE_FIELDS);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn is_header(line: &str) -> bool {
    split_fields(line)
        .get(2)
        .is_some_and(|f| f.trim().eq_ignore_ascii_case("lat"))
}

/// Iterator that yields records from a city table.
struct CityTableIterator<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> CityTableIterator<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::new(),
            line_number: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for CityTableIterator<R> {
    type Item = Result<CityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    self.done = true;
                }
                Ok(_) => {
                    self.line_number += 1;
                    let line = self
                        .line_buffer
                        .trim_start_matches('\u{feff}')
                        .trim_end_matches(['\r', '\n']);
                    if line.trim().is_empty() {
                        continue;
                    }
                    if self.line_number == 1 && is_header(line) {
                        continue;
                    }
                    return Some(CityTableParser::parse_line(line, self.line_number));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(GeoTopoError::Io(e)));
                }
            }
        }
        None
    }
}
