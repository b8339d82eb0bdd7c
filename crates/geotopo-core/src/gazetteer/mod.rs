// crates/geotopo-core/src/gazetteer/mod.rs

//! # City Gazetteer
//!
//! Read-only reference table mapping city names to coordinates.
//!
//! The gazetteer owns a flat list of [`CityRecord`]s and two lookup indices
//! that point into it:
//!
//! - **simple**: `"tokyo"` → record. When several cities share a name the
//!   most prominent one wins (national capital, then population, then admin
//!   capital, then first seen).
//! - **composite**: `"tokyo,japan"`, `"tokyo,jp"`, `"tokyo,jpn"` → record, for
//!   disambiguation when the caller knows the country.
//!
//! Indices are built once in [`Gazetteer::from_records`] and never mutated,
//! so a gazetteer can be shared across threads behind an `Arc` without
//! locking.

mod loader;
mod parser;

pub use loader::shared;
pub use parser::{CityTableParser, CITY_TABLE_FIELDS};

use crate::geo::GeoCoordinate;
use crate::text::{composite_key, equals_folded, fold_key, normalize_key};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Capital status of a city as recorded in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapitalKind {
    /// National capital (`primary`).
    National,
    /// First-level administrative capital (`admin`).
    Admin,
    /// Lower-level administrative seat (`minor`).
    Minor,
    #[default]
    None,
}

impl CapitalKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => CapitalKind::National,
            "admin" => CapitalKind::Admin,
            "minor" => CapitalKind::Minor,
            _ => CapitalKind::None,
        }
    }
}

/// One row of the city table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub ascii_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub iso2: String,
    pub iso3: String,
    pub admin_name: String,
    pub capital: CapitalKind,
    pub population: Option<u64>,
    pub id: String,
}

impl CityRecord {
    #[inline]
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }

    /// Returns `true` if `self` should replace `existing` in the simple-name
    /// index.
    pub fn outranks(&self, existing: &CityRecord) -> bool {
        let self_national = self.capital == CapitalKind::National;
        let other_national = existing.capital == CapitalKind::National;
        if self_national != other_national {
            return self_national;
        }

        if let (Some(a), Some(b)) = (self.population, existing.population) {
            if a != b {
                return a > b;
            }
        }

        // Equal rank otherwise: first seen keeps the slot.
        self.capital == CapitalKind::Admin && existing.capital != CapitalKind::Admin
    }
}

/// Aggregate counts for the loaded gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerStats {
    pub records: usize,
    pub simple_keys: usize,
    pub composite_keys: usize,
    pub countries: usize,
}

/// The loaded city reference table plus its lookup indices.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    records: Vec<CityRecord>,
    by_name: HashMap<String, usize>,
    by_name_country: HashMap<String, usize>,
}

impl Gazetteer {
    /// A gazetteer with no records. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the indices over an owned record list.
    pub fn from_records(records: Vec<CityRecord>) -> Self {
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(records.len() * 2);
        let mut by_name_country: HashMap<String, usize> =
            HashMap::with_capacity(records.len() * 6);

        for (idx, city) in records.iter().enumerate() {
            let mut names = vec![normalize_key(&city.name)];
            let ascii = normalize_key(&city.ascii_name);
            if !ascii.is_empty() && !names.contains(&ascii) {
                names.push(ascii);
            }

            for name in &names {
                if name.is_empty() {
                    continue;
                }
                insert_ranked(&mut by_name, name.clone(), idx, &records);

                for country in [&city.country, &city.iso2, &city.iso3] {
                    if country.trim().is_empty() {
                        continue;
                    }
                    insert_ranked(
                        &mut by_name_country,
                        composite_key(name, country),
                        idx,
                        &records,
                    );
                }
            }
        }

        tracing::info!(
            records = records.len(),
            simple_keys = by_name.len(),
            composite_keys = by_name_country.len(),
            "Built gazetteer indices"
        );

        Self {
            records,
            by_name,
            by_name_country,
        }
    }

    /// Simple-name lookup. Tries the exact lowercase key first, then the
    /// transliterated form.
    pub fn lookup(&self, name: &str) -> Option<&CityRecord> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        self.by_name
            .get(&key)
            .or_else(|| self.by_name.get(&fold_key(name)))
            .map(|&idx| &self.records[idx])
    }

    /// Composite lookup on `"city,country"`, where `country` may be a country
    /// name or an ISO2/ISO3 code.
    pub fn lookup_with_country(&self, city: &str, country: &str) -> Option<&CityRecord> {
        if city.trim().is_empty() || country.trim().is_empty() {
            return None;
        }
        self.by_name_country
            .get(&composite_key(city, country))
            .or_else(|| {
                self.by_name_country
                    .get(&format!("{},{}", fold_key(city), fold_key(country)))
            })
            .map(|&idx| &self.records[idx])
    }

    /// Every record in load order.
    pub fn cities(&self) -> &[CityRecord] {
        &self.records
    }

    /// All records whose country name (accent- and case-insensitive), ISO2
    /// or ISO3 code matches `country`.
    pub fn cities_in_country(&self, country: &str) -> Vec<&CityRecord> {
        let q = country.trim();
        if q.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|c| {
                equals_folded(&c.country, q)
                    || c.iso2.eq_ignore_ascii_case(q)
                    || c.iso3.eq_ignore_ascii_case(q)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> GazetteerStats {
        let countries: HashSet<String> = self
            .records
            .iter()
            .map(|c| normalize_key(&c.country))
            .collect();
        GazetteerStats {
            records: self.records.len(),
            simple_keys: self.by_name.len(),
            composite_keys: self.by_name_country.len(),
            countries: countries.len(),
        }
    }
}

fn insert_ranked(
    index: &mut HashMap<String, usize>,
    key: String,
    idx: usize,
    records: &[CityRecord],
) {
    match index.get(&key) {
        Some(&current) if current == idx => {}
        Some(&current) if !records[idx].outranks(&records[current]) => {}
        _ => {
            index.insert(key, idx);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::city;
    use super::*;

    fn springfields() -> Vec<CityRecord> {
        vec![
            city(
                "Springfield",
                39.80,
                -89.64,
                "United States",
                "US",
                "USA",
                CapitalKind::Admin,
                Some(116_000),
            ),
            city(
                "Springfield",
                42.10,
                -72.59,
                "United States",
                "US",
                "USA",
                CapitalKind::None,
                Some(155_000),
            ),
            city(
                "Springfield",
                10.00,
                10.00,
                "Freedonia",
                "FD",
                "FRD",
                CapitalKind::National,
                Some(20_000),
            ),
        ]
    }

    #[test]
    fn national_capital_wins_simple_lookup() {
        let gz = Gazetteer::from_records(springfields());
        let hit = gz.lookup("Springfield").unwrap();
        assert_eq!(hit.country, "Freedonia");
        assert_eq!(hit.coordinate(), GeoCoordinate::new(10.0, 10.0));
    }

    #[test]
    fn population_breaks_ties_without_capital() {
        let mut rows = springfields();
        rows.pop();
        let gz = Gazetteer::from_records(rows);
        assert_eq!(gz.lookup("springfield").unwrap().latitude, 42.10);
    }

    #[test]
    fn admin_capital_breaks_ties_without_population() {
        let rows = vec![
            city("Mapleton", 1.0, 1.0, "A", "AA", "AAA", CapitalKind::None, None),
            city("Mapleton", 2.0, 2.0, "B", "BB", "BBB", CapitalKind::Admin, None),
        ];
        let gz = Gazetteer::from_records(rows);
        assert_eq!(gz.lookup("Mapleton").unwrap().country, "B");
    }

    #[test]
    fn first_seen_wins_on_equal_rank() {
        let rows = vec![
            city("Twin", 1.0, 1.0, "A", "AA", "AAA", CapitalKind::None, Some(10)),
            city("Twin", 2.0, 2.0, "B", "BB", "BBB", CapitalKind::None, Some(10)),
        ];
        let gz = Gazetteer::from_records(rows);
        assert_eq!(gz.lookup("Twin").unwrap().country, "A");
    }

    #[test]
    fn composite_keys_cover_name_and_codes() {
        let gz = Gazetteer::from_records(springfields());
        for country in ["United States", "us", "USA"] {
            let hit = gz.lookup_with_country("Springfield", country).unwrap();
            assert_eq!(hit.iso2, "US");
        }
        assert_eq!(
            gz.lookup_with_country("springfield", "fd").unwrap().country,
            "Freedonia"
        );
        assert!(gz.lookup_with_country("Springfield", "Narnia").is_none());
    }

    #[test]
    fn ascii_and_folded_names_resolve() {
        let rows = vec![city(
            "São Paulo",
            -23.55,
            -46.63,
            "Brazil",
            "BR",
            "BRA",
            CapitalKind::Admin,
            Some(22_000_000),
        )];
        let gz = Gazetteer::from_records(rows);
        assert!(gz.lookup("São Paulo").is_some());
        assert!(gz.lookup("sao paulo").is_some());
        assert!(gz.lookup_with_country("Sao Paulo", "Brazil").is_some());
    }

    #[test]
    fn empty_gazetteer_misses_everything() {
        let gz = Gazetteer::empty();
        assert!(gz.is_empty());
        assert!(gz.lookup("Tokyo").is_none());
        assert!(gz.lookup("").is_none());
        assert_eq!(gz.stats().records, 0);
    }

    #[test]
    fn stats_and_country_filter() {
        let gz = Gazetteer::from_records(springfields());
        let stats = gz.stats();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.simple_keys, 1);
        assert_eq!(stats.countries, 2);
        assert_eq!(gz.cities_in_country("usa").len(), 2);
        assert_eq!(gz.cities_in_country("Freedonia").len(), 1);
        assert!(gz.cities_in_country(" ").is_empty());
    }
}
