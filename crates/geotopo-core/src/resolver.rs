// crates/geotopo-core/src/resolver.rs

//! Free-text location resolution.
//!
//! Device inventories describe where a box lives with strings like
//! `"Boston, MA, USA"`, `"NYC-DC-01"` or just `"Tokyo"`. The resolver splits
//! such text into a city and an optional country and looks both up in the
//! [`Gazetteer`], preferring the most specific match.

use crate::gazetteer::{CityRecord, Gazetteer};
use crate::geo::GeoCoordinate;
use crate::topology::Device;
use std::sync::Arc;

/// Segments that mark a hyphenated location as a technical identifier rather
/// than a place name. Matched as substrings of the lowercase segment.
const TECHNICAL_TOKENS: &[&str] = &["dc", "data", "center", "rack", "node", "server"];

/// Country spellings mapped to the forms the gazetteer indexes.
const COUNTRY_ALIASES: &[(&[&str], &[&str])] = &[
    (
        &["usa", "united states", "us", "america"],
        &["united states", "us", "usa"],
    ),
    (
        &["uk", "united kingdom", "britain", "england", "scotland", "wales"],
        &["united kingdom", "gb", "uk"],
    ),
    (&["germany", "deutschland", "de"], &["germany", "de"]),
];

/// City and optional country extracted from a location string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLocation {
    pub city: String,
    pub country: Option<String>,
}

/// Split free-form location text into city and country.
///
/// - `"Boston, MA, USA"` → city `Boston`, country `USA` (middle parts are
///   treated as region and ignored)
/// - `"NYC-DC-01"` → city `NYC`, no country
/// - `"Tokyo"` → city `Tokyo`, no country
pub fn parse_location(text: &str) -> ParsedLocation {
    let location = text.trim();

    if location.contains(',') {
        let parts: Vec<&str> = location.split(',').map(str::trim).collect();
        if parts.len() >= 2 {
            let country = parts[parts.len() - 1];
            return ParsedLocation {
                city: parts[0].to_string(),
                country: (!country.is_empty()).then(|| country.to_string()),
            };
        }
    }

    if location.contains('-') {
        let parts: Vec<&str> = location.split('-').map(str::trim).collect();
        let city = parts
            .iter()
            .find(|part| !is_technical_token(part) && part.chars().count() >= 3)
            .or_else(|| parts.first())
            .copied()
            .unwrap_or_default();
        return ParsedLocation {
            city: city.to_string(),
            country: None,
        };
    }

    ParsedLocation {
        city: location.to_string(),
        country: None,
    }
}

fn is_technical_token(part: &str) -> bool {
    if !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let lower = part.to_lowercase();
    TECHNICAL_TOKENS.iter().any(|t| lower.contains(t))
}

/// Country keys to try for a composite lookup, most literal first.
pub fn country_variants(country: &str) -> Vec<String> {
    let lower = country.trim().to_lowercase();
    let mut keys = vec![lower.clone()];
    if let Some((_, canonical)) = COUNTRY_ALIASES
        .iter()
        .find(|(spellings, _)| spellings.contains(&lower.as_str()))
    {
        for key in canonical.iter() {
            if !keys.iter().any(|k| k == key) {
                keys.push((*key).to_string());
            }
        }
    }
    keys
}

/// Tiered lookup of location text against a shared [`Gazetteer`].
#[derive(Debug, Clone)]
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
}

impl LocationResolver {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Find the best gazetteer record for the location text.
    pub fn resolve_record(&self, text: &str) -> Option<&CityRecord> {
        if text.trim().is_empty() {
            return None;
        }
        let parsed = parse_location(text);
        if parsed.city.is_empty() {
            return None;
        }

        if let Some(country) = &parsed.country {
            let hit = country_variants(country)
                .iter()
                .find_map(|c| self.gazetteer.lookup_with_country(&parsed.city, c));
            if hit.is_some() {
                return hit;
            }
        }

        self.gazetteer.lookup(&parsed.city)
    }

    /// Coordinates for the location text, or `None` when nothing matches.
    pub fn resolve(&self, text: &str) -> Option<GeoCoordinate> {
        self.resolve_record(text).map(CityRecord::coordinate)
    }

    /// Overwrite the device's coordinates from its location text.
    ///
    /// Returns `true` when the coordinates were updated. Devices without
    /// equipment metadata or location text, and locations that match
    /// nothing, are left untouched.
    pub fn refresh_device(&self, device: &mut Device) -> bool {
        let Some(equipment) = device.equipment.as_mut() else {
            return false;
        };
        if equipment.location.trim().is_empty() {
            return false;
        }

        match self.resolve(&equipment.location) {
            Some(coord) => {
                equipment.latitude = coord.latitude;
                equipment.longitude = coord.longitude;
                tracing::debug!(
                    device = %device.id,
                    lat = coord.latitude,
                    lon = coord.longitude,
                    location = %equipment.location,
                    "Updated device coordinates"
                );
                true
            }
            None => {
                tracing::debug!(
                    device = %device.id,
                    location = %equipment.location,
                    "Could not find coordinates for location"
                );
                false
            }
        }
    }
}
