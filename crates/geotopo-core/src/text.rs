// crates/geotopo-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1) Transliterate Unicode → ASCII (e.g. `São Paulo` -> `Sao Paulo`)
/// 2) Trim surrounding whitespace
/// 3) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use geotopo_core::text::fold_key;
///
/// assert_eq!(fold_key(" Zürich "), "zurich");
/// assert_eq!(fold_key("São Paulo"), "sao paulo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Trim and lowercase without transliteration.
///
/// Index keys are stored in this form so that non-ASCII names stay distinct
/// from their ASCII spelling; [`fold_key`] is used as a second attempt.
#[inline]
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Build the `"city,country"` key used by the composite index.
#[inline]
pub fn composite_key(city: &str, country: &str) -> String {
    format!("{},{}", normalize_key(city), normalize_key(country))
}

/// Compares two strings for equality after Unicode folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_is_lowercase_and_trimmed() {
        assert_eq!(composite_key(" Boston ", "USA"), "boston,usa");
    }

    #[test]
    fn folded_equality_ignores_accents_and_case() {
        assert!(equals_folded("Łódź", "lodz"));
        assert!(equals_folded("MÜNCHEN", "munchen"));
        assert!(!equals_folded("Berlin", "Paris"));
    }

    #[test]
    fn normalize_keeps_diacritics() {
        assert_eq!(normalize_key("  São Paulo"), "são paulo");
    }
}
