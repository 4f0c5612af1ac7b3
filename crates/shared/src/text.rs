//! Text helpers for search and validation

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Check the shape of an email address (surrounding whitespace ignored)
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

/// Normalize text for accent- and case-insensitive comparison.
///
/// Decomposes to NFD and drops the combining marks, so `"Česká"` and
/// `"ceska"` compare equal.
pub fn normalize_text(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// City and country parsed from an event location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationParts {
    pub city: String,
    pub country: String,
}

/// Split a `"City, Country"` location.
///
/// Everything after the first comma belongs to the country; a location
/// without a comma is treated as a bare city.
pub fn parse_location_parts(location: &str) -> LocationParts {
    let parts: Vec<&str> = location
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => LocationParts::default(),
        [city] => LocationParts {
            city: city.to_string(),
            country: String::new(),
        },
        [city, rest @ ..] => LocationParts {
            city: city.to_string(),
            country: rest.join(", "),
        },
    }
}

/// Join city and country the way the backend stores locations
pub fn format_location(city: &str, country: &str) -> String {
    format!("{}, {}", city.trim(), country.trim())
}
