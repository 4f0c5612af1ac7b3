//! Event catalog filtering

use chrono::NaiveDate;
use shared::dates::{is_current_or_future, parse_flexible_date};
use shared::text::normalize_text;
use shared::Event;

/// Filters of the event catalog screen.
///
/// Empty strings and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub search: String,
    pub country: String,
    pub city: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EventFilter {
    /// Build a filter from raw form text; unparseable dates set no bound
    pub fn from_input(search: &str, country: &str, city: &str, from: &str, to: &str) -> Self {
        Self {
            search: search.to_string(),
            country: country.to_string(),
            city: city.to_string(),
            from: parse_flexible_date(from),
            to: parse_flexible_date(to),
        }
    }

    /// Whether `event` is listed on `today`
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        let current = event
            .end_date()
            .map(|end| is_current_or_future(end, today))
            .unwrap_or(true);
        if !current {
            return false;
        }

        let search = self.search.trim().to_lowercase();
        if !event.nombre.to_lowercase().contains(&search) {
            return false;
        }

        let location = event.location();
        if !self.country.is_empty() && normalize_text(&location.country) != normalize_text(&self.country) {
            return false;
        }
        if !self.city.is_empty() && normalize_text(&location.city) != normalize_text(&self.city) {
            return false;
        }

        let start = event.start_date();
        let after_from = match self.from {
            Some(from) => start.is_some_and(|s| s >= from),
            None => true,
        };
        let before_to = match self.to {
            Some(to) => start.is_some_and(|s| s <= to),
            None => true,
        };
        after_from && before_to
    }

    /// Events passing the filter, in their original order
    pub fn apply<'a>(&self, events: &'a [Event], today: NaiveDate) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e, today)).collect()
    }
}
