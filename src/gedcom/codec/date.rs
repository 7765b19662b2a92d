//! Chronological sort keys for free-text genealogical dates.
//!
//! GEDCOM dates are prose as much as data: `ABT 1850`, `BET 3 MAR 1901 AND
//! 1905`, `(unknown)`. For ordering purposes the first day/month/year triple
//! found anywhere in the text is taken as the date; qualifiers are ignored.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use time::{Date, Month};

use crate::gedcom::types::structures::Event;

static DATE_TRIPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([0-9]{1,2})\s+)?(?:(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)\s+)?([0-9]{4})")
        .expect("date pattern compiles")
});

/// A sortable date.
///
/// Every dated key orders before the undated key, and all undated keys are
/// equal, so a stable sort leaves undated items last in their original
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortKey(Option<Date>);

impl SortKey {
    pub const UNDATED: SortKey = SortKey(None);

    /// Derives a key from a date expression. Missing day defaults to 1 and
    /// missing month to January; text without a usable year, or naming a day
    /// the month does not have, is undated.
    pub fn from_date_text(text: &str) -> Self {
        SortKey(parse_first_date(text))
    }

    pub fn date(&self) -> Option<Date> {
        self.0
    }

    pub fn is_dated(&self) -> bool {
        self.0.is_some()
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_first_date(text: &str) -> Option<Date> {
    let caps = DATE_TRIPLE.captures(text)?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    let month = caps
        .get(2)
        .map_or(Some(Month::January), |m| month_from_abbreviation(m.as_str()))?;
    let day: u8 = match caps.get(1) {
        Some(d) => d.as_str().parse().ok()?,
        None => 1,
    };
    Date::from_calendar_date(year, month, day).ok()
}

fn month_from_abbreviation(abbr: &str) -> Option<Month> {
    let month = match abbr {
        "JAN" => Month::January,
        "FEB" => Month::February,
        "MAR" => Month::March,
        "APR" => Month::April,
        "MAY" => Month::May,
        "JUN" => Month::June,
        "JUL" => Month::July,
        "AUG" => Month::August,
        "SEP" => Month::September,
        "OCT" => Month::October,
        "NOV" => Month::November,
        "DEC" => Month::December,
        _ => return None,
    };
    Some(month)
}

/// Stable-sorts events by ascending sort key.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|e| e.sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::date;

    #[rstest]
    #[case("31 DEC 1997", Some(date!(1997 - 12 - 31)))]
    #[case("BEF 1 JAN 1900", Some(date!(1900 - 01 - 01)))]
    #[case("ABT 1850", Some(date!(1850 - 01 - 01)))]
    #[case("MAR 1901", Some(date!(1901 - 03 - 01)))]
    #[case("BET 3 MAR 1901 AND 1905", Some(date!(1901 - 03 - 03)))]
    #[case("30 FEB 1900", None)]
    #[case("(unknown)", None)]
    #[case("", None)]
    fn first_triple_is_used(#[case] text: &str, #[case] expected: Option<Date>) {
        assert_eq!(SortKey::from_date_text(text).date(), expected, "date text {:?}", text);
    }

    #[test]
    fn undated_orders_after_every_date() {
        let early = SortKey::from_date_text("1 JAN 0001");
        let late = SortKey::from_date_text("31 DEC 9999");
        assert!(early < late);
        assert!(late < SortKey::UNDATED);
        assert_eq!(SortKey::UNDATED.cmp(&SortKey::default()), Ordering::Equal);
    }

    #[test]
    fn sort_keeps_undated_events_in_append_order() {
        let mut events: Vec<Event> = [("A", ""), ("B", "1900"), ("C", "junk"), ("D", "1800")]
            .iter()
            .map(|(tag, date)| {
                let mut e = Event::new(tag, "");
                e.date = date.to_string();
                e.sort_key = SortKey::from_date_text(date);
                e
            })
            .collect();

        sort_chronologically(&mut events);
        let order: Vec<&str> = events.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(order, vec!["D", "B", "A", "C"]);
    }
}
