//! Human-readable source references.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::records::Source;

/// One `Label: value` segment of a publication field.
static PUBLICATION_FACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *([^:]+): (.+)$").expect("publication pattern compiles"));

impl Source {
    /// Formats the source as a one-line bibliographic reference:
    /// author, quoted title, then a parenthesized publication summary.
    ///
    /// The summary is taken from `;`-separated `Location:`, `Name:` and
    /// `Date:` segments of the publication field; other segments are ignored.
    pub fn reference_string(&self) -> String {
        let mut parts = Vec::new();
        if !self.author.is_empty() {
            parts.push(self.author.clone());
        }
        if !self.title.is_empty() {
            parts.push(format!("\"{}\"", self.title));
        }

        let (mut location, mut name, mut date) = (None, None, None);
        for segment in self.publication.split(';') {
            let Some(caps) = PUBLICATION_FACT.captures(segment) else {
                continue;
            };
            let value = caps.get(2).map(|m| m.as_str());
            match caps.get(1).map(|m| m.as_str()) {
                Some("Location") => location = value,
                Some("Name") => name = value,
                Some("Date") => date = value,
                _ => {}
            }
        }

        let facts: Vec<&str> = [location, name, date].into_iter().flatten().collect();
        if !facts.is_empty() {
            parts.push(format!("({})", facts.join(", ")));
        }

        parts.join(", ")
    }
}
