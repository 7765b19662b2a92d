//! Tag vocabularies shared by several contexts.

/// Tags that open a life event on an individual.
pub const INDIVIDUAL_EVENTS: &[&str] = &[
    "BIRT", "CHR", "DEAT", "BURI", "CREM", "ADOP", "BAPM", "BARM", "BASM", "BLES", "CHRA",
    "CONF", "FCOM", "ORDN", "NATU", "EMIG", "IMMI", "CENS", "PROB", "WILL", "GRAD", "RETI",
    "EVEN",
];

/// Tags that open an attribute on an individual.
pub const INDIVIDUAL_ATTRIBUTES: &[&str] = &[
    "CAST", "DSCR", "EDUC", "IDNO", "NATI", "NCHI", "NMR", "OCCU", "PROP", "RELI", "RESI",
    "SSN", "TITL", "FACT", "_MILT",
];

/// Tags that open an event on a family.
pub const FAMILY_EVENTS: &[&str] = &[
    "ANUL", "CENS", "DIV", "DIVF", "ENGA", "MARR", "MARB", "MARC", "MARL", "MARS", "EVEN",
];

/// Individual events that may name the family the person was born or
/// adopted into.
pub const EVENTS_WITH_PARENTS: &[&str] = &["BIRT", "ADOP"];

/// A text field that accepts `CONC`/`CONT` continuation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    // Source record, single-valued
    Author,
    Title,
    Abbreviation,
    Publication,
    Text,
    Kind,
    Periodical,
    Volume,
    MediaType,
    // Source record, one entry per occurrence
    Pages,
    Films,
    Files,
    FileNumbers,
    Dates,
    Places,
    DatesViewed,
    Urls,
    Locations,
    Repositories,
    Submitters,
    // Substructures
    CitationPage,
    CitationText,
    /// `COPR` on the header or on the header's source data.
    Copyright,
}

impl TextField {
    /// Maps a tag directly under a source record to its text field.
    pub fn for_source_tag(tag: &str) -> Option<Self> {
        let field = match tag {
            "AUTH" => TextField::Author,
            "TITL" => TextField::Title,
            "ABBR" => TextField::Abbreviation,
            "PUBL" => TextField::Publication,
            "TEXT" => TextField::Text,
            "TYPE" => TextField::Kind,
            "PERI" => TextField::Periodical,
            "VOL" => TextField::Volume,
            "MEDI" => TextField::MediaType,
            "PAGE" => TextField::Pages,
            "FILM" => TextField::Films,
            "FILE" => TextField::Files,
            "FILN" => TextField::FileNumbers,
            "DATE" => TextField::Dates,
            "PLAC" => TextField::Places,
            "DATV" => TextField::DatesViewed,
            "URL" => TextField::Urls,
            "LOCA" => TextField::Locations,
            "REPO" => TextField::Repositories,
            "SUBM" => TextField::Submitters,
            _ => return None,
        };
        Some(field)
    }
}

pub fn is_individual_event(tag: &str) -> bool {
    INDIVIDUAL_EVENTS.contains(&tag)
}

pub fn is_individual_attribute(tag: &str) -> bool {
    INDIVIDUAL_ATTRIBUTES.contains(&tag)
}

pub fn is_family_event(tag: &str) -> bool {
    FAMILY_EVENTS.contains(&tag)
}
