//! Substructures owned by a single record.
//!
//! None of these carry an identity of their own: an [`Event`] or a
//! [`Citation`] belongs to exactly one enclosing record and is dropped with
//! it. Links to shared records are held as typed ids.

use serde::Serialize;

use crate::gedcom::codec::date::SortKey;

use super::records::{FamilyId, IndividualId, MediaId, NoteId, SourceId};

/// A life event (`BIRT`, `MARR`, …) or an attribute (`OCCU`, `RESI`, …).
///
/// Both share one shape; which collection an instance lives in is what
/// distinguishes them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Event {
    pub tag: String,
    /// Free value on the event line itself, e.g. the occupation for `OCCU`.
    pub value: String,
    pub kind: String,
    pub date: String,
    #[serde(skip)]
    pub sort_key: SortKey,
    pub place: Place,
    pub address: Option<Address>,
    pub age: String,
    pub agency: String,
    pub cause: Vec<NoteId>,
    pub citations: Vec<Citation>,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
    /// Families the individual was born or adopted into (`BIRT`/`ADOP` only).
    pub parents: Vec<FamilyLink>,
    /// Per-spouse details of a family event.
    pub spouses: Vec<SpouseInfo>,
}

impl Event {
    pub fn new(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            value: value.to_string(),
            ..Self::default()
        }
    }
}

/// Age of one spouse at the time of a family event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpouseInfo {
    /// `HUSB` or `WIFE`.
    pub role: String,
    pub age: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Place {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteId>,
}

/// Map coordinates collected under `PLAC`/`MAP` before being folded into the place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Address {
    /// The full address text, built from the `ADDR` value and its continuations.
    pub full: String,
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// A link from a record to a source, with the citing detail.
#[derive(Debug, Clone, Serialize)]
pub struct Citation {
    pub source: SourceId,
    pub page: String,
    pub quality: String,
    pub data: CitationData,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
}

impl Citation {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            page: String::new(),
            quality: String::new(),
            data: CitationData::default(),
            media: Vec::new(),
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CitationData {
    pub date: String,
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonalName {
    /// The full name as written, surname between slashes.
    pub name: String,
    pub prefix: String,
    pub given: String,
    pub nickname: String,
    pub surname_prefix: String,
    pub surname: String,
    pub suffix: String,
    pub kind: String,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteId>,
}

impl PersonalName {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// An individual's membership of a family, as child (`FAMC`) or spouse (`FAMS`).
#[derive(Debug, Clone, Serialize)]
pub struct FamilyLink {
    pub family: FamilyId,
    pub pedigree: String,
    pub adopted_by: String,
    pub notes: Vec<NoteId>,
}

impl FamilyLink {
    pub fn new(family: FamilyId) -> Self {
        Self {
            family,
            pedigree: String::new(),
            adopted_by: String::new(),
            notes: Vec::new(),
        }
    }
}

/// A child of a family with the child's relation to each parent.
#[derive(Debug, Clone, Serialize)]
pub struct ChildLink {
    pub person: IndividualId,
    pub father_relation: String,
    pub mother_relation: String,
}

impl ChildLink {
    pub fn new(person: IndividualId) -> Self {
        Self {
            person,
            father_relation: String::new(),
            mother_relation: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
}

/// The `CHAN` block recording when a record was last modified.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChangeStamp {
    pub stamp: Option<Timestamp>,
    pub notes: Vec<NoteId>,
}

/// A media file reference inside a multimedia object.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileRef {
    pub name: String,
    pub form: String,
    pub title: String,
    pub description: Option<NoteId>,
}

/// Event-recording data block of a source record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceData {
    pub agency: String,
    pub events: Vec<Event>,
    pub notes: Vec<NoteId>,
}

/// The system that produced the file (`HEAD`/`SOUR`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeaderSource {
    pub system_id: String,
    pub version: String,
    pub name: String,
    pub form: String,
    pub corporation: Option<Corporation>,
    pub data: Option<HeaderData>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Corporation {
    pub name: String,
    pub address: Option<Address>,
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub web: Vec<String>,
}

/// Name, date and copyright of the source data set a file was built from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeaderData {
    pub name: String,
    pub date: String,
    pub copyright: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterSet {
    pub name: String,
    pub version: String,
}

/// Version and form of the interchange format itself (`HEAD`/`GEDC`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormatInfo {
    pub version: String,
    pub form: String,
}
