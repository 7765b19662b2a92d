//! Top-level records of a GEDCOM document.
//!
//! Every record kind except [`Header`] and [`Trailer`] can be the target of a
//! cross-reference and therefore lives in an arena, addressed by a typed id.
//! A record's `xref` is empty when it was created inline and never
//! registered.

use serde::Serialize;

use super::arena::Id;
use super::structures::*;

pub type IndividualId = Id<Individual>;
pub type FamilyId = Id<Family>;
pub type SourceId = Id<Source>;
pub type NoteId = Id<Note>;
pub type MediaId = Id<MediaObject>;
pub type RepositoryId = Id<Repository>;
pub type SubmitterId = Id<Submitter>;
pub type SubmissionId = Id<Submission>;

/// The `HEAD` record describing the file as a whole.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub source: Option<HeaderSource>,
    pub destination: String,
    pub timestamp: Option<Timestamp>,
    pub submitter: Option<SubmitterId>,
    pub submission: Option<SubmissionId>,
    pub file: String,
    pub copyright: String,
    pub format: Option<FormatInfo>,
    pub encoding: Option<CharacterSet>,
    pub language: String,
    pub note: Option<NoteId>,
}

/// A single person.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Individual {
    pub xref: String,
    pub names: Vec<PersonalName>,
    pub sex: String,
    /// Life events, in chronological order once the record has closed.
    pub events: Vec<Event>,
    /// Attributes, in chronological order once the record has closed.
    pub attributes: Vec<Event>,
    /// Families this person is a child of.
    pub parents: Vec<FamilyLink>,
    /// Families this person is a spouse in.
    pub families: Vec<FamilyLink>,
    pub citations: Vec<Citation>,
    pub photo: Option<MediaId>,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
    pub changed: Option<ChangeStamp>,
}

impl Individual {
    /// The first recorded name, if any.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(|n| n.name.as_str())
    }
}

/// A family unit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Family {
    pub xref: String,
    pub husband: Option<IndividualId>,
    pub wife: Option<IndividualId>,
    pub children: Vec<ChildLink>,
    /// Family events, in chronological order once the record has closed.
    pub events: Vec<Event>,
    pub number_of_children: Option<Event>,
    pub citations: Vec<Citation>,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
    pub changed: Option<ChangeStamp>,
}

/// A source document.
///
/// Besides the standard bibliographic fields this also carries the
/// repeatable fields written by several desktop programs (`PAGE`, `FILM`,
/// `URL`, …), one entry per occurrence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Source {
    pub xref: String,
    pub author: String,
    pub title: String,
    pub abbreviation: String,
    pub publication: String,
    pub text: String,
    pub kind: String,
    pub periodical: String,
    pub volume: String,
    pub media_type: String,
    pub pages: Vec<String>,
    pub films: Vec<String>,
    pub files: Vec<String>,
    pub file_numbers: Vec<String>,
    pub dates: Vec<String>,
    pub places: Vec<String>,
    pub dates_viewed: Vec<String>,
    pub urls: Vec<String>,
    pub locations: Vec<String>,
    pub repositories: Vec<String>,
    pub submitters: Vec<String>,
    pub event_data: Option<SourceData>,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
    pub changed: Option<ChangeStamp>,
}

/// A text note, either a shared `NOTE` record or an inline note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Note {
    pub xref: String,
    pub text: String,
    pub citations: Vec<Citation>,
}

/// A multimedia object.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaObject {
    pub xref: String,
    pub file: Option<FileRef>,
    pub form: String,
    pub title: String,
    pub notes: Vec<NoteId>,
    pub changed: Option<ChangeStamp>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Repository {
    pub xref: String,
    pub name: String,
    pub address: Option<Address>,
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub web: Vec<String>,
    pub notes: Vec<NoteId>,
    pub changed: Option<ChangeStamp>,
}

/// The person or organization that contributed the data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Submitter {
    pub xref: String,
    pub name: String,
    pub language: String,
    pub address: Option<Address>,
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub changed: Option<ChangeStamp>,
}

/// Processing instructions for an ordinance submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Submission {
    pub xref: String,
    pub family_file: String,
    pub temple_code: String,
    pub ancestors: String,
    pub descendants: String,
    pub ordinance: String,
    pub submitter: Option<SubmitterId>,
}

/// Marks the end of the file. Carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Trailer;
