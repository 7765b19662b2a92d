//! Parser contexts.
//!
//! One variant per kind of open record. Shared records are edited in place
//! through their id, so their variants carry only the id. Substructures have
//! no identity; their variants own the value being built, which is handed to
//! the parent context when the child closes.

use crate::gedcom::types::records::*;
use crate::gedcom::types::structures::*;

use super::tags::TextField;

/// Which collection of the parent a closed event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSlot {
    Event,
    Attribute,
    NumberOfChildren,
}

/// Whether an individual's family link is as child or as spouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSlot {
    Parents,
    Spouses,
}

#[derive(Debug)]
pub enum Node {
    Root,
    /// Swallows an unrecognized subtree.
    Skip,
    Header,
    Individual(IndividualId),
    Family(FamilyId),
    Source(SourceId),
    Note(NoteId),
    Media(MediaId),
    Repository(RepositoryId),
    Submitter(SubmitterId),
    Submission(SubmissionId),
    Name(Box<PersonalName>),
    Event(EventSlot, Box<Event>),
    Citation(Box<Citation>),
    CitationData(CitationData),
    FamilyLink(LinkSlot, FamilyLink),
    Child(ChildLink),
    Spouse(SpouseInfo),
    Address(Box<Address>),
    Place(Box<Place>),
    Coordinates(Coordinates),
    Change(ChangeStamp),
    Timestamp(Timestamp),
    SourceData(Box<SourceData>),
    File(FileRef),
    HeaderSource(Box<HeaderSource>),
    Corporation(Box<Corporation>),
    HeaderData(HeaderData),
    CharacterSet(CharacterSet),
    FormatInfo(FormatInfo),
    Text(TextField, String),
}

impl Node {
    /// A short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Root => "root",
            Node::Skip => "skip",
            Node::Header => "header",
            Node::Individual(_) => "individual",
            Node::Family(_) => "family",
            Node::Source(_) => "source",
            Node::Note(_) => "note",
            Node::Media(_) => "media object",
            Node::Repository(_) => "repository",
            Node::Submitter(_) => "submitter",
            Node::Submission(_) => "submission",
            Node::Name(_) => "name",
            Node::Event(..) => "event",
            Node::Citation(_) => "citation",
            Node::CitationData(_) => "citation data",
            Node::FamilyLink(..) => "family link",
            Node::Child(_) => "child link",
            Node::Spouse(_) => "spouse info",
            Node::Address(_) => "address",
            Node::Place(_) => "place",
            Node::Coordinates(_) => "map",
            Node::Change(_) => "change stamp",
            Node::Timestamp(_) => "timestamp",
            Node::SourceData(_) => "source data",
            Node::File(_) => "file",
            Node::HeaderSource(_) => "header source",
            Node::Corporation(_) => "corporation",
            Node::HeaderData(_) => "header data",
            Node::CharacterSet(_) => "character set",
            Node::FormatInfo(_) => "format info",
            Node::Text(..) => "text",
        }
    }

    /// Shared records are attached by id when they open, so closing them
    /// hands nothing to the parent.
    pub fn is_detached(&self) -> bool {
        matches!(
            self,
            Node::Root
                | Node::Skip
                | Node::Header
                | Node::Individual(_)
                | Node::Family(_)
                | Node::Source(_)
                | Node::Note(_)
                | Node::Media(_)
                | Node::Repository(_)
                | Node::Submitter(_)
                | Node::Submission(_)
        )
    }
}
