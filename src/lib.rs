//! # gedcom-reader
//!
//! A streaming decoder for GEDCOM genealogical interchange files.
//! Reads 5.5-style line grammar into a typed document graph of individuals,
//! families, sources, notes and media, resolving cross-references in either
//! direction.
//!
//! **Note:** Decoding only. Writing GEDCOM and transcoding from ANSEL or
//! other legacy character sets are not supported; input is read as UTF-8.
pub mod gedcom;

// Re-export the main types for convenience
pub use gedcom::{
    decode_bytes, decode_str, open,
    codec::date::SortKey,
    registry::Registry,
    types::{
        arena::{Arena, Id},
        records::{
            Family, FamilyId, Header, Individual, IndividualId, MediaId, MediaObject, Note,
            NoteId, Repository, Source, SourceId, Submission, Submitter, Trailer,
        },
        structures::{
            Address, ChangeStamp, ChildLink, Citation, Event, FamilyLink, PersonalName, Place,
        },
    },
    DecodeOptions, Decoder, Document, GedcomError, Line, Result,
};
