//! The decoded document aggregate.

use serde::Serialize;

use crate::gedcom::registry::{Entity, Registry};

use super::arena::Id;
use super::records::*;

/// A fully decoded GEDCOM file.
///
/// The record lists hold ids in the order their level-0 definitions appeared.
/// Records that were referenced but never defined exist in the registry but
/// are not listed. All records are owned here and dropped together with the
/// document.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    pub header: Header,
    pub submission: Option<SubmissionId>,
    pub individuals: Vec<IndividualId>,
    pub families: Vec<FamilyId>,
    pub sources: Vec<SourceId>,
    pub submitters: Vec<SubmitterId>,
    pub repositories: Vec<RepositoryId>,
    pub media: Vec<MediaId>,
    pub notes: Vec<NoteId>,
    pub trailer: Option<Trailer>,
    registry: Registry,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Dereferences an id of any record kind.
    pub fn get<T: Entity>(&self, id: Id<T>) -> &T {
        self.registry.get(id)
    }

    pub(crate) fn get_mut<T: Entity>(&mut self, id: Id<T>) -> &mut T {
        self.registry.get_mut(id)
    }

    /// Finds a registered record by its cross-reference id, with or without
    /// the surrounding `@`.
    pub fn find<T: Entity>(&self, xref: &str) -> Option<&T> {
        self.registry.lookup(xref).map(|id| self.registry.get(id))
    }

    pub fn individual_records(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().map(|id| self.get(*id))
    }

    pub fn family_records(&self) -> impl Iterator<Item = &Family> {
        self.families.iter().map(|id| self.get(*id))
    }

    pub fn source_records(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().map(|id| self.get(*id))
    }

    pub fn note_records(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().map(|id| self.get(*id))
    }

    pub fn media_records(&self) -> impl Iterator<Item = &MediaObject> {
        self.media.iter().map(|id| self.get(*id))
    }

    pub fn submission_record(&self) -> Option<&Submission> {
        self.submission.map(|id| self.get(id))
    }

    /// Text of a note.
    pub fn note_text(&self, id: NoteId) -> &str {
        &self.get(id).text
    }

    /// Number of level-0 records of every listed kind.
    pub fn record_count(&self) -> usize {
        self.individuals.len()
            + self.families.len()
            + self.sources.len()
            + self.submitters.len()
            + self.repositories.len()
            + self.media.len()
            + self.notes.len()
            + usize::from(self.submission.is_some())
    }
}
