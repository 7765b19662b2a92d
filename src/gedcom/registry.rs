//! Cross-reference registry.
//!
//! Maps xref identifiers to shared record instances. The first mention of an
//! id, whether it is the record's own definition line or a pointer from some
//! other record, creates the instance; every later mention resolves to that
//! same instance. This is what lets a family point at an individual that is
//! only defined further down the file.
//!
//! There is one arena and one id table per record kind, so every call site
//! gets back an id of the type it expects. Ids are meant to be unique across
//! the whole file; reusing one for a different kind of record is tolerated
//! (each kind then gets its own instance) and logged.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use super::types::arena::{Arena, Id};
use super::types::records::*;

/// Delimiter surrounding a cross-reference identifier.
pub const XREF_DELIMITER: char = '@';

/// Returns `true` when a line value is written in cross-reference form and
/// names an id. A bare `@` or `@@` names nothing.
pub fn is_xref(value: &str) -> bool {
    value.starts_with(XREF_DELIMITER) && !strip_xref(value).is_empty()
}

/// Strips the surrounding delimiters from a cross-reference value.
pub fn strip_xref(value: &str) -> &str {
    value.trim_matches(XREF_DELIMITER)
}

/// Arena plus id table for one record kind.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Slots<T> {
    arena: Arena<T>,
    #[serde(skip)]
    by_xref: HashMap<String, Id<T>>,
}

impl<T> Slots<T> {
    fn new() -> Self {
        Self {
            arena: Arena::new(),
            by_xref: HashMap::new(),
        }
    }

    pub fn arena(&self) -> &Arena<T> {
        &self.arena
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A record kind that can be the target of a cross-reference.
pub trait Entity: Default {
    /// A short name used for logging and diagnostics.
    const KIND: &'static str;

    fn slots(registry: &Registry) -> &Slots<Self>;
    fn slots_mut(registry: &mut Registry) -> &mut Slots<Self>;
    fn set_xref(&mut self, xref: &str);
}

macro_rules! entity {
    ($ty:ty, $field:ident, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn slots(registry: &Registry) -> &Slots<Self> {
                &registry.$field
            }

            fn slots_mut(registry: &mut Registry) -> &mut Slots<Self> {
                &mut registry.$field
            }

            fn set_xref(&mut self, xref: &str) {
                self.xref = xref.to_string();
            }
        }
    };
}

entity!(Individual, individuals, "individual");
entity!(Family, families, "family");
entity!(Source, sources, "source");
entity!(Note, notes, "note");
entity!(MediaObject, media, "media object");
entity!(Repository, repositories, "repository");
entity!(Submitter, submitters, "submitter");
entity!(Submission, submissions, "submission");

/// Owner of every shared record created during one decode.
#[derive(Debug, Default, Serialize)]
pub struct Registry {
    individuals: Slots<Individual>,
    families: Slots<Family>,
    sources: Slots<Source>,
    notes: Slots<Note>,
    media: Slots<MediaObject>,
    repositories: Slots<Repository>,
    submitters: Slots<Submitter>,
    submissions: Slots<Submission>,
    /// Kind under which each id was first seen.
    #[serde(skip)]
    kinds: HashMap<String, &'static str>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `xref` to its shared instance, creating and registering it on
    /// first mention.
    ///
    /// An empty `xref` always yields a fresh, unregistered instance; this is
    /// how inline records are created.
    pub fn get_or_create<T: Entity>(&mut self, xref: &str) -> Id<T> {
        if xref.is_empty() {
            return T::slots_mut(self).arena.alloc(T::default());
        }
        if let Some(id) = T::slots(self).by_xref.get(xref) {
            return *id;
        }

        match self.kinds.get(xref) {
            Some(first) if *first != T::KIND => {
                debug!(
                    "Cross-reference @{}@ first seen as {}, now used as {}",
                    xref,
                    first,
                    T::KIND
                );
            }
            Some(_) => {}
            None => {
                self.kinds.insert(xref.to_string(), T::KIND);
            }
        }

        let mut record = T::default();
        record.set_xref(xref);
        let slots = T::slots_mut(self);
        let id = slots.arena.alloc(record);
        slots.by_xref.insert(xref.to_string(), id);
        id
    }

    /// Like [`get_or_create`](Self::get_or_create), but takes a line value in
    /// `@id@` form.
    pub fn resolve<T: Entity>(&mut self, value: &str) -> Id<T> {
        self.get_or_create(strip_xref(value))
    }

    /// Looks up a registered id without creating anything.
    pub fn lookup<T: Entity>(&self, xref: &str) -> Option<Id<T>> {
        T::slots(self).by_xref.get(strip_xref(xref)).copied()
    }

    pub fn get<T: Entity>(&self, id: Id<T>) -> &T {
        &T::slots(self).arena[id]
    }

    pub fn get_mut<T: Entity>(&mut self, id: Id<T>) -> &mut T {
        &mut T::slots_mut(self).arena[id]
    }

    /// Every instance of kind `T`, registered or inline.
    pub fn arena<T: Entity>(&self) -> &Arena<T> {
        T::slots(self).arena()
    }

    /// Number of registered ids of kind `T`.
    pub fn registered<T: Entity>(&self) -> usize {
        T::slots(self).by_xref.len()
    }
}
