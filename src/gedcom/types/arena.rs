//! Typed indices and the per-kind arenas that own every record.
//!
//! Records point at each other (a family names its spouses, an individual
//! names the families it belongs to) through [`Id`] values rather than
//! owning references, so the document graph has no ownership cycles. The
//! [`Document`](super::document::Document) is the sole owner of every arena.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use serde::{Serialize, Serializer};

/// Index of one record in the arena for records of kind `T`.
///
/// Two ids compare equal exactly when they designate the same shared
/// instance, which is the crate's notion of reference equality.
pub struct Id<T> {
    index: usize,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position of the record inside its arena.
    pub fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index as u64)
    }
}

/// Append-only storage for records of one kind.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, item: T) -> Id<T> {
        self.items.push(item);
        Id::new(self.items.len() - 1)
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.items.get(id.index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates every record in allocation order, including records that were
    /// only ever mentioned and never defined.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (Id::new(index), item))
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Id<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &self.items[id.index]
    }
}

impl<T> IndexMut<Id<T>> for Arena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.items[id.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_across_later_allocations() {
        let mut arena = Arena::new();
        let first = arena.alloc("a".to_string());
        let second = arena.alloc("b".to_string());
        arena[first].push('!');

        assert_ne!(first, second);
        assert_eq!(arena[first], "a!");
        assert_eq!(arena.get(second).map(String::as_str), Some("b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn iteration_pairs_each_record_with_its_id() {
        let mut arena = Arena::new();
        assert!(arena.is_empty());
        let a = arena.alloc(1u32);
        let b = arena.alloc(2u32);

        let pairs: Vec<(Id<u32>, u32)> = arena.iter().map(|(id, n)| (id, *n)).collect();
        assert_eq!(pairs, vec![(a, 1), (b, 2)]);
        assert!(!arena.is_empty());
    }
}
