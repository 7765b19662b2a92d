//! Custom error types for the gedcom-reader crate.
//!
//! Only two kinds of condition ever surface as an error: the byte source
//! failing, and the parser stack detecting that its own tag tables are
//! inconsistent. Malformed lines, unknown tags and unparseable dates are
//! recovered from inside the decode and never reach this type.

use thiserror::Error;

use super::document::Document;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum GedcomError {
    /// The byte source could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A read failed part-way through the stream.
    ///
    /// `partial` holds everything decoded before the failure, with every
    /// open record closed and finalized.
    #[error("Input truncated after {lines} lines: {source}")]
    Truncated {
        #[source]
        source: std::io::Error,
        partial: Box<Document>,
        lines: usize,
    },

    /// A context tried to close while only the root context remained.
    #[error("Parser stack underflow: attempted to close the root context")]
    StackUnderflow,

    /// A closed child context produced a value its parent has no place for.
    #[error("Parser tables are inconsistent: {parent} context cannot hold a {child}")]
    Inconsistent {
        parent: &'static str,
        child: &'static str,
    },
}

impl GedcomError {
    /// Returns `true` for failures of the byte source, which the caller may
    /// recover from, as opposed to internal consistency violations.
    pub fn is_io(&self) -> bool {
        matches!(self, GedcomError::Io(_) | GedcomError::Truncated { .. })
    }

    /// Takes the partially decoded document out of a truncated decode.
    pub fn into_partial(self) -> Option<Document> {
        match self {
            GedcomError::Truncated { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}

/// A convenience `Result` type alias using the crate's `GedcomError` type.
pub type Result<T> = std::result::Result<T, GedcomError>;
