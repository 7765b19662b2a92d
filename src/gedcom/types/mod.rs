//! Foundational data structures and error types.

pub mod arena;
pub mod document;
pub mod error;
pub mod records;
pub mod structures;
