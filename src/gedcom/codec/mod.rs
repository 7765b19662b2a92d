//! Pure value transformations used while decoding.
//!
//! # Submodules
//!
//! - [`text`][]: `CONC`/`CONT` continuation joining
//! - [`date`][]: chronological sort keys for date expressions

pub mod date;
pub mod text;
