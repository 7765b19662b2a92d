//! GEDCOM decoding.
//!
//! Turns a GEDCOM byte stream into a [`Document`] in a single pass, with
//! memory bounded by the read window rather than by the file size.
//!
//! # Module Organization
//!
//! - [`format`]: tokenizes `LEVEL [@XREF@] TAG [VALUE]` lines
//! - [`iter`]: bounded refill loop producing lines from any `Read`
//! - [`codec`]: text continuation and date sort keys
//! - [`registry`]: maps cross-reference ids to shared records
//! - [`types`]: the document model and error type
//! - [`reader`]: the [`Decoder`] entry point
//!
//! # Architecture
//!
//! ```text
//! bytes ──► Lines ──► parser stack ──► Document
//!                      │      ▲
//!                      ▼      │
//!                   Registry (xref → shared record)
//! ```
//!
//! The parser stack interprets nesting purely from level numbers. Records
//! that can be pointed at (individuals, families, sources, notes, …) live in
//! per-kind arenas owned by the document and are linked by typed ids, so
//! the Individual ↔ Family graph has no ownership cycles.

pub mod citation;
pub mod codec;
pub mod format;
pub mod iter;
mod parser;
pub mod reader;
pub mod registry;
pub mod types;

pub use format::scanner::Line;
pub use parser::UnrecognizedTagHandler;
pub use reader::{decode_bytes, decode_str, open, DecodeOptions, Decoder};
pub use types::document::Document;
pub use types::error::{GedcomError, Result};
