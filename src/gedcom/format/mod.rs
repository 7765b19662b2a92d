//! Lexical layer: bytes in, lines out.
//!
//! # Module Organization
//!
//! - [`scanner`]: tokenizes one line out of a byte window
//!
//! The refill loop that feeds the scanner from a reader lives in
//! [`iter`](crate::gedcom::iter).

pub mod scanner;
