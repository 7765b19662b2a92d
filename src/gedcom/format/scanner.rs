//! Line scanner.
//!
//! Splits a byte window into GEDCOM lines. Knows nothing about tags beyond
//! their lexical shape.
//!
//! # Line Structure
//! ```text
//! LEVEL [@XREF@] TAG [VALUE]<CR>?<LF>
//!   0   @I1@     INDI
//!   1            NAME  John /Doe/
//! ```
//!
//! The scanner never guesses at a line that runs past the end of its
//! window: it reports [`Scan::NeedMore`] and the caller refills. Only once
//! the caller says the input is exhausted does an unterminated tail count as
//! a final line.

use serde::Serialize;

/// UTF-8 byte-order mark, accepted once at the start of the stream.
const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One decoded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub level: u32,
    pub tag: String,
    pub value: String,
    /// The cross-reference id this line defines, without delimiters.
    pub xref: String,
}

impl Line {
    pub fn new(level: u32, tag: &str, value: &str, xref: &str) -> Self {
        Self {
            level,
            tag: tag.to_string(),
            value: value.to_string(),
            xref: xref.to_string(),
        }
    }
}

/// Why a line could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// No decimal level number at the start of the line.
    Level,
    /// An `@` opened a cross-reference id that was never closed, or was
    /// followed directly by the tag.
    Xref,
    /// Nothing after the level (and xref).
    Tag,
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Malformed::Level => write!(f, "missing or invalid level number"),
            Malformed::Xref => write!(f, "unterminated cross-reference id"),
            Malformed::Tag => write!(f, "missing tag"),
        }
    }
}

/// Outcome of one scan over a window.
#[derive(Debug, PartialEq, Eq)]
pub enum Scan {
    /// A complete line and the number of bytes it occupied.
    Line { line: Line, consumed: usize },
    /// An empty or whitespace-only line.
    Blank { consumed: usize },
    /// A line that could not be tokenized; skip `consumed` bytes and go on.
    Malformed { consumed: usize, reason: Malformed },
    /// The window ends inside a line.
    NeedMore,
    /// The input is exhausted.
    End,
}

/// Stateful only in remembering whether the byte-order mark check is done.
#[derive(Debug, Default)]
pub struct Scanner {
    started: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the next line from `window`.
    ///
    /// `at_eof` tells the scanner no bytes will follow the window.
    pub fn scan(&mut self, window: &[u8], at_eof: bool) -> Scan {
        let mut offset = 0;
        if !self.started {
            if window.len() < BOM.len() && BOM.starts_with(window) && !at_eof {
                return Scan::NeedMore;
            }
            if window.starts_with(BOM) {
                offset = BOM.len();
            }
        }

        let rest = &window[offset..];
        let (raw, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], offset + end + 1),
            None if !at_eof => return Scan::NeedMore,
            None if rest.is_empty() => return Scan::End,
            None => (rest, window.len()),
        };
        // The mark is only behind us once the line carrying it is consumed.
        self.started = true;

        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Scan::Blank { consumed };
        }

        match tokenize(raw) {
            Ok(line) => Scan::Line { line, consumed },
            Err(reason) => Scan::Malformed { consumed, reason },
        }
    }

    /// Finds the end of the line a window starts inside, for skipping an
    /// over-long line. Returns the number of bytes up to and including the
    /// newline.
    pub fn skip_line(window: &[u8]) -> Option<usize> {
        window.iter().position(|&b| b == b'\n').map(|i| i + 1)
    }
}

fn tokenize(raw: &[u8]) -> Result<Line, Malformed> {
    let mut rest = trim_start(raw);

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return Err(Malformed::Level);
    }
    let level = std::str::from_utf8(&rest[..digits])
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or(Malformed::Level)?;
    rest = &rest[digits..];
    if !rest.first().is_some_and(u8::is_ascii_whitespace) {
        return Err(if rest.is_empty() { Malformed::Tag } else { Malformed::Level });
    }
    rest = trim_start(rest);

    let mut xref: &[u8] = &[];
    if rest.first() == Some(&b'@') {
        let close = rest[1..]
            .iter()
            .position(|&b| b == b'@')
            .ok_or(Malformed::Xref)?;
        xref = &rest[1..close + 1];
        rest = &rest[close + 2..];
        if !rest.first().is_some_and(u8::is_ascii_whitespace) {
            return Err(if rest.is_empty() { Malformed::Tag } else { Malformed::Xref });
        }
        rest = trim_start(rest);
    }

    let tag_len = rest.iter().take_while(|b| !b.is_ascii_whitespace()).count();
    if tag_len == 0 {
        return Err(Malformed::Tag);
    }
    let tag = &rest[..tag_len];
    let value = trim_start(&rest[tag_len..]);

    Ok(Line {
        level,
        tag: String::from_utf8_lossy(tag).into_owned(),
        value: String::from_utf8_lossy(value).into_owned(),
        xref: String::from_utf8_lossy(xref).into_owned(),
    })
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[n..]
}
