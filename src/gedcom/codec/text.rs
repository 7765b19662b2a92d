//! Continuation of long text values.
//!
//! A value too long for one line is carried on by child lines: `CONC`
//! appends its value directly, `CONT` starts a new line first. Both work on
//! any text field, so the parser only needs to know which field is open.

/// How a continuation line joins onto the text before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// `CONC`: append with no separator.
    Concatenate,
    /// `CONT`: append after a newline.
    NewLine,
}

impl Join {
    /// Maps a continuation tag to its join rule.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CONC" => Some(Join::Concatenate),
            "CONT" => Some(Join::NewLine),
            _ => None,
        }
    }
}

/// Extends `text` with the value of a continuation line.
pub fn extend(text: &mut String, join: Join, value: &str) {
    if join == Join::NewLine {
        text.push('\n');
    }
    text.push_str(value);
}
