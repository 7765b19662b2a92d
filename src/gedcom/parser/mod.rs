//! Level-driven parser stack.
//!
//! The stack holds one context per open record; the top receives every
//! line. Nesting is read purely from the level numbers:
//!
//! 1. A line whose level is at or below the top context's own level closes
//!    that context (finalizing it and handing its value to the parent), and
//!    the same line is offered to the new top. One line can therefore close
//!    several contexts at once.
//! 2. Otherwise the top context looks the tag up in its table. It may change
//!    its record, attach a shared record by id, or open a child context at
//!    the line's level.
//! 3. A tag missing from the table is reported to the caller's callback and
//!    its whole subtree is skipped.
//!
//! The root context sits at the bottom, never closes, and only handles
//! level-0 lines.

mod attach;
mod node;
mod records;
mod structures;
pub mod tags;

use log::trace;

use crate::gedcom::format::scanner::Line;
use crate::gedcom::registry::is_xref;
use crate::gedcom::types::document::Document;
use crate::gedcom::types::error::{GedcomError, Result};
use crate::gedcom::types::records::{MediaId, NoteId, Source, SourceId};
use crate::gedcom::types::structures::Citation;

use node::Node;
use tags::TextField;

/// Callback receiving every line whose tag the current context does not know.
pub type UnrecognizedTagHandler<'h> = Box<dyn FnMut(&Line) + 'h>;

/// What a context decided to do with a line.
#[derive(Debug)]
enum Action {
    /// Handled in place.
    Stay,
    /// Push a child context at the line's level.
    Open(Node),
    /// Not in the table: notify and skip the subtree.
    Unrecognized,
    /// A non-zero level reached the root; there is nothing it could belong to.
    Orphan,
}

struct Frame {
    /// Level of the line that opened this context; `None` for the root.
    level: Option<u32>,
    node: Node,
}

/// One decode's worth of parser state.
pub(crate) struct Engine<'h> {
    doc: Document,
    stack: Vec<Frame>,
    on_unrecognized: Option<UnrecognizedTagHandler<'h>>,
    sort_events: bool,
}

impl<'h> Engine<'h> {
    pub fn new(on_unrecognized: Option<UnrecognizedTagHandler<'h>>, sort_events: bool) -> Self {
        Self {
            doc: Document::new(),
            stack: vec![Frame { level: None, node: Node::Root }],
            on_unrecognized,
            sort_events,
        }
    }

    /// Dispatches one line.
    pub fn feed(&mut self, line: &Line) -> Result<()> {
        while self.top()?.level.is_some_and(|level| line.level <= level) {
            self.close_top()?;
        }

        let Self { doc, stack, .. } = self;
        let top = stack.last_mut().ok_or(GedcomError::StackUnderflow)?;
        let action = step(&mut top.node, line, doc);

        match action {
            Action::Stay => {}
            Action::Open(node) => self.stack.push(Frame { level: Some(line.level), node }),
            Action::Unrecognized => {
                if let Some(callback) = self.on_unrecognized.as_mut() {
                    callback(line);
                }
                self.stack.push(Frame { level: Some(line.level), node: Node::Skip });
            }
            Action::Orphan => {
                trace!("Discarding orphan line {} {} outside any record", line.level, line.tag);
            }
        }
        Ok(())
    }

    /// Closes every open context and returns the document.
    pub fn finish(mut self) -> Result<Document> {
        while self.stack.len() > 1 {
            self.close_top()?;
        }
        Ok(self.doc)
    }

    fn top(&self) -> Result<&Frame> {
        self.stack.last().ok_or(GedcomError::StackUnderflow)
    }

    fn close_top(&mut self) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(GedcomError::StackUnderflow);
        }
        let frame = self.stack.pop().ok_or(GedcomError::StackUnderflow)?;
        if self.sort_events {
            records::finalize(&frame.node, &mut self.doc);
        }
        let parent = self.stack.last_mut().ok_or(GedcomError::StackUnderflow)?;
        attach::attach(&mut parent.node, frame.node, &mut self.doc)
    }
}

/// The dispatch table: routes a line to the handler for the context kind.
fn step(node: &mut Node, line: &Line, doc: &mut Document) -> Action {
    match node {
        Node::Root => records::root(line, doc),
        Node::Skip => Action::Stay,
        Node::Header => records::header(line, doc),
        Node::Individual(id) => records::individual(*id, line, doc),
        Node::Family(id) => records::family(*id, line, doc),
        Node::Source(id) => records::source(*id, line, doc),
        Node::Note(id) => records::note(*id, line, doc),
        Node::Media(id) => records::media(*id, line, doc),
        Node::Repository(id) => records::repository(*id, line, doc),
        Node::Submitter(id) => records::submitter(*id, line, doc),
        Node::Submission(id) => records::submission(*id, line, doc),
        Node::Name(name) => structures::name(name, line, doc),
        Node::Event(_, event) => structures::event(event, line, doc),
        Node::Citation(citation) => structures::citation(citation, line, doc),
        Node::CitationData(data) => structures::citation_data(data, line),
        Node::FamilyLink(_, link) => structures::family_link(link, line, doc),
        Node::Child(child) => structures::child(child, line),
        Node::Spouse(spouse) => structures::spouse(spouse, line),
        Node::Address(address) => structures::address(address, line),
        Node::Place(place) => structures::place(place, line, doc),
        Node::Coordinates(map) => structures::coordinates(map, line),
        Node::Change(change) => structures::change(change, line, doc),
        Node::Timestamp(stamp) => structures::timestamp(stamp, line),
        Node::SourceData(data) => structures::source_data(data, line, doc),
        Node::File(file) => structures::file(file, line, doc),
        Node::HeaderSource(source) => structures::header_source(source, line),
        Node::Corporation(corp) => structures::corporation(corp, line),
        Node::HeaderData(data) => structures::header_data(data, line),
        Node::CharacterSet(charset) => structures::character_set(charset, line),
        Node::FormatInfo(info) => structures::format_info(info, line),
        Node::Text(_, text) => structures::text(text, line),
    }
}

/// A `NOTE`-like value: `@id@` attaches the shared note, anything else
/// (including a bare `@`) starts an inline note with the value as its first
/// line of text.
fn open_note(value: &str, doc: &mut Document) -> (NoteId, Action) {
    if is_xref(value) {
        return (doc.registry_mut().resolve(value), Action::Stay);
    }
    let id: NoteId = doc.registry_mut().get_or_create("");
    doc.get_mut(id).text = value.to_string();
    (id, Action::Open(Node::Note(id)))
}

/// An `OBJE` value: `@id@` attaches the shared object, anything else starts
/// an inline one.
fn open_media(value: &str, doc: &mut Document) -> (MediaId, Action) {
    if is_xref(value) {
        return (doc.registry_mut().resolve(value), Action::Stay);
    }
    let id = doc.registry_mut().get_or_create("");
    (id, Action::Open(Node::Media(id)))
}

/// A `SOUR` citation. A value that is not a pointer describes the source
/// inline and becomes the title of an unregistered source.
fn open_citation(value: &str, doc: &mut Document) -> Action {
    let source: SourceId = if is_xref(value) {
        doc.registry_mut().resolve(value)
    } else {
        let id = doc.registry_mut().get_or_create::<Source>("");
        doc.get_mut(id).title = value.to_string();
        id
    };
    Action::Open(Node::Citation(Box::new(Citation::new(source))))
}

fn open_text(field: TextField, value: &str) -> Action {
    Action::Open(Node::Text(field, value.to_string()))
}
