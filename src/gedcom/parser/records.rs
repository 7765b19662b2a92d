//! Tag tables of the root and of the shared record contexts.
//!
//! Shared records are mutated in place through the registry, so a record
//! already filled in through earlier mentions keeps everything it had.

use log::debug;

use crate::gedcom::codec::date::sort_chronologically;
use crate::gedcom::format::scanner::Line;
use crate::gedcom::registry::Entity;
use crate::gedcom::types::arena::Id;
use crate::gedcom::types::document::Document;
use crate::gedcom::types::records::*;
use crate::gedcom::types::structures::*;

use super::node::{EventSlot, LinkSlot, Node};
use super::structures::{extend, open_address, open_event, open_family_link, open_timestamp};
use super::tags::{self, TextField};
use super::{open_citation, open_media, open_note, open_text, Action};

/// Creates or resumes the record defined on a level-0 line.
fn define<T: Entity>(line: &Line, doc: &mut Document) -> Id<T> {
    let id = doc.registry_mut().get_or_create(&line.xref);
    debug!("Opening {} @{}@", T::KIND, line.xref);
    id
}

pub(super) fn root(line: &Line, doc: &mut Document) -> Action {
    if line.level != 0 {
        return Action::Orphan;
    }
    let node = match line.tag.as_str() {
        "HEAD" => Node::Header,
        "INDI" => {
            let id = define(line, doc);
            doc.individuals.push(id);
            Node::Individual(id)
        }
        "FAM" => {
            let id = define(line, doc);
            doc.families.push(id);
            Node::Family(id)
        }
        "SOUR" => {
            let id = define(line, doc);
            doc.sources.push(id);
            Node::Source(id)
        }
        "NOTE" => {
            let id = define::<Note>(line, doc);
            doc.get_mut(id).text = line.value.clone();
            doc.notes.push(id);
            Node::Note(id)
        }
        "OBJE" => {
            let id = define(line, doc);
            doc.media.push(id);
            Node::Media(id)
        }
        "REPO" => {
            let id = define(line, doc);
            doc.repositories.push(id);
            Node::Repository(id)
        }
        "SUBM" => {
            let id = define(line, doc);
            doc.submitters.push(id);
            Node::Submitter(id)
        }
        "SUBN" => {
            let id = define(line, doc);
            doc.submission = Some(id);
            Node::Submission(id)
        }
        "TRLR" => {
            doc.trailer = Some(Trailer);
            return Action::Stay;
        }
        _ => return Action::Unrecognized,
    };
    Action::Open(node)
}

pub(super) fn header(line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    let node = match line.tag.as_str() {
        "SOUR" => {
            let source = HeaderSource {
                system_id: value.to_string(),
                ..HeaderSource::default()
            };
            Node::HeaderSource(Box::new(source))
        }
        "DATE" => return open_timestamp(value),
        "COPR" => return open_text(TextField::Copyright, value),
        "GEDC" => Node::FormatInfo(FormatInfo::default()),
        "CHAR" => {
            let charset = CharacterSet {
                name: value.to_string(),
                version: String::new(),
            };
            Node::CharacterSet(charset)
        }
        "NOTE" => {
            let (id, action) = open_note(value, doc);
            doc.header.note = Some(id);
            return action;
        }
        "SUBM" => {
            let submitter = doc.registry_mut().resolve(value);
            doc.header.submitter = Some(submitter);
            return Action::Stay;
        }
        "SUBN" => {
            let submission = doc.registry_mut().resolve(value);
            doc.header.submission = Some(submission);
            return Action::Stay;
        }
        "DEST" => {
            doc.header.destination = value.to_string();
            return Action::Stay;
        }
        "FILE" => {
            doc.header.file = value.to_string();
            return Action::Stay;
        }
        "LANG" => {
            doc.header.language = value.to_string();
            return Action::Stay;
        }
        _ => return Action::Unrecognized,
    };
    Action::Open(node)
}

pub(super) fn individual(id: IndividualId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    let tag = line.tag.as_str();
    match tag {
        "NAME" => Action::Open(Node::Name(Box::new(PersonalName::new(value)))),
        "SEX" => {
            doc.get_mut(id).sex = value.to_string();
            Action::Stay
        }
        _ if tags::is_individual_event(tag) => open_event(EventSlot::Event, line),
        _ if tags::is_individual_attribute(tag) => open_event(EventSlot::Attribute, line),
        "FAMC" => open_family_link(LinkSlot::Parents, value, doc),
        "FAMS" => open_family_link(LinkSlot::Spouses, value, doc),
        "SOUR" => open_citation(value, doc),
        "_PHOTO" => {
            let photo = doc.registry_mut().resolve(value);
            doc.get_mut(id).photo = Some(photo);
            Action::Stay
        }
        "OBJE" => {
            let (media, action) = open_media(value, doc);
            doc.get_mut(id).media.push(media);
            action
        }
        "NOTE" => {
            let (note, action) = open_note(value, doc);
            doc.get_mut(id).notes.push(note);
            action
        }
        "CHAN" => Action::Open(Node::Change(ChangeStamp::default())),
        _ => Action::Unrecognized,
    }
}

pub(super) fn family(id: FamilyId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    let tag = line.tag.as_str();
    match tag {
        "HUSB" => {
            let husband = doc.registry_mut().resolve(value);
            doc.get_mut(id).husband = Some(husband);
            Action::Stay
        }
        "WIFE" => {
            let wife = doc.registry_mut().resolve(value);
            doc.get_mut(id).wife = Some(wife);
            Action::Stay
        }
        "CHIL" => {
            let child = doc.registry_mut().resolve(value);
            Action::Open(Node::Child(ChildLink::new(child)))
        }
        _ if tags::is_family_event(tag) => open_event(EventSlot::Event, line),
        "NCHI" => open_event(EventSlot::NumberOfChildren, line),
        "SOUR" => open_citation(value, doc),
        "OBJE" => {
            let (media, action) = open_media(value, doc);
            doc.get_mut(id).media.push(media);
            action
        }
        "NOTE" => {
            let (note, action) = open_note(value, doc);
            doc.get_mut(id).notes.push(note);
            action
        }
        "CHAN" => Action::Open(Node::Change(ChangeStamp::default())),
        _ => Action::Unrecognized,
    }
}

pub(super) fn source(id: SourceId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    if let Some(field) = TextField::for_source_tag(&line.tag) {
        return open_text(field, value);
    }
    match line.tag.as_str() {
        "DATA" => Action::Open(Node::SourceData(Box::default())),
        "NOTE" => {
            let (note, action) = open_note(value, doc);
            doc.get_mut(id).notes.push(note);
            action
        }
        "OBJE" => {
            let (media, action) = open_media(value, doc);
            doc.get_mut(id).media.push(media);
            action
        }
        "CHAN" => Action::Open(Node::Change(ChangeStamp::default())),
        _ => Action::Unrecognized,
    }
}

pub(super) fn note(id: NoteId, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "CONC" | "CONT" => {
            extend(&mut doc.get_mut(id).text, line);
            Action::Stay
        }
        "SOUR" => open_citation(&line.value, doc),
        _ => Action::Unrecognized,
    }
}

pub(super) fn media(id: MediaId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    match line.tag.as_str() {
        "FILE" => {
            let file = FileRef {
                name: value.to_string(),
                ..FileRef::default()
            };
            Action::Open(Node::File(file))
        }
        "FORM" => {
            doc.get_mut(id).form = value.to_string();
            Action::Stay
        }
        "TITL" => {
            doc.get_mut(id).title = value.to_string();
            Action::Stay
        }
        "NOTE" => {
            let (note, action) = open_note(value, doc);
            doc.get_mut(id).notes.push(note);
            action
        }
        "CHAN" => Action::Open(Node::Change(ChangeStamp::default())),
        _ => Action::Unrecognized,
    }
}

pub(super) fn repository(id: RepositoryId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.clone();
    match line.tag.as_str() {
        "NAME" => doc.get_mut(id).name = value,
        "ADDR" => return open_address(&value),
        "PHON" => doc.get_mut(id).phone.push(value),
        "EMAIL" => doc.get_mut(id).email.push(value),
        "WWW" => doc.get_mut(id).web.push(value),
        "NOTE" => {
            let (note, action) = open_note(&value, doc);
            doc.get_mut(id).notes.push(note);
            return action;
        }
        "CHAN" => return Action::Open(Node::Change(ChangeStamp::default())),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn submitter(id: SubmitterId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.clone();
    match line.tag.as_str() {
        "NAME" => doc.get_mut(id).name = value,
        "LANG" => doc.get_mut(id).language = value,
        "ADDR" => return open_address(&value),
        "PHON" => doc.get_mut(id).phone.push(value),
        "EMAIL" => doc.get_mut(id).email.push(value),
        "CHAN" => return Action::Open(Node::Change(ChangeStamp::default())),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn submission(id: SubmissionId, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    if line.tag == "SUBM" {
        let submitter = doc.registry_mut().resolve(value);
        doc.get_mut(id).submitter = Some(submitter);
        return Action::Stay;
    }
    let record = doc.get_mut(id);
    match line.tag.as_str() {
        "FAMF" => record.family_file = value.to_string(),
        "TEMP" => record.temple_code = value.to_string(),
        "ANCE" => record.ancestors = value.to_string(),
        "DESC" => record.descendants = value.to_string(),
        "ORDI" => record.ordinance = value.to_string(),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

/// Close-time hook: restores chronological order of dated collections.
pub(super) fn finalize(node: &Node, doc: &mut Document) {
    match node {
        Node::Individual(id) => {
            let person = doc.get_mut(*id);
            sort_chronologically(&mut person.events);
            sort_chronologically(&mut person.attributes);
        }
        Node::Family(id) => sort_chronologically(&mut doc.get_mut(*id).events),
        _ => {}
    }
}
