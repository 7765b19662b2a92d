//! Tag tables of the substructure contexts.
//!
//! Each handler edits the value its context owns. Values opened here are
//! handed back to the enclosing context by [`attach`](super::attach) once
//! they close.

use crate::gedcom::codec::date::SortKey;
use crate::gedcom::codec::text::{self, Join};
use crate::gedcom::format::scanner::Line;
use crate::gedcom::types::document::Document;
use crate::gedcom::types::structures::*;

use super::node::{EventSlot, LinkSlot, Node};
use super::tags::{TextField, EVENTS_WITH_PARENTS};
use super::{open_citation, open_media, open_note, open_text, Action};

pub(super) fn name(name: &mut PersonalName, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    match line.tag.as_str() {
        "NPFX" => name.prefix = value.to_string(),
        "GIVN" => name.given = value.to_string(),
        "NICK" => name.nickname = value.to_string(),
        "SPFX" => name.surname_prefix = value.to_string(),
        "SURN" => name.surname = value.to_string(),
        "NSFX" => name.suffix = value.to_string(),
        "TYPE" => name.kind = value.to_string(),
        "SOUR" => return open_citation(value, doc),
        "NOTE" => {
            let (id, action) = open_note(value, doc);
            name.notes.push(id);
            return action;
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn event(event: &mut Event, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    match line.tag.as_str() {
        "TYPE" => event.kind = value.to_string(),
        "DATE" => {
            event.date = value.to_string();
            event.sort_key = SortKey::from_date_text(value);
        }
        "PLAC" => {
            let place = Place {
                name: value.to_string(),
                ..Place::default()
            };
            return Action::Open(Node::Place(Box::new(place)));
        }
        "ADDR" => return open_address(value),
        "AGE" => event.age = value.to_string(),
        "AGNC" => event.agency = value.to_string(),
        "CAUS" => {
            let (id, action) = open_note(value, doc);
            event.cause.push(id);
            return action;
        }
        "SOUR" => return open_citation(value, doc),
        "NOTE" => {
            let (id, action) = open_note(value, doc);
            event.notes.push(id);
            return action;
        }
        "OBJE" => {
            let (id, action) = open_media(value, doc);
            event.media.push(id);
            return action;
        }
        "FAMC" if EVENTS_WITH_PARENTS.contains(&event.tag.as_str()) => {
            return open_family_link(LinkSlot::Parents, value, doc);
        }
        "HUSB" | "WIFE" => {
            let spouse = SpouseInfo {
                role: line.tag.clone(),
                age: String::new(),
            };
            return Action::Open(Node::Spouse(spouse));
        }
        "CONC" | "CONT" => {
            extend(&mut event.value, line);
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn citation(citation: &mut Citation, line: &Line, doc: &mut Document) -> Action {
    let value = line.value.as_str();
    match line.tag.as_str() {
        "PAGE" => return open_text(TextField::CitationPage, value),
        "QUAY" => citation.quality = value.to_string(),
        "DATA" => return Action::Open(Node::CitationData(CitationData::default())),
        "NOTE" => {
            let (id, action) = open_note(value, doc);
            citation.notes.push(id);
            return action;
        }
        "OBJE" => {
            let (id, action) = open_media(value, doc);
            citation.media.push(id);
            return action;
        }
        // Continues the description of an inline source.
        "CONC" | "CONT" => {
            let source = doc.get_mut(citation.source);
            if !source.xref.is_empty() {
                return Action::Unrecognized;
            }
            extend(&mut source.title, line);
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn citation_data(data: &mut CitationData, line: &Line) -> Action {
    match line.tag.as_str() {
        "DATE" => data.date = line.value.clone(),
        "TEXT" => return open_text(TextField::CitationText, &line.value),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn family_link(link: &mut FamilyLink, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "PEDI" => link.pedigree = line.value.clone(),
        "ADOP" => link.adopted_by = line.value.clone(),
        "NOTE" => {
            let (id, action) = open_note(&line.value, doc);
            link.notes.push(id);
            return action;
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn child(child: &mut ChildLink, line: &Line) -> Action {
    match line.tag.as_str() {
        "_FREL" => child.father_relation = line.value.clone(),
        "_MREL" => child.mother_relation = line.value.clone(),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn spouse(spouse: &mut SpouseInfo, line: &Line) -> Action {
    match line.tag.as_str() {
        "AGE" => spouse.age = line.value.clone(),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn address(address: &mut Address, line: &Line) -> Action {
    let value = line.value.clone();
    match line.tag.as_str() {
        "CONC" | "CONT" => {
            extend(&mut address.full, line);
        }
        "ADR1" => address.line1 = value,
        "ADR2" => address.line2 = value,
        "ADR3" => address.line3 = value,
        "CITY" => address.city = value,
        "STAE" => address.state = value,
        "POST" => address.postal_code = value,
        "CTRY" => address.country = value,
        "PHON" => address.phone = value,
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn place(place: &mut Place, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "SOUR" => open_citation(&line.value, doc),
        "NOTE" => {
            let (id, action) = open_note(&line.value, doc);
            place.notes.push(id);
            action
        }
        "MAP" => Action::Open(Node::Coordinates(Coordinates::default())),
        _ => Action::Unrecognized,
    }
}

pub(super) fn coordinates(map: &mut Coordinates, line: &Line) -> Action {
    match line.tag.as_str() {
        "LATI" => map.latitude = line.value.clone(),
        "LONG" => map.longitude = line.value.clone(),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn change(change: &mut ChangeStamp, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "DATE" => open_timestamp(&line.value),
        "NOTE" => {
            let (id, action) = open_note(&line.value, doc);
            change.notes.push(id);
            action
        }
        _ => Action::Unrecognized,
    }
}

pub(super) fn timestamp(stamp: &mut Timestamp, line: &Line) -> Action {
    match line.tag.as_str() {
        "TIME" => {
            stamp.time = line.value.clone();
            Action::Stay
        }
        _ => Action::Unrecognized,
    }
}

pub(super) fn source_data(data: &mut SourceData, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "AGNC" => {
            data.agency = line.value.clone();
            Action::Stay
        }
        "EVEN" => open_event(EventSlot::Event, line),
        "NOTE" => {
            let (id, action) = open_note(&line.value, doc);
            data.notes.push(id);
            action
        }
        _ => Action::Unrecognized,
    }
}

pub(super) fn file(file: &mut FileRef, line: &Line, doc: &mut Document) -> Action {
    match line.tag.as_str() {
        "TITL" => file.title = line.value.clone(),
        "FORM" => file.form = line.value.clone(),
        "_TEXT" => {
            let (id, action) = open_note(&line.value, doc);
            file.description = Some(id);
            return action;
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn header_source(source: &mut HeaderSource, line: &Line) -> Action {
    let value = line.value.as_str();
    match line.tag.as_str() {
        "VERS" => source.version = value.to_string(),
        "NAME" => source.name = value.to_string(),
        "FORM" => source.form = value.to_string(),
        "CORP" => {
            let corporation = Corporation {
                name: value.to_string(),
                ..Corporation::default()
            };
            return Action::Open(Node::Corporation(Box::new(corporation)));
        }
        "DATA" => {
            let data = HeaderData {
                name: value.to_string(),
                ..HeaderData::default()
            };
            return Action::Open(Node::HeaderData(data));
        }
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn corporation(corporation: &mut Corporation, line: &Line) -> Action {
    match line.tag.as_str() {
        "ADDR" => return open_address(&line.value),
        "PHON" => corporation.phone.push(line.value.clone()),
        "EMAIL" => corporation.email.push(line.value.clone()),
        "WWW" => corporation.web.push(line.value.clone()),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

pub(super) fn header_data(data: &mut HeaderData, line: &Line) -> Action {
    match line.tag.as_str() {
        "DATE" => {
            data.date = line.value.clone();
            Action::Stay
        }
        "COPR" => open_text(TextField::Copyright, &line.value),
        _ => Action::Unrecognized,
    }
}

pub(super) fn character_set(charset: &mut CharacterSet, line: &Line) -> Action {
    match line.tag.as_str() {
        "VERS" => {
            charset.version = line.value.clone();
            Action::Stay
        }
        _ => Action::Unrecognized,
    }
}

pub(super) fn format_info(info: &mut FormatInfo, line: &Line) -> Action {
    match line.tag.as_str() {
        "VERS" => info.version = line.value.clone(),
        "FORM" => info.form = line.value.clone(),
        _ => return Action::Unrecognized,
    }
    Action::Stay
}

/// A text field only takes continuation lines.
pub(super) fn text(value: &mut String, line: &Line) -> Action {
    if extend(value, line) {
        Action::Stay
    } else {
        Action::Unrecognized
    }
}

/// Applies a `CONC`/`CONT` line to `target`. Returns `false` for any other tag.
pub(super) fn extend(target: &mut String, line: &Line) -> bool {
    match Join::from_tag(&line.tag) {
        Some(join) => {
            text::extend(target, join, &line.value);
            true
        }
        None => false,
    }
}

pub(super) fn open_event(slot: EventSlot, line: &Line) -> Action {
    Action::Open(Node::Event(slot, Box::new(Event::new(&line.tag, &line.value))))
}

pub(super) fn open_address(value: &str) -> Action {
    let address = Address {
        full: value.to_string(),
        ..Address::default()
    };
    Action::Open(Node::Address(Box::new(address)))
}

pub(super) fn open_timestamp(value: &str) -> Action {
    let stamp = Timestamp {
        date: value.to_string(),
        time: String::new(),
    };
    Action::Open(Node::Timestamp(stamp))
}

pub(super) fn open_family_link(slot: LinkSlot, value: &str, doc: &mut Document) -> Action {
    let family = doc.registry_mut().resolve(value);
    Action::Open(Node::FamilyLink(slot, FamilyLink::new(family)))
}
