//! Hands a closed substructure to the context that opened it.

use crate::gedcom::types::document::Document;
use crate::gedcom::types::error::{GedcomError, Result};
use crate::gedcom::types::records::Source;

use super::node::{EventSlot, LinkSlot, Node};
use super::tags::TextField;

pub(super) fn attach(parent: &mut Node, child: Node, doc: &mut Document) -> Result<()> {
    if child.is_detached() {
        return Ok(());
    }

    match (parent, child) {
        (Node::Header, Node::HeaderSource(source)) => doc.header.source = Some(*source),
        (Node::Header, Node::Timestamp(stamp)) => doc.header.timestamp = Some(stamp),
        (Node::Header, Node::Text(TextField::Copyright, text)) => doc.header.copyright = text,
        (Node::Header, Node::FormatInfo(info)) => doc.header.format = Some(info),
        (Node::Header, Node::CharacterSet(charset)) => doc.header.encoding = Some(charset),

        (Node::Individual(id), child) => {
            let person = doc.get_mut(*id);
            match child {
                Node::Name(name) => person.names.push(*name),
                Node::Event(EventSlot::Event, event) => person.events.push(*event),
                Node::Event(EventSlot::Attribute, event) => person.attributes.push(*event),
                Node::FamilyLink(LinkSlot::Parents, link) => person.parents.push(link),
                Node::FamilyLink(LinkSlot::Spouses, link) => person.families.push(link),
                Node::Citation(citation) => person.citations.push(*citation),
                Node::Change(change) => person.changed = Some(change),
                child => return Err(inconsistent("individual", &child)),
            }
        }

        (Node::Family(id), child) => {
            let family = doc.get_mut(*id);
            match child {
                Node::Child(link) => family.children.push(link),
                Node::Event(EventSlot::Event, event) => family.events.push(*event),
                Node::Event(EventSlot::NumberOfChildren, event) => {
                    family.number_of_children = Some(*event)
                }
                Node::Citation(citation) => family.citations.push(*citation),
                Node::Change(change) => family.changed = Some(change),
                child => return Err(inconsistent("family", &child)),
            }
        }

        (Node::Source(id), child) => {
            let source = doc.get_mut(*id);
            match child {
                Node::Text(field, text) => set_source_text(source, field, text)?,
                Node::SourceData(data) => source.event_data = Some(*data),
                Node::Change(change) => source.changed = Some(change),
                child => return Err(inconsistent("source", &child)),
            }
        }

        (Node::Note(id), Node::Citation(citation)) => doc.get_mut(*id).citations.push(*citation),
        (Node::Media(id), Node::File(file)) => doc.get_mut(*id).file = Some(file),
        (Node::Media(id), Node::Change(change)) => doc.get_mut(*id).changed = Some(change),
        (Node::Repository(id), Node::Address(address)) => {
            doc.get_mut(*id).address = Some(*address)
        }
        (Node::Repository(id), Node::Change(change)) => doc.get_mut(*id).changed = Some(change),
        (Node::Submitter(id), Node::Address(address)) => doc.get_mut(*id).address = Some(*address),
        (Node::Submitter(id), Node::Change(change)) => doc.get_mut(*id).changed = Some(change),

        (Node::Name(name), Node::Citation(citation)) => name.citations.push(*citation),

        (Node::Event(_, event), Node::Place(place)) => event.place = *place,
        (Node::Event(_, event), Node::Address(address)) => event.address = Some(*address),
        (Node::Event(_, event), Node::Citation(citation)) => event.citations.push(*citation),
        (Node::Event(_, event), Node::FamilyLink(LinkSlot::Parents, link)) => {
            event.parents.push(link)
        }
        (Node::Event(_, event), Node::Spouse(spouse)) => event.spouses.push(spouse),

        (Node::Citation(citation), Node::Text(TextField::CitationPage, text)) => {
            citation.page = text
        }
        (Node::Citation(citation), Node::CitationData(data)) => citation.data = data,
        (Node::CitationData(data), Node::Text(TextField::CitationText, text)) => {
            data.text.push(text)
        }

        (Node::Place(place), Node::Citation(citation)) => place.citations.push(*citation),
        (Node::Place(place), Node::Coordinates(map)) => {
            place.latitude = map.latitude;
            place.longitude = map.longitude;
        }

        (Node::Change(change), Node::Timestamp(stamp)) => change.stamp = Some(stamp),
        (Node::SourceData(data), Node::Event(_, event)) => data.events.push(*event),

        (Node::HeaderSource(source), Node::Corporation(corporation)) => {
            source.corporation = Some(*corporation)
        }
        (Node::HeaderSource(source), Node::HeaderData(data)) => source.data = Some(data),
        (Node::Corporation(corporation), Node::Address(address)) => {
            corporation.address = Some(*address)
        }
        (Node::HeaderData(data), Node::Text(TextField::Copyright, text)) => data.copyright = text,

        (parent, child) => return Err(inconsistent(parent.name(), &child)),
    }
    Ok(())
}

fn inconsistent(parent: &'static str, child: &Node) -> GedcomError {
    GedcomError::Inconsistent {
        parent,
        child: child.name(),
    }
}

/// Stores a closed text field of a source record. Repeatable fields gain one
/// entry per occurrence.
fn set_source_text(source: &mut Source, field: TextField, text: String) -> Result<()> {
    use TextField::*;

    match field {
        Author => source.author = text,
        Title => source.title = text,
        Abbreviation => source.abbreviation = text,
        Publication => source.publication = text,
        Text => source.text = text,
        Kind => source.kind = text,
        Periodical => source.periodical = text,
        Volume => source.volume = text,
        MediaType => source.media_type = text,
        Pages => source.pages.push(text),
        Films => source.films.push(text),
        Files => source.files.push(text),
        FileNumbers => source.file_numbers.push(text),
        Dates => source.dates.push(text),
        Places => source.places.push(text),
        DatesViewed => source.dates_viewed.push(text),
        Urls => source.urls.push(text),
        Locations => source.locations.push(text),
        Repositories => source.repositories.push(text),
        Submitters => source.submitters.push(text),
        CitationPage | CitationText | Copyright => {
            return Err(GedcomError::Inconsistent {
                parent: "source",
                child: "text",
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::types::structures::CitationData;

    #[test]
    fn mismatched_child_is_reported_not_dropped() {
        let mut doc = Document::new();
        let err = attach(&mut Node::Header, Node::CitationData(CitationData::default()), &mut doc)
            .expect_err("header cannot own citation data");
        assert!(matches!(
            err,
            GedcomError::Inconsistent { parent: "header", child: "citation data" }
        ));
    }

    #[test]
    fn repeatable_source_fields_append() {
        let mut source = Source::default();
        set_source_text(&mut source, TextField::Urls, "a".into()).expect("url");
        set_source_text(&mut source, TextField::Urls, "b".into()).expect("url");
        set_source_text(&mut source, TextField::Title, "t1".into()).expect("title");
        set_source_text(&mut source, TextField::Title, "t2".into()).expect("title");
        assert_eq!(source.urls, vec!["a", "b"]);
        assert_eq!(source.title, "t2");
    }
}
