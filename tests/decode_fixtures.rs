use gedcom_reader::{
    decode_str, open, DecodeOptions, Decoder, Document, Family, Individual, Line, MediaObject,
    Note, Repository, Source,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn decode_fixture(name: &str) -> (Document, Vec<Line>) {
    let file = std::fs::File::open(fixture(name))
        .unwrap_or_else(|e| panic!("cannot open fixture {name}: {e}"));
    let mut unrecognized = Vec::new();
    let doc = Decoder::new(file)
        .on_unrecognized_tag(|line| unrecognized.push(line.clone()))
        .decode()
        .unwrap_or_else(|e| panic!("decoding {name} failed: {e}"));
    (doc, unrecognized)
}

fn event_tags(events: &[gedcom_reader::Event]) -> Vec<&str> {
    events.iter().map(|e| e.tag.as_str()).collect()
}

#[test]
fn minimal_document_has_header_source_and_empty_collections() {
    let doc = open(fixture("minimal.ged")).expect("minimal.ged should decode");

    let source = doc.header.source.as_ref().expect("header source");
    assert_eq!(source.system_id, "X");
    assert!(doc.individuals.is_empty());
    assert!(doc.families.is_empty());
    assert!(doc.sources.is_empty());
    assert!(doc.submitters.is_empty());
    assert!(doc.repositories.is_empty());
    assert!(doc.media.is_empty());
    assert!(doc.notes.is_empty());
    assert!(doc.submission.is_none());
    assert!(doc.trailer.is_some(), "TRLR should set the trailer marker");
}

#[test]
fn record_collections_follow_definition_order() {
    let (doc, _) = decode_fixture("family.ged");

    let xrefs: Vec<&str> = doc.individual_records().map(|p| p.xref.as_str()).collect();
    assert_eq!(xrefs, vec!["I1", "I2", "I3"]);
    assert_eq!(doc.families.len(), 1);
    assert_eq!(doc.sources.len(), 1);
    assert_eq!(doc.notes.len(), 2, "only level-0 notes are listed");
    assert_eq!(doc.media.len(), 1);
    assert_eq!(doc.repositories.len(), 1);
    assert_eq!(doc.submitters.len(), 1);
    assert_eq!(doc.record_count(), 10);
}

#[test]
fn header_fields_are_decoded() {
    let (doc, _) = decode_fixture("family.ged");
    let header = &doc.header;

    let source = header.source.as_ref().expect("header source");
    assert_eq!(source.system_id, "FTW");
    assert_eq!(source.version, "5.0");
    assert_eq!(source.name, "Family Tree Writer");
    let corp = source.corporation.as_ref().expect("corporation");
    assert_eq!(corp.name, "Acme Software");
    assert_eq!(corp.phone, vec!["555-0100"]);
    let address = corp.address.as_ref().expect("corporation address");
    assert_eq!(address.full, "12 High Street\nSpringfield");

    assert_eq!(header.destination, "GEDCOM");
    let stamp = header.timestamp.as_ref().expect("timestamp");
    assert_eq!(stamp.date, "14 OCT 2026");
    assert_eq!(stamp.time, "10:30:00");
    assert_eq!(header.file, "family.ged");
    assert_eq!(header.copyright, "Copyright 2026 The Doe Family");
    let format = header.format.as_ref().expect("GEDC");
    assert_eq!(format.version, "5.5.1");
    assert_eq!(format.form, "LINEAGE-LINKED");
    assert_eq!(header.encoding.as_ref().map(|c| c.name.as_str()), Some("UTF-8"));
    assert_eq!(header.language, "English");

    let submitter = header.submitter.expect("header submitter");
    assert_eq!(doc.get(submitter).name, "Jane Researcher");
    assert_eq!(Some(submitter), doc.submitters.first().copied());
}

#[test]
fn forward_and_backward_references_share_one_instance() {
    let (doc, _) = decode_fixture("family.ged");
    let registry = doc.registry();

    let i1 = registry.lookup::<Individual>("I1").expect("I1 registered");
    let i3 = registry.lookup::<Individual>("I3").expect("I3 registered");
    let f1 = registry.lookup::<Family>("F1").expect("F1 registered");

    let family = doc.get(f1);
    assert_eq!(family.husband, Some(i1));
    assert_eq!(family.children.len(), 1);
    assert_eq!(family.children[0].person, i3, "CHIL must point at the later-defined I3");
    assert_eq!(family.children[0].father_relation, "Natural");
    assert_eq!(family.children[0].mother_relation, "Adopted");

    let john = doc.get(i1);
    assert_eq!(john.families.len(), 1);
    assert_eq!(john.families[0].family, f1, "FAMS before FAM definition must resolve to F1");

    let tom = doc.get(i3);
    assert_eq!(tom.parents.len(), 1);
    assert_eq!(tom.parents[0].family, f1);
    assert_eq!(tom.parents[0].pedigree, "birth");

    assert_eq!(registry.arena::<Individual>().len(), 3, "no duplicate individuals");
    assert_eq!(registry.arena::<Family>().len(), 1, "no duplicate families");
}

#[test]
fn individual_fields_and_substructures() {
    let (doc, _) = decode_fixture("family.ged");
    let john: &Individual = doc.find("@I1@").expect("I1");

    assert_eq!(john.primary_name(), Some("John /Doe/"));
    assert_eq!(john.names[0].given, "John");
    assert_eq!(john.names[0].surname, "Doe");
    assert_eq!(john.sex, "M");

    let death = john.events.iter().find(|e| e.tag == "DEAT").expect("death");
    assert_eq!(death.date, "5 MAR 1950");
    assert_eq!(death.place.name, "Boston, Massachusetts");
    assert_eq!(death.place.latitude, "N42.36");
    assert_eq!(death.place.longitude, "W71.06");
    assert_eq!(death.cause.len(), 1);
    assert_eq!(doc.note_text(death.cause[0]), "Pneumonia", "cause note referenced before definition");

    let birth = john.events.iter().find(|e| e.tag == "BIRT").expect("birth");
    assert_eq!(birth.citations.len(), 1);
    let citation = &birth.citations[0];
    assert_eq!(citation.page, "p. 123");
    assert_eq!(citation.quality, "2");
    assert_eq!(doc.get(citation.source).xref, "S1");

    let occupation = john.attributes.iter().find(|e| e.tag == "OCCU").expect("occupation");
    assert_eq!(occupation.value, "Blacksmith");

    assert_eq!(john.notes.len(), 2);
    assert_eq!(doc.note_text(john.notes[0]), "baseconc1conc2\ncont1");
    assert_eq!(doc.note_text(john.notes[1]), "Lived on the farm\nuntil 1920.");
    assert!(doc.get(john.notes[1]).xref.is_empty(), "inline note is unregistered");

    let changed = john.changed.as_ref().and_then(|c| c.stamp.as_ref()).expect("CHAN/DATE");
    assert_eq!(changed.date, "1 JAN 2020");
    assert_eq!(changed.time, "12:00:00");
}

#[test]
fn events_and_attributes_are_in_chronological_order() {
    let (doc, _) = decode_fixture("family.ged");

    let john: &Individual = doc.find("I1").expect("I1");
    assert_eq!(event_tags(&john.events), vec!["BIRT", "DEAT", "BURI"]);
    assert_eq!(event_tags(&john.attributes), vec!["OCCU", "RESI"]);

    let family: &Family = doc.find("F1").expect("F1");
    assert_eq!(event_tags(&family.events), vec!["ENGA", "MARR", "DIV"]);
    let marriage = &family.events[1];
    assert_eq!(marriage.spouses.len(), 1);
    assert_eq!(marriage.spouses[0].role, "HUSB");
    assert_eq!(marriage.spouses[0].age, "22");
    assert_eq!(family.number_of_children.as_ref().map(|e| e.value.as_str()), Some("1"));
}

#[test]
fn disabled_sorting_keeps_file_order() {
    let file = std::fs::File::open(fixture("family.ged")).expect("fixture");
    let doc = Decoder::with_options(file, DecodeOptions::new().sort_events(false))
        .decode()
        .expect("decode");
    let john: &Individual = doc.find("I1").expect("I1");
    assert_eq!(event_tags(&john.events), vec!["DEAT", "BIRT", "BURI"]);
}

#[test]
fn birth_event_links_to_parent_family() {
    let (doc, _) = decode_fixture("family.ged");
    let tom: &Individual = doc.find("I3").expect("I3");
    let birth = &tom.events[0];
    assert_eq!(birth.tag, "BIRT");
    assert_eq!(birth.parents.len(), 1);
    assert_eq!(doc.get(birth.parents[0].family).xref, "F1");
}

#[test]
fn media_references_and_inline_notes() {
    let (doc, _) = decode_fixture("family.ged");
    let mary: &Individual = doc.find("I2").expect("I2");
    let m1 = doc.registry().lookup::<MediaObject>("M1").expect("M1");

    assert_eq!(mary.media, vec![m1]);
    assert_eq!(mary.photo, Some(m1));

    let media = doc.get(m1);
    let file = media.file.as_ref().expect("FILE");
    assert_eq!(file.name, "photo.jpg");
    assert_eq!(file.form, "jpeg");
    assert_eq!(file.title, "Portrait");
    assert_eq!(media.notes.len(), 1);
    assert_eq!(doc.note_text(media.notes[0]), "An inline media note");

    assert_eq!(doc.registry().arena::<Note>().len(), 4, "two shared plus two inline notes");
    assert_eq!(doc.registry().registered::<Note>(), 2);
}

#[test]
fn source_record_fields() {
    let (doc, _) = decode_fixture("family.ged");
    let source: &Source = doc.find("S1").expect("S1");

    assert_eq!(source.title, "Springfield Parish Register");
    assert_eq!(source.author, "Springfield Parish");
    assert_eq!(source.urls, vec!["https://example.org/a", "https://example.org/b"]);
    assert_eq!(source.repositories, vec!["R1"]);
    let data = source.event_data.as_ref().expect("DATA block");
    assert_eq!(data.agency, "Parish Office");
    assert_eq!(data.events.len(), 1);
    assert_eq!(data.events[0].value, "BIRT, DEAT");
    assert_eq!(data.events[0].date, "FROM 1850 TO 1920");

    assert_eq!(
        source.reference_string(),
        "Springfield Parish, \"Springfield Parish Register\", (Springfield, Parish Press, 1910)"
    );
}

#[test]
fn repository_record_fields() {
    let (doc, _) = decode_fixture("family.ged");
    let repo: &Repository = doc.find("R1").expect("R1");
    assert_eq!(repo.name, "Springfield Town Hall");
    assert_eq!(repo.phone, vec!["555-0199"]);
    let address = repo.address.as_ref().expect("address");
    assert_eq!(address.full, "Main Street");
    assert_eq!(address.city, "Springfield");
}

#[test]
fn unrecognized_tags_reach_the_callback_once_each() {
    let (doc, unrecognized) = decode_fixture("family.ged");

    assert_eq!(
        unrecognized,
        vec![
            Line::new(1, "_UID", "0123456789ABCDEF", ""),
            Line::new(0, "_PUBLISHER", "Custom Software", ""),
        ],
        "children of an unrecognized tag are skipped, not reported"
    );
    assert!(doc.trailer.is_some(), "decoding continues past unknown records");
}

#[test]
fn reference_form_opens_no_context_but_inline_form_does() {
    // A reference opens no context, so a CONC below it lands on the
    // individual, which does not know it. Below an inline note it extends
    // the note.
    let text = "0 @I1@ INDI\n\
                1 NOTE @N1@\n\
                2 CONC not part of N1\n\
                1 NOTE inline\n\
                2 CONC  text\n\
                0 @N1@ NOTE shared\n\
                0 TRLR\n";
    let mut unknown = Vec::new();
    let doc = Decoder::new(text.as_bytes())
        .on_unrecognized_tag(|line| unknown.push(line.tag.clone()))
        .decode()
        .expect("decode");

    let person: &Individual = doc.find("I1").expect("I1");
    assert_eq!(doc.note_text(person.notes[0]), "shared");
    assert_eq!(doc.note_text(person.notes[1]), "inlinetext");
    assert_eq!(unknown, vec!["CONC"], "only the CONC under the reference is unknown");
}

#[test]
fn crlf_and_byte_order_mark_are_accepted() {
    let doc = decode_str("\u{feff}0 HEAD\r\n1 SOUR Y\r\n0 @I1@ INDI\r\n1 NAME A /B/\r\n0 TRLR")
        .expect("decode");
    assert_eq!(doc.header.source.as_ref().map(|s| s.system_id.as_str()), Some("Y"));
    let person: &Individual = doc.find("I1").expect("I1");
    assert_eq!(person.primary_name(), Some("A /B/"));
    assert!(doc.trailer.is_some(), "unterminated final line still counts");
}

/// Hands out one chunk per `read` call, the way a pipe or socket may.
struct Chunked {
    chunks: Vec<Vec<u8>>,
}

impl Read for Chunked {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(chunk) = self.chunks.first_mut() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.chunks.remove(0);
        }
        Ok(n)
    }
}

#[test]
fn byte_order_mark_in_its_own_read_keeps_the_header() {
    let reader = Chunked {
        chunks: vec![vec![0xEF, 0xBB, 0xBF], b"0 HEAD\n1 SOUR X\n0 TRLR\n".to_vec()],
    };
    let doc = Decoder::new(reader).decode().expect("decode");
    assert_eq!(doc.header.source.as_ref().map(|s| s.system_id.as_str()), Some("X"));
    assert!(doc.trailer.is_some());
}

#[test]
fn famc_under_christening_is_unrecognized() {
    let text = "0 @I1@ INDI\n1 CHR\n2 FAMC @F1@\n1 ADOP\n2 FAMC @F1@\n0 @F1@ FAM\n0 TRLR\n";
    let mut unknown = Vec::new();
    let doc = Decoder::new(text.as_bytes())
        .on_unrecognized_tag(|line| unknown.push(line.tag.clone()))
        .decode()
        .expect("decode");

    let person: &Individual = doc.find("I1").expect("I1");
    let christening = person.events.iter().find(|e| e.tag == "CHR").expect("CHR");
    assert!(christening.parents.is_empty());
    let adoption = person.events.iter().find(|e| e.tag == "ADOP").expect("ADOP");
    assert_eq!(adoption.parents.len(), 1);
    assert_eq!(unknown, vec!["FAMC"]);
}

#[test]
fn record_iterators_resolve_listed_ids() {
    let (doc, _) = decode_fixture("family.ged");

    let families: Vec<&str> = doc.family_records().map(|f| f.xref.as_str()).collect();
    assert_eq!(families, vec!["F1"]);
    let sources: Vec<&str> = doc.source_records().map(|s| s.title.as_str()).collect();
    assert_eq!(sources, vec!["Springfield Parish Register"]);
    let notes: Vec<&str> = doc.note_records().map(|n| n.text.as_str()).collect();
    assert_eq!(notes, vec!["baseconc1conc2\ncont1", "Pneumonia"]);
    let media: Vec<&str> = doc.media_records().map(|m| m.xref.as_str()).collect();
    assert_eq!(media, vec!["M1"]);
}

#[test]
fn malformed_lines_are_skipped() {
    let doc = decode_str("0 HEAD\nnot a line\n0 @I1@ INDI\n@broken\n1 SEX F\n0 TRLR\n")
        .expect("decode");
    let person: &Individual = doc.find("I1").expect("I1");
    assert_eq!(person.sex, "F");
}

#[test]
fn submission_record_is_linked_from_document() {
    let doc = decode_str(
        "0 HEAD\n1 SUBN @B1@\n0 @B1@ SUBN\n1 FAMF family\n1 ANCE 3\n1 SUBM @U1@\n0 @U1@ SUBM\n1 NAME Sub\n0 TRLR\n",
    )
    .expect("decode");
    let submission = doc.submission_record().expect("submission");
    assert_eq!(submission.family_file, "family");
    assert_eq!(submission.ancestors, "3");
    let submitter = submission.submitter.expect("submission submitter");
    assert_eq!(doc.get(submitter).name, "Sub");
    assert_eq!(doc.header.submission, doc.submission);
}
