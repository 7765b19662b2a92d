use gedcom_reader::{decode_str, DecodeOptions, Decoder, GedcomError, Individual, Note};
use proptest::prelude::*;
use rstest::rstest;
use std::io::{self, Read, Write};

/// Continuation values: no leading whitespace (the scanner trims it) and no
/// line breaks.
fn fragment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.,][A-Za-z0-9 .,]{0,15}"
}

proptest! {
    #[test]
    fn continuation_lines_rebuild_the_text(
        base in fragment(),
        parts in prop::collection::vec((any::<bool>(), fragment()), 0..12),
    ) {
        let mut file = format!("0 @N1@ NOTE {base}\n");
        let mut expected = base.clone();
        for (newline, part) in &parts {
            if *newline {
                file.push_str(&format!("1 CONT {part}\n"));
                expected.push('\n');
            } else {
                file.push_str(&format!("1 CONC {part}\n"));
            }
            expected.push_str(part);
        }
        file.push_str("0 TRLR\n");

        let doc = decode_str(&file).expect("decode");
        let note: &Note = doc.find("N1").expect("N1");
        prop_assert_eq!(&note.text, &expected);
    }

    #[test]
    fn events_end_up_sorted_with_undated_last_in_file_order(
        dates in prop::collection::vec(prop::option::of((1u8..=28, 0usize..12, 1500i32..2020)), 1..15),
    ) {
        const MONTHS: [&str; 12] = [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ];
        let mut file = String::from("0 @I1@ INDI\n");
        for (i, date) in dates.iter().enumerate() {
            file.push_str(&format!("1 EVEN e{i}\n"));
            if let Some((day, month, year)) = date {
                file.push_str(&format!("2 DATE ABT {day} {} {year}\n", MONTHS[*month]));
            }
        }
        file.push_str("0 TRLR\n");

        let doc = decode_str(&file).expect("decode");
        let person: &Individual = doc.find("I1").expect("I1");
        prop_assert_eq!(person.events.len(), dates.len());

        let keys: Vec<_> = person.events.iter().map(|e| e.sort_key).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]), "keys out of order: {:?}", keys);

        let undated: Vec<&str> = person
            .events
            .iter()
            .filter(|e| !e.sort_key.is_dated())
            .map(|e| e.value.as_str())
            .collect();
        let expected: Vec<String> = dates
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_none())
            .map(|(i, _)| format!("e{i}"))
            .collect();
        prop_assert_eq!(undated, expected);
    }

    #[test]
    fn unknown_subtrees_never_leak_into_siblings(
        depth in 1u32..6,
        tag in "_[A-Z]{2,6}",
    ) {
        let mut file = String::from("0 @I1@ INDI\n1 SEX M\n");
        for level in 1..=depth {
            file.push_str(&format!("{level} {tag} v{level}\n"));
        }
        file.push_str("1 NAME Sibling /Name/\n0 @I2@ INDI\n1 SEX F\n0 TRLR\n");

        let mut seen = Vec::new();
        let doc = Decoder::new(file.as_bytes())
            .on_unrecognized_tag(|line| seen.push((line.level, line.tag.clone(), line.value.clone())))
            .decode()
            .expect("decode");

        prop_assert_eq!(seen, vec![(1, tag.clone(), "v1".to_string())]);
        let first: &Individual = doc.find("I1").expect("I1");
        prop_assert_eq!(first.primary_name(), Some("Sibling /Name/"));
        prop_assert_eq!(&first.sex, "M");
        let second: &Individual = doc.find("I2").expect("I2");
        prop_assert_eq!(&second.sex, "F");
        prop_assert!(second.names.is_empty());
    }
}

/// Serves `data`, then fails.
struct FailingAfter {
    data: io::Cursor<Vec<u8>>,
}

impl Read for FailingAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "source went away")),
            n => Ok(n),
        }
    }
}

#[test]
fn read_failure_returns_the_partial_document() {
    let data = b"0 HEAD\n1 SOUR X\n0 @I1@ INDI\n1 NAME Ann /Lee/\n1 DEAT\n2 DATE 1990\n1 BIRT\n2 DATE 1920\n".to_vec();
    let reader = FailingAfter { data: io::Cursor::new(data) };

    let err = Decoder::with_options(reader, DecodeOptions::new().buffer_size(256))
        .decode()
        .expect_err("the read failure must surface");
    assert!(err.is_io(), "read failures are recoverable I/O errors: {err}");

    let GedcomError::Truncated { lines, .. } = &err else {
        panic!("expected a truncated decode, got {err:?}");
    };
    assert_eq!(*lines, 8);

    let partial = err.into_partial().expect("partial document");
    let person: &Individual = partial.find("I1").expect("I1 decoded before the failure");
    assert_eq!(person.primary_name(), Some("Ann /Lee/"));
    let tags: Vec<&str> = person.events.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["BIRT", "DEAT"], "open records are closed and finalized");
}

#[test]
fn unreadable_path_is_a_plain_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = gedcom_reader::open(dir.path().join("missing.ged")).expect_err("no such file");
    assert!(matches!(err, GedcomError::Io(_)));
}

#[test]
fn decoding_from_a_temporary_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "0 HEAD\n1 SOUR Temp\n0 @I1@ INDI\n1 NAME Kim /Park/\n0 TRLR\n").expect("write");

    let doc = gedcom_reader::open(file.path()).expect("decode");
    assert_eq!(doc.individuals.len(), 1);
    assert_eq!(doc.header.source.map(|s| s.system_id), Some("Temp".to_string()));
}

#[rstest]
#[case::small_window(256)]
#[case::default_window(64 * 1024)]
fn window_size_does_not_change_the_result(#[case] buffer_size: usize) {
    let mut file = String::from("0 HEAD\n");
    for i in 0..200 {
        file.push_str(&format!("0 @I{i}@ INDI\n1 NAME Person {i} /Test/\n1 BIRT\n2 DATE {}\n", 1800 + i));
    }
    file.push_str("0 TRLR\n");

    let doc = Decoder::with_options(file.as_bytes(), DecodeOptions::new().buffer_size(buffer_size))
        .decode()
        .expect("decode");
    assert_eq!(doc.individuals.len(), 200);
    let last: &Individual = doc.find("I199").expect("last individual");
    assert_eq!(last.primary_name(), Some("Person 199 /Test/"));
    assert_eq!(last.events[0].date, "1999");
}

#[rstest]
#[case::object_reference("1 OBJE @M1@", 0)]
#[case::object_inline("1 OBJE\n2 FILE a.jpg", 1)]
#[case::note_reference("1 NOTE @N1@", 0)]
#[case::note_inline("1 NOTE free text", 1)]
fn inline_forms_create_unregistered_records(#[case] line: &str, #[case] inline: usize) {
    let file = format!("0 @I1@ INDI\n{line}\n0 @M1@ OBJE\n0 @N1@ NOTE shared\n0 TRLR\n");
    let doc = decode_str(&file).expect("decode");
    let registry = doc.registry();

    let media_inline = registry.arena::<gedcom_reader::MediaObject>().len()
        - registry.registered::<gedcom_reader::MediaObject>();
    let notes_inline = registry.arena::<Note>().len() - registry.registered::<Note>();
    assert_eq!(media_inline + notes_inline, inline);

    let person: &Individual = doc.find("I1").expect("I1");
    assert_eq!(person.media.len() + person.notes.len(), 1);
}
