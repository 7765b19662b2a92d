use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use gedcom_reader::{DecodeOptions, Decoder, Document, GedcomError, IndividualId, Line};

/// How many individuals the summary lists.
const SAMPLE_SIZE: usize = 10;

#[derive(Parser)]
#[command(name = "gedcom-reader", version, about = "Decode a GEDCOM file and summarize it")]
struct Cli {
    /// Path to the .ged file
    file: PathBuf,

    /// Print the whole document as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Size of the read window in bytes
    #[arg(long, value_name = "BYTES")]
    buffer_size: Option<usize>,

    /// List standard tags the decoder skipped (user-defined `_` tags are not shown)
    #[arg(long)]
    show_unrecognized: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: logging disabled: {e}");
            None
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose);

    let file = match File::open(&cli.file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("ERROR: cannot open {}: {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = DecodeOptions::new();
    if let Some(bytes) = cli.buffer_size {
        options = options.buffer_size(bytes);
    }

    let mut decoder = Decoder::with_options(file, options);
    if cli.show_unrecognized {
        decoder = decoder.on_unrecognized_tag(print_unrecognized);
    }

    match decoder.decode() {
        Ok(doc) => {
            report(&cli, &doc);
            ExitCode::SUCCESS
        }
        Err(GedcomError::Truncated { source, partial, lines }) => {
            report(&cli, &partial);
            eprintln!("\nERROR: input truncated after {lines} lines: {source}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to decode {}", cli.file.display());
            eprintln!("  {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_unrecognized(line: &Line) {
    if line.tag.starts_with('_') {
        return;
    }
    if line.xref.is_empty() {
        println!("unrecognized: {} {} {}", line.level, line.tag, line.value);
    } else {
        println!("unrecognized: {} @{}@ {} {}", line.level, line.xref, line.tag, line.value);
    }
}

fn report(cli: &Cli, doc: &Document) {
    if cli.json {
        match serde_json::to_string_pretty(doc) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("ERROR: cannot serialize document: {e}"),
        }
    } else {
        print_summary(doc);
    }
}

fn print_summary(doc: &Document) {
    println!("{}", "=".repeat(60));
    println!("GEDCOM summary");
    println!("{}", "=".repeat(60));

    if let Some(source) = &doc.header.source {
        println!("  Produced by: {} {}", source.system_id, source.version);
    }
    if let Some(format) = &doc.header.format {
        println!("  Format: GEDCOM {} {}", format.version, format.form);
    }
    if let Some(encoding) = &doc.header.encoding {
        println!("  Character set: {}", encoding.name);
    }

    println!("\nRecords:");
    println!("  Individuals: {}", doc.individuals.len());
    println!("  Families: {}", doc.families.len());
    println!("  Sources: {}", doc.sources.len());
    println!("  Notes: {}", doc.notes.len());
    println!("  Media objects: {}", doc.media.len());
    println!("  Repositories: {}", doc.repositories.len());
    println!("  Submitters: {}", doc.submitters.len());
    println!("  Trailer: {}", if doc.trailer.is_some() { "present" } else { "missing" });

    println!("\nIndividuals (first {SAMPLE_SIZE}):");
    for (i, person) in doc.individual_records().take(SAMPLE_SIZE).enumerate() {
        println!(
            "  {}. [{}] {}",
            i + 1,
            person.xref,
            person.primary_name().unwrap_or("(no name)")
        );
        for event in &person.events {
            let date = if event.date.is_empty() { "?" } else { &event.date };
            if event.place.name.is_empty() {
                println!("       {} {}", event.tag, date);
            } else {
                println!("       {} {} in {}", event.tag, date, event.place.name);
            }
        }
    }
    if doc.individuals.len() > SAMPLE_SIZE {
        println!("  ... and {} more", doc.individuals.len() - SAMPLE_SIZE);
    }

    if !doc.families.is_empty() {
        println!("\nFamilies (first {SAMPLE_SIZE}):");
        for family in doc.family_records().take(SAMPLE_SIZE) {
            println!(
                "  [{}] {} + {} ({} children)",
                family.xref,
                spouse_name(doc, family.husband),
                spouse_name(doc, family.wife),
                family.children.len()
            );
        }
    }

    if !doc.sources.is_empty() {
        println!("\nSources (first {SAMPLE_SIZE}):");
        for source in doc.source_records().take(SAMPLE_SIZE) {
            println!("  [{}] {}", source.xref, source.reference_string());
        }
    }

    if !doc.notes.is_empty() {
        println!("\nNotes (first {SAMPLE_SIZE}):");
        for note in doc.note_records().take(SAMPLE_SIZE) {
            let first_line = note.text.lines().next().unwrap_or("");
            println!("  [{}] {}", note.xref, first_line);
        }
    }

    if !doc.media.is_empty() {
        println!("\nMedia objects (first {SAMPLE_SIZE}):");
        for media in doc.media_records().take(SAMPLE_SIZE) {
            let file = media.file.as_ref().map_or("(no file)", |f| f.name.as_str());
            println!("  [{}] {} {}", media.xref, file, media.title);
        }
    }
}

fn spouse_name(doc: &Document, id: Option<IndividualId>) -> &str {
    id.and_then(|id| doc.get(id).primary_name()).unwrap_or("?")
}
