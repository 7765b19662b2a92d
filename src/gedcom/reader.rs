use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use super::format::scanner::Line;
use super::iter::Lines;
use super::parser::{Engine, UnrecognizedTagHandler};
use super::types::document::Document;
use super::types::error::{GedcomError, Result};

/// Default size of the line window.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Smallest window accepted; smaller requests are raised to this.
pub const MIN_BUFFER_SIZE: usize = 256;

/// Tuning knobs for a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    buffer_size: usize,
    sort_events: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            sort_events: true,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the fixed read window. A line longer than the window
    /// is dropped with a warning; values exceeding it are expected to be
    /// split with `CONC` lines.
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes.max(MIN_BUFFER_SIZE);
        self
    }

    /// Whether events and attributes are put in chronological order when
    /// their record closes.
    pub fn sort_events(mut self, enabled: bool) -> Self {
        self.sort_events = enabled;
        self
    }

    pub fn get_buffer_size(&self) -> usize {
        self.buffer_size
    }
}

/// Decodes one GEDCOM stream into a [`Document`].
///
/// Each decoder owns its registry, parser stack and callback; separate
/// decoders share nothing.
///
/// ```no_run
/// use gedcom_reader::Decoder;
///
/// let file = std::fs::File::open("family.ged")?;
/// let mut unknown = 0;
/// let doc = Decoder::new(file)
///     .on_unrecognized_tag(|_| unknown += 1)
///     .decode()?;
/// println!("{} individuals, {} unknown tags", doc.individuals.len(), unknown);
/// # Ok::<(), gedcom_reader::GedcomError>(())
/// ```
pub struct Decoder<'h, R: Read> {
    reader: R,
    options: DecodeOptions,
    on_unrecognized: Option<UnrecognizedTagHandler<'h>>,
}

impl<'h, R: Read> Decoder<'h, R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader,
            options,
            on_unrecognized: None,
        }
    }

    /// Registers a callback for every tag the grammar does not know, at any
    /// depth. The subtree below such a tag is skipped.
    pub fn on_unrecognized_tag(mut self, callback: impl FnMut(&Line) + 'h) -> Self {
        self.on_unrecognized = Some(Box::new(callback));
        self
    }

    /// Runs the decode to the end of the stream.
    ///
    /// # Errors
    /// [`GedcomError::Truncated`] if a read fails; the error carries the
    /// document decoded up to that point. [`GedcomError::StackUnderflow`] or
    /// [`GedcomError::Inconsistent`] signal a defect in the parser itself.
    pub fn decode(self) -> Result<Document> {
        let Decoder { reader, options, on_unrecognized } = self;
        info!("Decoding GEDCOM stream (buffer {} bytes)", options.buffer_size);

        let mut lines = Lines::new(reader, options.buffer_size);
        let mut engine = Engine::new(on_unrecognized, options.sort_events);

        while let Some(next) = lines.next() {
            match next {
                Ok(line) => engine.feed(&line)?,
                Err(source) => {
                    let count = lines.line_number();
                    debug!("Read failed after {} lines, closing open records", count);
                    let partial = engine.finish()?;
                    return Err(GedcomError::Truncated {
                        source,
                        partial: Box::new(partial),
                        lines: count,
                    });
                }
            }
        }

        let doc = engine.finish()?;
        info!(
            "Decoded {} lines: {} individuals, {} families, {} sources, {} notes",
            lines.line_number(),
            doc.individuals.len(),
            doc.families.len(),
            doc.sources.len(),
            doc.notes.len()
        );
        Ok(doc)
    }
}

/// Opens and decodes the file at `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    info!("Opening GEDCOM file: {}", path.display());
    let file = File::open(path)?;
    Decoder::new(file).decode()
}

pub fn decode_bytes(bytes: &[u8]) -> Result<Document> {
    Decoder::new(bytes).decode()
}

pub fn decode_str(text: &str) -> Result<Document> {
    decode_bytes(text.as_bytes())
}
