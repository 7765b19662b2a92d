//! Sequential access to the lines of a GEDCOM stream.
//!
//! [`Lines`] drives the [`Scanner`] over a fixed-size window: whenever the
//! scanner reports that a line runs past the end of the window, the
//! unconsumed tail is shifted to the front and the rest of the window is
//! refilled from the reader. Memory use is bounded by the window size no
//! matter how large the file is.

use std::io::{ErrorKind, Read};

use log::{trace, warn};

use super::format::scanner::{Line, Scan, Scanner};

/// Iterator over the lines of a byte stream.
///
/// Yields `Err` at most once, for a failed read; the iterator is finished
/// after that.
pub struct Lines<R: Read> {
    reader: R,
    scanner: Scanner,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
    failed: bool,
    /// Set while throwing away the rest of a line longer than the window.
    skipping: bool,
    line_number: usize,
}

impl<R: Read> Lines<R> {
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader,
            scanner: Scanner::new(),
            buf: vec![0u8; buffer_size],
            start: 0,
            end: 0,
            eof: false,
            failed: false,
            skipping: false,
            line_number: 0,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Shifts unconsumed bytes to the front of the window and tops it up.
    fn refill(&mut self) -> std::io::Result<()> {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;

        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn window_is_full(&self) -> bool {
        self.start == 0 && self.end == self.buf.len()
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = std::io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if self.skipping {
                match Scanner::skip_line(&self.buf[self.start..self.end]) {
                    Some(n) => {
                        self.start += n;
                        self.skipping = false;
                        continue;
                    }
                    None => self.start = self.end,
                }
            } else {
                let window = &self.buf[self.start..self.end];
                match self.scanner.scan(window, self.eof) {
                    Scan::Line { line, consumed } => {
                        self.start += consumed;
                        self.line_number += 1;
                        trace!("{:>6}: {} {} {}", self.line_number, line.level, line.tag, line.value);
                        return Some(Ok(line));
                    }
                    Scan::Blank { consumed } => {
                        self.start += consumed;
                        self.line_number += 1;
                        continue;
                    }
                    Scan::Malformed { consumed, reason } => {
                        self.start += consumed;
                        self.line_number += 1;
                        warn!("Skipping malformed line {}: {}", self.line_number, reason);
                        continue;
                    }
                    Scan::End => return None,
                    Scan::NeedMore if self.window_is_full() => {
                        self.line_number += 1;
                        warn!(
                            "Skipping line {}: longer than the {} byte read buffer",
                            self.line_number,
                            self.buf.len()
                        );
                        self.start = self.end;
                        self.skipping = true;
                    }
                    Scan::NeedMore => {}
                }
            }

            if self.eof {
                return None;
            }
            if let Err(e) = self.refill() {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader handing out at most `chunk` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn tags<R: Read>(lines: Lines<R>) -> Vec<String> {
        lines.map(|l| l.expect("line ok").tag).collect()
    }

    #[test]
    fn lines_straddling_refills_are_reassembled() {
        let data = b"0 HEAD\n1 SOUR Some long system name\n0 TRLR";
        let lines = Lines::new(Trickle { data, chunk: 5 }, 40);
        assert_eq!(tags(lines), vec!["HEAD", "SOUR", "TRLR"]);
    }

    #[test]
    fn byte_order_mark_split_across_reads_is_stripped() {
        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(b"0 HEAD\n1 SOUR X\n0 TRLR\n");
        let lines = Lines::new(Trickle { data: &data, chunk: 1 }, 256);
        assert_eq!(tags(lines), vec!["HEAD", "SOUR", "TRLR"]);
    }

    #[test]
    fn over_long_line_is_skipped_and_decoding_resumes() {
        let long = format!("1 NOTE {}\n", "x".repeat(100));
        let data = format!("0 HEAD\n{long}1 FILE f.ged\n0 TRLR\n");
        let lines = Lines::new(Cursor::new(data.into_bytes()), 32);
        assert_eq!(tags(lines), vec!["HEAD", "FILE", "TRLR"]);
    }

    #[test]
    fn read_error_is_reported_once() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(ErrorKind::Other, "boom"))
            }
        }

        let mut lines = Lines::new(Broken, 64);
        assert!(matches!(lines.next(), Some(Err(_))));
        assert!(lines.next().is_none());
    }
}
