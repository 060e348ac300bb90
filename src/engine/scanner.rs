//! Per-file line scanner: lazy sequence of matches for one file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::Match;
use crate::engine::matcher::KeywordMatcher;
use crate::utils::config::SCAN_READ_BUFFER_SIZE;

/// Lazy iterator over the matching lines of one open file.
///
/// Yields `Ok(Match)` per matching line with strictly increasing line numbers. A read error is
/// yielded once as `Err` and ends the sequence; matches already yielded stay valid. The file
/// handle is closed when the iterator is dropped, whichever way iteration ended.
pub struct FileMatches<'a> {
    reader: BufReader<File>,
    file: String,
    matcher: &'a KeywordMatcher,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<'a> FileMatches<'a> {
    /// Open `path` for reading. Fails with the open error (not found, permission denied, ...).
    pub fn open(path: &Path, matcher: &'a KeywordMatcher) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::with_capacity(SCAN_READ_BUFFER_SIZE, file),
            file: path.to_string_lossy().into_owned(),
            matcher,
            line_no: 0,
            buf: Vec::new(),
            done: false,
        })
    }

    /// Lines consumed so far, matching or not.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl Iterator for FileMatches<'_> {
    type Item = io::Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let text = String::from_utf8_lossy(strip_line_ending(&self.buf));
                    if self.matcher.is_match(&text) {
                        return Some(Ok(Match {
                            file: self.file.clone(),
                            line: self.line_no,
                            text: text.into_owned(),
                        }));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Drop a trailing `\n`, then a trailing `\r` (CRLF files).
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scan one file to completion, handing each match to `on_match` as it is found.
///
/// Returns the number of matches, or the error that stopped the scan (open failure or mid-file
/// read failure). Matches handed over before a read error stay with the caller.
pub fn scan_file<F>(path: &Path, matcher: &KeywordMatcher, mut on_match: F) -> io::Result<usize>
where
    F: FnMut(Match),
{
    let mut count = 0;
    for item in FileMatches::open(path, matcher)? {
        on_match(item?);
        count += 1;
    }
    Ok(count)
}
