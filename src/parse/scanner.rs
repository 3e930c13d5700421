//! Line-by-line reader for alias rule files.
//!
//! [`LineScanner`] consumes a buffered reader and yields the candidate
//! [`AliasRule`]s in file order. Blank lines, comments, malformed entries,
//! overlong lines and lines that are not UTF-8 are skipped here, with a
//! diagnostic where one is warranted. Only an I/O error ends the scan early.

use std::io::{self, BufRead, Read};

use log::{debug, warn};

use crate::parse::{AliasRule, LineKind, classify};

/// Result of reading one physical line into the buffer.
enum RawLine {
    /// The buffer holds a complete line, terminator stripped.
    Text,
    /// The line exceeded the limit and has been discarded up to its terminator.
    Overlong,
    Eof,
}

/// Lazy, single-pass iterator over the rules in a rule file.
pub struct LineScanner<R> {
    reader: R,
    /// Shown in diagnostics as `<source>:<line>`.
    source: String,
    max_line: usize,
    debug: bool,
    lineno: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, source: impl Into<String>, max_line: usize, debug: bool) -> Self {
        Self {
            reader,
            source: source.into(),
            max_line,
            debug,
            lineno: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Read the next line, reading at most `max_line + 1` bytes into the buffer.
    fn read_line(&mut self) -> io::Result<RawLine> {
        self.buf.clear();
        let limit = u64::try_from(self.max_line)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let n = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(RawLine::Eof);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            return Ok(RawLine::Text);
        }
        // Short and unterminated can only mean end of file.
        if self.buf.len() <= self.max_line {
            return Ok(RawLine::Text);
        }
        self.skip_rest()?;
        Ok(RawLine::Overlong)
    }

    /// Discard input up to and including the next `\n`, or to end of file.
    fn skip_rest(&mut self) -> io::Result<()> {
        loop {
            let (used, found) = {
                let available = match self.reader.fill_buf() {
                    Ok(b) => b,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (available.len(), false),
                }
            };
            self.reader.consume(used);
            if found {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<AliasRule>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let raw = match self.read_line() {
                Ok(raw) => raw,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            match raw {
                RawLine::Eof => {
                    self.done = true;
                    return None;
                }
                RawLine::Overlong => {
                    self.lineno += 1;
                    warn!("overlong line at {}:{}", self.source, self.lineno);
                    continue;
                }
                RawLine::Text => self.lineno += 1,
            }

            let Ok(text) = std::str::from_utf8(&self.buf) else {
                warn!("non-UTF-8 alias entry at {}:{}", self.source, self.lineno);
                continue;
            };

            match classify(text) {
                LineKind::Blank => {}
                LineKind::Comment => {
                    if self.debug {
                        debug!("skipping comment line at {}:{}", self.source, self.lineno);
                    }
                }
                LineKind::Malformed { .. } => {
                    warn!("malformed alias entry at {}:{}", self.source, self.lineno);
                }
                LineKind::Rule { from, to } => {
                    if self.debug {
                        debug!("alias entry: \"{from}\" -> \"{to}\"");
                    }
                    return Some(Ok(AliasRule {
                        from: from.to_string(),
                        to: to.to_string(),
                        line: self.lineno,
                    }));
                }
            }
        }
    }
}
