/*!
 * Shared cue machinery for the format sub-parsers.
 *
 * Each format implements [`CueParser`]; [`run`] drives any of them over an
 * LF-normalized document. Entries only ever leave a parser through a
 * [`CueSink`], which owns the drop rule and the `sequence_id` counter, so all
 * three formats number and filter their output identically.
 */

use log::{debug, trace};

use super::{CaptionEntry, ParsedDocument};

/// A format-specific line consumer
pub trait CueParser {
    /// Whether `line` belongs to the part of the document that carries cues.
    /// Called for every line, so implementations may track section changes here.
    fn is_section_relevant(&mut self, line: &str) -> bool;

    /// Consume one trimmed line (1-based `line_no`) from a relevant section
    fn consume_line(&mut self, line_no: usize, line: &str, sink: &mut CueSink);

    /// End of input
    fn flush(&mut self, sink: &mut CueSink);
}

/// Run a parser over LF-only text and collect what it emits
pub fn run<P: CueParser>(mut parser: P, content: &str) -> ParsedDocument {
    let mut sink = CueSink::new();

    for (index, raw_line) in content.split('\n').enumerate() {
        let line = raw_line.trim();
        if !parser.is_section_relevant(line) {
            trace!("Line {} outside cue section", index + 1);
            continue;
        }
        parser.consume_line(index + 1, line, &mut sink);
    }

    parser.flush(&mut sink);
    sink.finish()
}

/// Collects emitted entries and assigns their sequence ids
#[derive(Debug)]
pub struct CueSink {
    entries: Vec<CaptionEntry>,
    next_id: usize,
}

impl CueSink {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Emit an entry if it has a time range and text; returns whether it was kept
    pub fn emit(&mut self, start: String, end: String, text: String, source_index: Option<u64>) -> bool {
        if start.is_empty() || end.is_empty() {
            debug!("Dropping cue without a time range");
            return false;
        }
        if text.is_empty() {
            debug!("Dropping cue {} --> {} with no text", start, end);
            return false;
        }

        self.entries.push(CaptionEntry {
            sequence_id: self.next_id,
            start,
            end,
            text,
            source_index,
        });
        self.next_id += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> ParsedDocument {
        ParsedDocument::from_entries(self.entries)
    }
}

impl Default for CueSink {
    fn default() -> Self {
        Self::new()
    }
}

/// In-progress SRT/WebVTT block
#[derive(Debug, Default)]
pub struct CueAccumulator {
    index: Option<u64>,
    start: Option<String>,
    end: Option<String>,
    content: String,
    reading_content: bool,
}

impl CueAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<u64> {
        self.index
    }

    pub fn set_index(&mut self, index: u64) {
        self.index = Some(index);
    }

    pub fn is_reading_content(&self) -> bool {
        self.reading_content
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Record the time range and switch to content lines
    pub fn begin_content(&mut self, start: String, end: String) {
        self.start = Some(start);
        self.end = Some(end);
        self.reading_content = true;
    }

    /// Append already-sanitized text; empty text is skipped
    pub fn push_content(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(text);
    }

    /// Blank source line. A block with text is emitted; a block that reached
    /// its content lines without producing text is discarded. Blocks still
    /// waiting for their timestamp are kept.
    pub fn end_block(&mut self, line_no: usize, sink: &mut CueSink) {
        if self.has_content() {
            self.flush(sink);
        } else if self.reading_content {
            debug!("Discarding cue ending at line {} with no text", line_no);
            self.reset();
        }
    }

    /// Emit the block if it carries text, then reset
    pub fn flush(&mut self, sink: &mut CueSink) {
        if self.has_content() {
            let start = self.start.take().unwrap_or_default();
            let end = self.end.take().unwrap_or_default();
            let content = std::mem::take(&mut self.content);
            sink.emit(start, end, content, self.index);
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Purely numeric cue index line
pub fn parse_index(line: &str) -> Option<u64> {
    if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
        line.parse().ok()
    } else {
        None
    }
}
