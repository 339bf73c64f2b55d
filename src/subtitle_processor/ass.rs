/*!
 * Advanced SubStation Alpha (ASS/SSA) sub-parser.
 *
 * Only the `[Events]` section is read. Its `Format:` line names the fields of
 * every following `Dialogue:` line; each dialogue line is split by position
 * and mapped onto those names, and `Start`, `End` and `Text` become a caption.
 * Another section header closes `[Events]`, so embedded `[Fonts]` or
 * `[Graphics]` data is never read as dialogue.
 */

use std::collections::HashMap;

use log::{debug, trace};

use super::cue::{CueParser, CueSink};
use super::sanitizer::Sanitizer;
use super::timecodes;

const EVENTS_SECTION: &str = "[Events]";
const FORMAT_PREFIX: &str = "Format:";
const DIALOGUE_PREFIX: &str = "Dialogue:";

#[derive(Debug, Default)]
pub struct AssParser {
    in_events: bool,
    format_fields: Vec<String>,
}

impl AssParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field names from the most recent `Format:` line
    pub fn format_fields(&self) -> &[String] {
        &self.format_fields
    }

    fn read_format(&mut self, fields: &str) {
        self.format_fields = fields.split(',').map(|field| field.trim().to_string()).collect();
        debug!("ASS event format: {:?}", self.format_fields);
    }

    fn read_dialogue(&self, line_no: usize, values: &str, sink: &mut CueSink) {
        if self.format_fields.is_empty() {
            debug!("Skipping ASS dialogue at line {} before any Format line", line_no);
            return;
        }

        // Zipped to the shorter list; surplus values are ignored
        let values = split_fields(values.trim());
        let fields: HashMap<&str, &str> = self
            .format_fields
            .iter()
            .map(String::as_str)
            .zip(values.iter().map(String::as_str))
            .collect();

        let start = fields.get("Start").map(|v| v.trim()).filter(|v| !v.is_empty());
        let end = fields.get("End").map(|v| v.trim()).filter(|v| !v.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => {
                let text = Sanitizer::ASS.clean(fields.get("Text").copied().unwrap_or_default());
                sink.emit(
                    timecodes::ass_to_canonical(start),
                    timecodes::ass_to_canonical(end),
                    text,
                    None,
                );
            }
            _ => debug!("Skipping ASS dialogue at line {} without Start/End", line_no),
        }
    }
}

fn is_section_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

impl CueParser for AssParser {
    fn is_section_relevant(&mut self, line: &str) -> bool {
        if line == EVENTS_SECTION {
            debug!("Entering ASS events section");
            self.in_events = true;
            return false;
        }
        if is_section_header(line) {
            if self.in_events {
                debug!("ASS events section closed by {}", line);
            }
            self.in_events = false;
            return false;
        }
        self.in_events
    }

    fn consume_line(&mut self, line_no: usize, line: &str, sink: &mut CueSink) {
        if let Some(fields) = line.strip_prefix(FORMAT_PREFIX) {
            self.read_format(fields);
        } else if let Some(values) = line.strip_prefix(DIALOGUE_PREFIX) {
            self.read_dialogue(line_no, values, sink);
        } else {
            trace!("Ignoring ASS event line {}", line_no);
        }
    }

    fn flush(&mut self, _sink: &mut CueSink) {}
}

/// Split an event line on commas that sit outside `{...}` override blocks.
/// A trailing empty field is not returned.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_braces = false;

    for ch in line.chars() {
        match ch {
            '{' => {
                in_braces = true;
                current.push(ch);
            }
            '}' => {
                in_braces = false;
                current.push(ch);
            }
            ',' if !in_braces => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        fields.push(current);
    }

    fields
}
