/*!
 * WebVTT sub-parser.
 *
 * Everything before the first line containing `-->` (the `WEBVTT` header,
 * metadata, style blocks) is preamble. After that the block shape matches
 * SRT, except cue identifiers are optional and may be non-numeric, and
 * timestamps use a `.` before the milliseconds.
 */

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::cue::{CueAccumulator, CueParser, CueSink, parse_index};
use super::sanitizer::Sanitizer;
use super::timecodes;

static VTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}\.\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}\.\d{3})").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VttState {
    Preamble,
    AwaitCue,
    ReadingContent,
}

#[derive(Debug, Default)]
pub struct VttParser {
    cue: CueAccumulator,
    in_body: bool,
}

impl VttParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VttState {
        if !self.in_body {
            VttState::Preamble
        } else if self.cue.is_reading_content() {
            VttState::ReadingContent
        } else {
            VttState::AwaitCue
        }
    }
}

impl CueParser for VttParser {
    fn is_section_relevant(&mut self, line: &str) -> bool {
        if !self.in_body && line.contains("-->") {
            debug!("WebVTT preamble ends");
            self.in_body = true;
        }
        self.in_body
    }

    fn consume_line(&mut self, line_no: usize, line: &str, sink: &mut CueSink) {
        if line.is_empty() {
            self.cue.end_block(line_no, sink);
            return;
        }

        if self.state() == VttState::ReadingContent {
            self.cue.push_content(&Sanitizer::PLAIN.clean(line));
            return;
        }

        if let Some(caps) = VTT_TIMESTAMP_REGEX.captures(line) {
            self.cue.begin_content(
                timecodes::vtt_to_canonical(&caps[1]),
                timecodes::vtt_to_canonical(&caps[2]),
            );
            return;
        }

        // Cue identifier: numeric ones are kept as the source index
        if self.cue.index().is_none() {
            if let Some(index) = parse_index(line) {
                self.cue.set_index(index);
                return;
            }
        }
        trace!("Ignoring WebVTT line {}: {}", line_no, line);
    }

    fn flush(&mut self, sink: &mut CueSink) {
        self.cue.flush(sink);
    }
}
