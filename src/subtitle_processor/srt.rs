/*!
 * SubRip (SRT) sub-parser.
 *
 * Blocks are an index line, a `HH:MM:SS,mmm --> HH:MM:SS,mmm` line, content
 * lines, and a blank separator. Timestamps are already canonical.
 */

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::cue::{CueAccumulator, CueParser, CueSink, parse_index};
use super::sanitizer::Sanitizer;
use super::timecodes;

static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})").unwrap()
});

/// Where the current block stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrtState {
    AwaitIndex,
    AwaitTime,
    ReadingContent,
}

#[derive(Debug, Default)]
pub struct SrtParser {
    cue: CueAccumulator,
}

impl SrtParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SrtState {
        if self.cue.is_reading_content() {
            SrtState::ReadingContent
        } else if self.cue.index().is_some() {
            SrtState::AwaitTime
        } else {
            SrtState::AwaitIndex
        }
    }

    fn try_timestamp(&mut self, line_no: usize, line: &str) {
        match SRT_TIMESTAMP_REGEX.captures(line) {
            Some(caps) => {
                self.cue.begin_content(
                    timecodes::srt_to_canonical(&caps[1]),
                    timecodes::srt_to_canonical(&caps[2]),
                );
            }
            None => debug!("Skipping unexpected SRT line {}: {}", line_no, line),
        }
    }
}

impl CueParser for SrtParser {
    fn is_section_relevant(&mut self, _line: &str) -> bool {
        true
    }

    fn consume_line(&mut self, line_no: usize, line: &str, sink: &mut CueSink) {
        if line.is_empty() {
            self.cue.end_block(line_no, sink);
            return;
        }

        match self.state() {
            SrtState::ReadingContent => {
                self.cue.push_content(&Sanitizer::PLAIN.clean(line));
            }
            SrtState::AwaitIndex => match parse_index(line) {
                Some(index) => {
                    trace!("SRT index {} at line {}", index, line_no);
                    self.cue.set_index(index);
                }
                None => self.try_timestamp(line_no, line),
            },
            // Only the first index line of a block is recorded
            SrtState::AwaitTime => self.try_timestamp(line_no, line),
        }
    }

    fn flush(&mut self, sink: &mut CueSink) {
        self.cue.flush(sink);
    }
}
