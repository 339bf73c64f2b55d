/*!
 * Subtitle normalization.
 *
 * Turns an SRT, WebVTT or ASS/SSA document into one ordered
 * [`ParsedDocument`] of [`CaptionEntry`] values with canonical
 * `HH:MM:SS,mmm` timestamps and plain single-line text.
 *
 * The dispatcher rewrites line endings to LF and hands the text to the
 * sub-parser for the caller-declared format. Content is never sniffed.
 * Parsing is pure and best-effort: malformed cues are skipped, and a document
 * without usable cues yields an empty result.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;

pub mod ass;
pub mod cue;
pub mod sanitizer;
pub mod srt;
pub mod timecodes;
pub mod vtt;

/// Supported subtitle container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// WebVTT
    Vtt,
    /// Advanced SubStation Alpha / SubStation Alpha
    Ass,
}

impl SubtitleFormat {
    pub const ALL: [SubtitleFormat; 3] = [Self::Srt, Self::Vtt, Self::Ass];

    /// Lowercase format tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Ass => "ass",
        }
    }

    /// File extensions that carry this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Srt => &["srt"],
            Self::Vtt => &["vtt"],
            Self::Ass => &["ass", "ssa"],
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().iter().any(|candidate| *candidate == ext))
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "ass" | "ssa" => Ok(Self::Ass),
            _ => Err(SubtitleError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// One normalized caption
///
/// Serialized as `{"id", "from", "to", "content"}` plus `"index"` when the
/// source declared a numeric cue index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Emission order, starting at 1
    #[serde(rename = "id")]
    pub sequence_id: usize,

    /// Canonical start timestamp
    #[serde(rename = "from")]
    pub start: String,

    /// Canonical end timestamp
    #[serde(rename = "to")]
    pub end: String,

    /// Sanitized single-line text, never empty
    #[serde(rename = "content")]
    pub text: String,

    /// Index declared by the source (SRT index, numeric WebVTT identifier)
    #[serde(rename = "index", default, skip_serializing_if = "Option::is_none")]
    pub source_index: Option<u64>,
}

impl CaptionEntry {
    pub fn new(sequence_id: usize, start: impl Into<String>, end: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sequence_id,
            start: start.into(),
            end: end.into(),
            text: text.into(),
            source_index: None,
        }
    }

    pub fn with_source_index(mut self, index: u64) -> Self {
        self.source_index = Some(index);
        self
    }

    /// Start time in milliseconds; fails for non-canonical timestamps
    pub fn start_ms(&self) -> anyhow::Result<u64> {
        timecodes::canonical_to_ms(&self.start)
    }

    /// End time in milliseconds; fails for non-canonical timestamps
    pub fn end_ms(&self) -> anyhow::Result<u64> {
        timecodes::canonical_to_ms(&self.end)
    }

    /// Duration in milliseconds, zero when the range is inverted
    pub fn duration_ms(&self) -> anyhow::Result<u64> {
        Ok(self.end_ms()?.saturating_sub(self.start_ms()?))
    }
}

/// SubRip block
impl fmt::Display for CaptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.sequence_id)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Captions in playback (source) order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedDocument {
    entries: Vec<CaptionEntry>,
}

impl ParsedDocument {
    pub fn from_entries(entries: Vec<CaptionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CaptionEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionEntry> {
        self.entries.iter()
    }

    /// JSON array of entries
    pub fn to_json(&self, pretty: bool) -> Result<String, SubtitleError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Re-emit as SubRip
    pub fn to_srt(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }
}

impl IntoIterator for ParsedDocument {
    type Item = CaptionEntry;
    type IntoIter = std::vec::IntoIter<CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedDocument {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ParsedDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parsed Document")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            writeln!(f, "Span: {} --> {}", first.start, last.end)?;
        }
        Ok(())
    }
}

/// Rewrite CRLF and lone CR to LF
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalize a subtitle document of the given format
pub fn normalize(content: &str, format: SubtitleFormat) -> ParsedDocument {
    let content = normalize_line_endings(content);

    let document = match format {
        SubtitleFormat::Srt => cue::run(srt::SrtParser::new(), &content),
        SubtitleFormat::Vtt => cue::run(vtt::VttParser::new(), &content),
        SubtitleFormat::Ass => cue::run(ass::AssParser::new(), &content),
    };

    if document.is_empty() && !content.trim().is_empty() {
        warn!("No {} captions found in a non-empty document", format);
    } else {
        debug!("Normalized {} {} captions", document.len(), format);
    }

    document
}

/// Normalize with a textual format tag (`srt`, `vtt`, `ass`)
pub fn normalize_tagged(content: &str, format: &str) -> Result<ParsedDocument, SubtitleError> {
    let format: SubtitleFormat = format.parse()?;
    Ok(normalize(content, format))
}
