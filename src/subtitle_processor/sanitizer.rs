/*!
 * Cue text sanitization shared by every sub-parser.
 *
 * Override blocks such as `{\an8}` or `{\pos(10,20)}` are removed, ASS
 * escape sequences become spaces, and the result is trimmed. SRT and WebVTT
 * text goes through the same routine with no escape set enabled.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Any brace-delimited block, `{\an8}`, `{\b1}` or a plain `{comment}`
static OVERRIDE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]*\}").unwrap()
});

/// ASS soft/hard line breaks and the hard space
static ASS_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[Nnh]").unwrap()
});

/// Which escape sequences a format uses inside cue text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeSet {
    /// No escapes (SRT, WebVTT)
    None,
    /// `\N`, `\n` and `\h` (ASS/SSA)
    Ass,
}

/// Strips styling from raw cue text, leaving a single logical line
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    escapes: EscapeSet,
}

impl Sanitizer {
    /// Sanitizer for SRT and WebVTT content lines
    pub const PLAIN: Sanitizer = Sanitizer::new(EscapeSet::None);

    /// Sanitizer for ASS `Text` fields
    pub const ASS: Sanitizer = Sanitizer::new(EscapeSet::Ass);

    pub const fn new(escapes: EscapeSet) -> Self {
        Self { escapes }
    }

    pub fn escapes(&self) -> EscapeSet {
        self.escapes
    }

    /// Clean one piece of cue text
    pub fn clean(&self, raw: &str) -> String {
        let stripped = OVERRIDE_BLOCK_REGEX.replace_all(raw, "");

        match self.escapes {
            EscapeSet::None => stripped.trim().to_string(),
            EscapeSet::Ass => {
                // Unbalanced braces left behind by malformed override blocks
                let unbraced: String = stripped.chars().filter(|c| *c != '{' && *c != '}').collect();
                ASS_ESCAPE_REGEX.replace_all(&unbraced, " ").trim().to_string()
            }
        }
    }
}
