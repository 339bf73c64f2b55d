/*!
 * # subnorm - Subtitle normalization
 *
 * A Rust library that turns SRT, WebVTT and ASS/SSA subtitle documents into
 * one format-agnostic, ordered sequence of timed captions.
 *
 * ## Features
 *
 * - One entry point for three formats, selected by the caller:
 *   - SRT (SubRip)
 *   - WebVTT
 *   - ASS/SSA (Advanced SubStation Alpha)
 * - Canonical `HH:MM:SS,mmm` timestamps regardless of source format
 * - Styling override blocks and ASS line-break escapes stripped from text
 * - Best-effort parsing: malformed cues are skipped, never fatal
 * - Optional HTTP fetching of remote subtitle files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: Format dispatcher and data model:
 *   - `subtitle_processor::srt`, `vtt`, `ass`: Format sub-parsers
 *   - `subtitle_processor::cue`: Shared accumulator and parser driver
 *   - `subtitle_processor::sanitizer`: Cue text cleaning
 *   - `subtitle_processor::timecodes`: Timestamp normalization
 * - `fetch`: Remote document retrieval
 * - `file_utils`: File system operations
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## Example
 *
 * ```
 * use subnorm::{normalize, SubtitleFormat};
 *
 * let doc = normalize("1\n00:00:01,000 --> 00:00:02,000\n{\\an8}Hello\n", SubtitleFormat::Srt);
 * assert_eq!(doc.entries()[0].text, "Hello");
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod fetch;
pub mod file_utils;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, FetchError, SubtitleError};
pub use fetch::{HttpFetcher, TextFetcher, fetch_and_normalize};
pub use subtitle_processor::{CaptionEntry, ParsedDocument, SubtitleFormat, normalize, normalize_tagged};
