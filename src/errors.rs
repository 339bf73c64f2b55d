/*!
 * Error types for the subnorm crate.
 *
 * The parsing core itself is infallible on data: malformed cues are skipped,
 * never reported. The variants below cover caller contract violations
 * (unknown format tags) and the collaborators around the core (fetching,
 * files, configuration), using the thiserror crate for ergonomic definitions.
 */

use thiserror::Error;

/// Errors raised by the subtitle normalization entry points
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The caller supplied a format tag that is not srt, vtt or ass
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// A parsed document could not be serialized
    #[error("Failed to serialize captions: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SubtitleError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Errors that can occur while fetching a subtitle document
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed or uses an unsupported scheme
    #[error("Invalid subtitle URL: {0}")]
    InvalidUrl(String),

    /// The request could not be sent or the connection failed
    #[error("Subtitle request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status
    #[error("Subtitle server responded with error: {status_code} - {message}")]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be read as text
    #[error("Failed to read subtitle body: {0}")]
    Body(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while fetching a remote document
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from subtitle normalization
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
