/*!
 * Error types for the signstream application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Recoverable errors raised while parsing a timed-text document.
///
/// These never abort a request: the offending cue is skipped and recorded
/// as a warning while parsing continues on the next line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// The timestamp string could not be converted into seconds
    #[error("invalid timestamp format: '{raw}'")]
    InvalidTimestampFormat {
        /// The raw timestamp string as found in the document
        raw: String,
    },

    /// The line contains a timing separator but does not split into
    /// exactly two timing fields
    #[error("malformed cue line: '{line}'")]
    MalformedCueLine {
        /// The raw cue line as found in the document
        line: String,
    },
}

/// Fatal errors raised by the transcription pipeline.
///
/// A stage failure aborts the whole request; no partial token output is
/// produced. Each variant carries the failing stage's captured error text.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The external resolver failed to produce a direct audio stream URL
    #[error("resolve stage failed: {details}")]
    Resolve {
        /// Exit code of the resolver process, if it ran at all
        exit_code: Option<i32>,
        /// Captured stderr or a description of the failure
        details: String,
    },

    /// The external decoder exited with a non-zero status
    #[error("decode stage failed: {details}")]
    Decode {
        /// Exit code of the decoder process
        exit_code: Option<i32>,
        /// Captured stderr of the decoder
        details: String,
    },

    /// The external transcriber exited with a non-zero status
    #[error("transcribe stage failed: {details}")]
    Transcribe {
        /// Exit code of the transcriber process
        exit_code: Option<i32>,
        /// Captured stderr of the transcriber
        details: String,
    },

    /// Any other orchestration failure (spawn errors, missing stdio
    /// handles, I/O failures, deadline exceeded)
    #[error("pipeline failure: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Name of the failing stage, for structured error reporting.
    pub fn stage_name(&self) -> &'static str {
        match self {
            Self::Resolve { .. } => "resolve",
            Self::Decode { .. } => "decode",
            Self::Transcribe { .. } => "transcribe",
            Self::Unexpected(_) => "pipeline",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from caption parsing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error from the transcription pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
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
