/*!
 * # signstream - speech to sign-language tokens
 *
 * A Rust library converting spoken audio into a time-aligned sequence of
 * sign-language vocabulary tokens.
 *
 * ## Features
 *
 * - Resolve a remote video URL to a direct audio stream via an external
 *   resolver process
 * - Decode and transcribe audio through two child processes joined by an
 *   OS pipe, with concurrent stream draining
 * - Parse timed-text documents (WebVTT and bracketed console layouts) into
 *   ordered caption records, skipping malformed cues
 * - Map caption words to sign vocabulary tokens through a read-only
 *   dictionary
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timecode`: Timestamp string to seconds conversion
 * - `caption_processor`: Timed-text parsing into caption records
 * - `token_extractor`: Vocabulary lookup and token segment derivation
 * - `pipeline`: External process orchestration:
 *   - `pipeline::resolver`: Remote URL to audio stream resolution
 *   - `pipeline::orchestrator`: Decode/transcribe process chain
 * - `app_controller`: Main application controller
 * - `file_utils`: File system and stdin staging operations
 * - `errors`: Custom error types for the application
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
pub mod app_controller;
pub mod caption_processor;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod timecode;
pub mod token_extractor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslationResult};
pub use caption_processor::{CaptionDocument, CaptionRecord, RejectedCue, TimeInterval};
pub use errors::{AppError, CaptionError, PipelineError};
pub use pipeline::{AudioSource, PipelineRunResult, TranscriptionPipeline};
pub use timecode::parse_timestamp;
pub use token_extractor::{SignTokenSegment, Vocabulary};
