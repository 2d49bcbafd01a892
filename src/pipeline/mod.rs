/*!
 * Transcription pipeline: the external resolve -> decode -> transcribe chain.
 *
 * The module is organized as:
 * - `resolver`: trait and process-backed implementation for turning a remote
 *   video URL into a direct audio stream URL
 * - `orchestrator`: spawns the decoder and transcriber joined by an OS pipe,
 *   drains their streams concurrently and aggregates exit statuses
 */

use std::path::PathBuf;

pub mod orchestrator;
pub mod resolver;

pub use orchestrator::TranscriptionPipeline;
pub use resolver::{AudioResolver, ProcessResolver};

/// Input handed to the transcription pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// Remote video URL; the resolve stage runs first
    RemoteUrl(String),
    /// Local audio file fed straight to the decoder
    LocalFile(PathBuf),
}

/// Successful pipeline output.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Raw timed-text bytes collected from the transcriber's stdout
    pub raw_output: Vec<u8>,
}

/// Substitute placeholder variables into an argument template.
pub(crate) fn render_args(template: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            let mut rendered = arg.clone();
            for (placeholder, value) in vars {
                rendered = rendered.replace(placeholder, value);
            }
            rendered
        })
        .collect()
}
