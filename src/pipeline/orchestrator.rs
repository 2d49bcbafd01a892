/*!
 * Orchestration of the decode and transcribe stages.
 *
 * The decoder and transcriber run as two concurrently executing child
 * processes joined by an OS pipe: the decoder's stdout handle is passed
 * straight to the transcriber's stdin, so audio never flows through this
 * process. Their output and error streams are drained concurrently with the
 * waits; draining sequentially would let a pipe buffer fill and stall the
 * producer.
 */

use std::process::Stdio;
use std::time::Duration;

use log::{debug, info};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::app_config::PipelineConfig;
use crate::errors::PipelineError;
use crate::pipeline::resolver::{AudioResolver, ProcessResolver};
use crate::pipeline::{render_args, AudioSource, PipelineRunResult};

/// Runs the resolve -> decode -> transcribe chain for one request.
#[derive(Debug)]
pub struct TranscriptionPipeline {
    config: PipelineConfig,
    resolver: Box<dyn AudioResolver>,
}

impl TranscriptionPipeline {
    /// Create a pipeline with the process-backed resolver from the config.
    pub fn new(config: PipelineConfig) -> Self {
        let resolver = Box::new(ProcessResolver::from_config(&config));
        TranscriptionPipeline { config, resolver }
    }

    /// Create a pipeline with a custom resolver implementation.
    pub fn with_resolver(config: PipelineConfig, resolver: Box<dyn AudioResolver>) -> Self {
        TranscriptionPipeline { config, resolver }
    }

    /// Run the full stage chain for one audio source.
    ///
    /// A remote source is resolved first; a resolve failure is fatal and no
    /// later stage is started. The configured deadline, when set, covers
    /// the decode and transcribe stages together.
    pub async fn run(&self, source: &AudioSource) -> Result<PipelineRunResult, PipelineError> {
        let input = match source {
            AudioSource::RemoteUrl(url) => {
                info!("Resolving audio stream for remote source");
                self.resolver.resolve(url).await?
            }
            AudioSource::LocalFile(path) => path.to_string_lossy().into_owned(),
        };

        match self.config.timeout_secs {
            Some(secs) => {
                tokio::select! {
                    result = self.decode_and_transcribe(&input) => result,
                    _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                        Err(PipelineError::Unexpected(format!(
                            "pipeline timed out after {}s", secs
                        )))
                    }
                }
            }
            None => self.decode_and_transcribe(&input).await,
        }
    }

    async fn decode_and_transcribe(&self, input: &str) -> Result<PipelineRunResult, PipelineError> {
        let sample_rate = self.config.sample_rate.to_string();
        let decoder_args = render_args(
            &self.config.decoder_args,
            &[("{input}", input), ("{sample_rate}", sample_rate.as_str())],
        );
        let transcriber_args = render_args(
            &self.config.transcriber_args,
            &[("{model}", self.config.model.as_str())],
        );

        debug!("Starting decoder '{}'", self.config.decoder_program);
        let mut decoder = Command::new(&self.config.decoder_program)
            .args(&decoder_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PipelineError::Unexpected(format!(
                    "failed to spawn decoder '{}': {}",
                    self.config.decoder_program, e
                ))
            })?;

        // The decoder's stdout handle moves into the transcriber's stdin so
        // both children share one OS pipe; this process keeps no copy of
        // either pipe end and closing falls to the OS.
        let decoder_stdout = decoder.stdout.take().ok_or_else(|| {
            PipelineError::Unexpected("decoder stdout handle missing".to_string())
        })?;
        let decoder_stdout: Stdio = decoder_stdout.try_into().map_err(|e: std::io::Error| {
            PipelineError::Unexpected(format!("failed to repossess decoder stdout: {}", e))
        })?;

        debug!("Starting transcriber '{}'", self.config.transcriber_program);
        let mut transcriber = Command::new(&self.config.transcriber_program)
            .args(&transcriber_args)
            .stdin(decoder_stdout)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PipelineError::Unexpected(format!(
                    "failed to spawn transcriber '{}': {}",
                    self.config.transcriber_program, e
                ))
            })?;

        let mut transcriber_stdout = transcriber.stdout.take().ok_or_else(|| {
            PipelineError::Unexpected("transcriber stdout handle missing".to_string())
        })?;
        let mut decoder_stderr = decoder.stderr.take().ok_or_else(|| {
            PipelineError::Unexpected("decoder stderr handle missing".to_string())
        })?;
        let mut transcriber_stderr = transcriber.stderr.take().ok_or_else(|| {
            PipelineError::Unexpected("transcriber stderr handle missing".to_string())
        })?;

        // All three streams are drained while both children run.
        let drains = async {
            let mut raw_output = Vec::new();
            let mut decoder_err = String::new();
            let mut transcriber_err = String::new();
            futures::try_join!(
                transcriber_stdout.read_to_end(&mut raw_output),
                decoder_stderr.read_to_string(&mut decoder_err),
                transcriber_stderr.read_to_string(&mut transcriber_err),
            )?;
            Ok::<_, std::io::Error>((raw_output, decoder_err, transcriber_err))
        };

        let ((raw_output, decoder_err, transcriber_err), decoder_status, transcriber_status) =
            tokio::try_join!(drains, decoder.wait(), transcriber.wait()).map_err(|e| {
                PipelineError::Unexpected(format!("pipeline I/O failure: {}", e))
            })?;

        // Statuses are inspected decoder-first regardless of which process
        // finished first, so a decoder failure wins even when the
        // transcriber also failed.
        if !decoder_status.success() {
            return Err(PipelineError::Decode {
                exit_code: decoder_status.code(),
                details: decoder_err.trim().to_string(),
            });
        }
        if !transcriber_status.success() {
            return Err(PipelineError::Transcribe {
                exit_code: transcriber_status.code(),
                details: transcriber_err.trim().to_string(),
            });
        }

        debug!("Transcriber produced {} byte(s) of timed text", raw_output.len());
        Ok(PipelineRunResult { raw_output })
    }
}
