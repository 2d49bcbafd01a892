/*!
 * Audio stream resolution for remote sources.
 *
 * The resolver is the one pipeline stage behind a trait so tests can
 * substitute a mock and observe that later stages are not started after a
 * resolve failure.
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

use crate::app_config::PipelineConfig;
use crate::errors::PipelineError;

/// Resolves a remote video URL into a direct, time-limited audio stream URL.
#[async_trait]
pub trait AudioResolver: Send + Sync + Debug {
    /// Resolve `url` to a direct stream URL.
    ///
    /// # Returns
    /// * `Result<String, PipelineError>` - The stream URL, or a fatal
    ///   `PipelineError::Resolve`
    async fn resolve(&self, url: &str) -> Result<String, PipelineError>;
}

/// Resolver backed by an external process (yt-dlp by default).
#[derive(Debug, Clone)]
pub struct ProcessResolver {
    program: String,
    args: Vec<String>,
    timeout_secs: Option<u64>,
}

impl ProcessResolver {
    /// Build a resolver from the pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        ProcessResolver {
            program: config.resolver_program.clone(),
            args: config.resolver_args.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

#[async_trait]
impl AudioResolver for ProcessResolver {
    async fn resolve(&self, url: &str) -> Result<String, PipelineError> {
        let args = super::render_args(&self.args, &[("{url}", url)]);
        debug!("Resolving stream URL via '{}'", self.program);

        let output_future = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let output = match self.timeout_secs {
            Some(secs) => {
                tokio::select! {
                    result = output_future => result,
                    _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                        return Err(PipelineError::Resolve {
                            exit_code: None,
                            details: format!("resolver timed out after {}s", secs),
                        });
                    }
                }
            }
            None => output_future.await,
        }
        .map_err(|e| PipelineError::Resolve {
            exit_code: None,
            details: format!("failed to run '{}': {}", self.program, e),
        })?;

        if !output.status.success() {
            return Err(PipelineError::Resolve {
                exit_code: output.status.code(),
                details: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stream_url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stream_url.is_empty() {
            return Err(PipelineError::Resolve {
                exit_code: output.status.code(),
                details: "resolver produced no stream URL".to_string(),
            });
        }

        info!("Resolved direct audio stream URL");
        Ok(stream_url)
    }
}
