use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// External process pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Path to a JSON vocabulary file (word -> token symbol); the built-in
    /// table is used when unset
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            vocabulary_path: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| anyhow!("Failed to open config file {}: {}", path.display(), e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Write configuration to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.resolver_program.trim().is_empty() {
            return Err(anyhow!("Resolver program must not be empty"));
        }
        if self.pipeline.decoder_program.trim().is_empty() {
            return Err(anyhow!("Decoder program must not be empty"));
        }
        if self.pipeline.transcriber_program.trim().is_empty() {
            return Err(anyhow!("Transcriber program must not be empty"));
        }
        if self.pipeline.model.trim().is_empty() {
            return Err(anyhow!("Transcription model must not be empty"));
        }
        if self.pipeline.sample_rate == 0 {
            return Err(anyhow!("Sample rate must be greater than zero"));
        }
        if self.pipeline.timeout_secs == Some(0) {
            return Err(anyhow!(
                "Pipeline timeout must be greater than zero when set (omit it to wait indefinitely)"
            ));
        }
        Ok(())
    }
}

/// Configuration of the external resolve -> decode -> transcribe chain.
///
/// Argument templates may reference `{url}` (resolver), `{input}` and
/// `{sample_rate}` (decoder), and `{model}` (transcriber); placeholders are
/// substituted at spawn time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Program resolving a remote video URL to a direct audio stream URL
    #[serde(default = "default_resolver_program")]
    pub resolver_program: String,

    /// Argument template for the resolver
    #[serde(default = "default_resolver_args")]
    pub resolver_args: Vec<String>,

    /// Program decoding the input into mono uncompressed audio on stdout
    #[serde(default = "default_decoder_program")]
    pub decoder_program: String,

    /// Argument template for the decoder
    #[serde(default = "default_decoder_args")]
    pub decoder_args: Vec<String>,

    /// Program transcribing audio from stdin into timed text on stdout
    #[serde(default = "default_transcriber_program")]
    pub transcriber_program: String,

    /// Argument template for the transcriber
    #[serde(default = "default_transcriber_args")]
    pub transcriber_args: Vec<String>,

    /// Transcription model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Decoder output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Whole-pipeline deadline in seconds; unset waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolver_program: default_resolver_program(),
            resolver_args: default_resolver_args(),
            decoder_program: default_decoder_program(),
            decoder_args: default_decoder_args(),
            transcriber_program: default_transcriber_program(),
            transcriber_args: default_transcriber_args(),
            model: default_model(),
            sample_rate: default_sample_rate(),
            timeout_secs: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_resolver_program() -> String {
    "yt-dlp".to_string()
}

fn default_resolver_args() -> Vec<String> {
    vec![
        "-f".to_string(),
        "bestaudio".to_string(),
        "-g".to_string(),
        "{url}".to_string(),
    ]
}

fn default_decoder_program() -> String {
    "ffmpeg".to_string()
}

fn default_decoder_args() -> Vec<String> {
    vec![
        "-i".to_string(),
        "{input}".to_string(),
        "-f".to_string(),
        "wav".to_string(),
        "-ar".to_string(),
        "{sample_rate}".to_string(),
        "-ac".to_string(),
        "1".to_string(),
        "-".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ]
}

fn default_transcriber_program() -> String {
    "whisper".to_string()
}

fn default_transcriber_args() -> Vec<String> {
    vec![
        "-".to_string(),
        "--model".to_string(),
        "{model}".to_string(),
        "--output_format".to_string(),
        "vtt".to_string(),
    ]
}

fn default_model() -> String {
    "base".to_string()
}

fn default_sample_rate() -> u32 {
    16_000
}
