// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;
use crate::pipeline::AudioSource;

mod app_config;
mod app_controller;
mod caption_processor;
mod errors;
mod file_utils;
mod pipeline;
mod timecode;
mod token_extractor;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe audio into sign tokens (default command)
    Transcribe(TranscribeArgs),

    /// Convert an existing timed-text document into sign tokens
    Translate(TranslateArgs),

    /// Generate shell completions for signstream
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Audio input: a local file, an http(s) video URL, or '-' for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Vocabulary file (JSON object of word -> token symbol)
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// Abort the pipeline after this many seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Timed-text document to convert; reads stdin when omitted
    #[arg(value_name = "DOCUMENT")]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Vocabulary file (JSON object of word -> token symbol)
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// signstream - speech to sign-language tokens
///
/// Converts spoken audio (a local file, stdin bytes, or a remote video URL)
/// into a time-aligned sequence of sign vocabulary tokens.
#[derive(Parser, Debug)]
#[command(name = "signstream")]
#[command(version = "0.1.0")]
#[command(about = "Speech to sign-language token converter")]
#[command(long_about = "signstream runs an external resolve/decode/transcribe pipeline and maps the
resulting captions to sign vocabulary tokens.

EXAMPLES:
    signstream talk.mp3                          # Transcribe a local audio file
    signstream https://example.com/watch?v=abc   # Resolve and transcribe a remote video
    cat talk.wav | signstream -                  # Transcribe audio piped on stdin
    signstream translate captions.vtt            # Convert existing captions to tokens
    signstream completions bash > signstream.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Audio input: a local file, an http(s) video URL, or '-' for stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Vocabulary file (JSON object of word -> token symbol)
    #[arg(short, long)]
    vocabulary: Option<PathBuf>,

    /// Abort the pipeline after this many seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            // Logs go to stderr; stdout carries the JSON response only.
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{:<5}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "signstream", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Transcribe(args)) => run_transcribe(args).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input = cli.input.ok_or_else(|| {
                anyhow::anyhow!("INPUT is required when no subcommand is specified")
            })?;

            let transcribe_args = TranscribeArgs {
                input,
                config_path: cli.config_path,
                vocabulary: cli.vocabulary,
                timeout_secs: cli.timeout_secs,
                log_level: cli.log_level,
            };
            run_transcribe(transcribe_args).await
        }
    }
}

/// Load the configuration, creating a default file when none exists, and
/// apply command-line overrides.
fn load_config(
    config_path: &str,
    log_level: &Option<CliLogLevel>,
    vocabulary: &Option<PathBuf>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config
            .write_to_file(config_path)
            .context(format!("Failed to write default config: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(vocabulary_path) = vocabulary {
        config.vocabulary_path = Some(vocabulary_path.clone());
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_transcribe(options: TranscribeArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level, &options.vocabulary)?;
    if let Some(timeout_secs) = options.timeout_secs {
        config.pipeline.timeout_secs = Some(timeout_secs);
    }

    let controller = Controller::with_config(config)?;

    let result = if options.input == "-" {
        controller.transcribe_stdin().await
    } else if options.input.starts_with("http://") || options.input.starts_with("https://") {
        controller
            .transcribe(AudioSource::RemoteUrl(options.input.clone()))
            .await
    } else {
        let path = PathBuf::from(&options.input);
        if !FileManager::file_exists(&path) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", path));
        }
        controller.transcribe(AudioSource::LocalFile(path)).await
    };

    emit_response(result)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let config = load_config(&options.config_path, &options.log_level, &options.vocabulary)?;
    let controller = Controller::with_config(config)?;

    let content = FileManager::read_document(options.input.as_deref())?;
    let result = controller.translate_document(&content);

    println!("{}", serde_json::to_string_pretty(&result.to_response())?);
    Ok(())
}

/// Print the JSON response for a transcription outcome. Fatal pipeline
/// errors still produce a machine-readable response before the non-zero
/// exit.
fn emit_response(result: Result<app_controller::TranslationResult, errors::AppError>) -> Result<()> {
    match result {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result.to_response())?);
            Ok(())
        }
        Err(error) => {
            error!("Transcription failed: {}", error);
            let stage = match &error {
                errors::AppError::Pipeline(pipeline_error) => pipeline_error.stage_name(),
                _ => "request",
            };
            let response = serde_json::json!({
                "success": false,
                "error": error.to_string(),
                "stage": stage,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
            std::process::exit(1);
        }
    }
}
