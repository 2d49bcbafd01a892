/*!
 * Common test utilities for the signstream test suite
 */

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use signstream::app_config::PipelineConfig;
use signstream::token_extractor::Vocabulary;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample timed-text document for testing
pub fn create_test_vtt(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello world\n\n2\n00:00:05.000 --> 00:00:09.000\nHow are you doing\n\n3\n00:00:10.000 --> 00:00:14.000\nGood thank you\n";
    create_test_file(dir, filename, content)
}

/// A small vocabulary with predictable mappings
pub fn sample_vocabulary() -> Vocabulary {
    let entries: HashMap<String, String> = [
        ("hello", "HELLO"),
        ("world", "WORLD"),
        ("good", "GOOD"),
        ("you", "YOU"),
    ]
    .iter()
    .map(|(word, symbol)| (word.to_string(), symbol.to_string()))
    .collect();
    Vocabulary::new(entries)
}

/// A pipeline configuration whose decode and transcribe stages are shell
/// one-liners, so orchestration can be exercised without the real external
/// tools. The transcriber script reads its stdin from the decoder's stdout
/// through the same OS pipe the production commands use.
pub fn stub_pipeline_config(decoder_script: &str, transcriber_script: &str) -> PipelineConfig {
    PipelineConfig {
        decoder_program: "sh".to_string(),
        decoder_args: vec!["-c".to_string(), decoder_script.to_string()],
        transcriber_program: "sh".to_string(),
        transcriber_args: vec!["-c".to_string(), transcriber_script.to_string()],
        ..PipelineConfig::default()
    }
}
