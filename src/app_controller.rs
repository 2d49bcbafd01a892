/*!
 * Application controller tying the pipeline and parsers together.
 *
 * All state here is request-scoped apart from the read-only vocabulary,
 * which is loaded once at construction.
 */

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::app_config::Config;
use crate::caption_processor::CaptionDocument;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::pipeline::{AudioSource, TranscriptionPipeline};
use crate::token_extractor::{segments_from_records, SignTokenSegment, Vocabulary};

/// Whole-request output: token segments plus the cues that were skipped.
#[derive(Debug, Serialize)]
pub struct TranslationResult {
    /// Time-aligned token segments in source order
    pub segments: Vec<SignTokenSegment>,
    /// Raw timing lines of cues rejected during parsing
    pub rejected_cues: Vec<String>,
}

impl TranslationResult {
    /// Response shape consumed by the sign rendering frontend.
    ///
    /// `warnings` is present only when at least one cue was rejected.
    pub fn to_response(&self) -> Value {
        let mut response = serde_json::json!({
            "success": true,
            "signTokens": self.segments,
        });
        if !self.rejected_cues.is_empty() {
            response["warnings"] = Value::String(format!(
                "Skipped {} invalid timestamps",
                self.rejected_cues.len()
            ));
        }
        response
    }
}

/// Main application controller
pub struct Controller {
    config: Config,
    vocabulary: Vocabulary,
}

impl Controller {
    /// Create a controller, loading the vocabulary from the configured
    /// file or falling back to the built-in table.
    pub fn with_config(config: Config) -> Result<Self> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => Vocabulary::from_file(path)?,
            None => Vocabulary::builtin(),
        };
        info!("Loaded vocabulary with {} entries", vocabulary.len());
        Ok(Controller { config, vocabulary })
    }

    /// The vocabulary in use for this controller.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Run the full transcription pipeline for one source and convert the
    /// resulting timed text into token segments.
    ///
    /// A stage failure aborts with no partial token output.
    pub async fn transcribe(&self, source: AudioSource) -> Result<TranslationResult, AppError> {
        let pipeline = TranscriptionPipeline::new(self.config.pipeline.clone());
        let run = pipeline.run(&source).await?;
        let content = String::from_utf8_lossy(&run.raw_output);
        Ok(self.translate_document(&content))
    }

    /// Transcribe audio bytes piped on stdin.
    ///
    /// The bytes are staged into a temporary file which is removed when the
    /// staging handle drops, whether the pipeline succeeded or not.
    pub async fn transcribe_stdin(&self) -> Result<TranslationResult, AppError> {
        let staged = FileManager::stage_stdin_audio()?;
        self.transcribe_staged(staged).await
    }

    /// Transcribe audio bytes from an arbitrary reader, staging them the
    /// same way stdin input is staged.
    pub async fn transcribe_reader<R>(&self, reader: &mut R) -> Result<TranslationResult, AppError>
    where
        R: std::io::Read + Send + ?Sized,
    {
        let staged = FileManager::stage_audio(reader)?;
        self.transcribe_staged(staged).await
    }

    // The staging handle is owned here so the temporary file outlives the
    // pipeline run and is removed on every return path.
    async fn transcribe_staged(
        &self,
        staged: tempfile::NamedTempFile,
    ) -> Result<TranslationResult, AppError> {
        let source = AudioSource::LocalFile(staged.path().to_path_buf());
        self.transcribe(source).await
    }

    /// Convert a caller-supplied timed-text document into token segments,
    /// bypassing the process pipeline entirely.
    ///
    /// Malformed cues only shrink the output; this operation never fails.
    pub fn translate_document(&self, content: &str) -> TranslationResult {
        let document = CaptionDocument::parse(content);
        if !document.rejected.is_empty() {
            warn!(
                "Skipped {} cue(s) with unparsable timing",
                document.rejected.len()
            );
        }

        let segments = segments_from_records(&document.records, &self.vocabulary);
        info!(
            "Produced {} token segment(s) from {} caption(s)",
            segments.len(),
            document.records.len()
        );

        TranslationResult {
            segments,
            rejected_cues: document
                .rejected
                .into_iter()
                .map(|cue| cue.raw_line)
                .collect(),
        }
    }
}
