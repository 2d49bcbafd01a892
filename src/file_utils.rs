use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

// @module: File and stdin staging utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a timed-text document from a file, or from stdin when no path
    /// is given.
    pub fn read_document(path: Option<&Path>) -> Result<String> {
        match path {
            Some(path) => Self::read_to_string(path),
            None => {
                let mut content = String::new();
                std::io::stdin()
                    .lock()
                    .read_to_string(&mut content)
                    .context("Failed to read document from stdin")?;
                Ok(content)
            }
        }
    }

    /// Stage audio bytes from a reader into a temporary file the decoder
    /// can read. The returned handle removes the file when dropped, on
    /// every exit path.
    pub fn stage_audio<R: Read + ?Sized>(reader: &mut R) -> Result<NamedTempFile> {
        let mut staged = NamedTempFile::new().context("Failed to create temporary audio file")?;
        std::io::copy(reader, staged.as_file_mut())
            .context("Failed to stage audio to a temporary file")?;
        staged
            .as_file_mut()
            .flush()
            .context("Failed to flush staged audio")?;
        Ok(staged)
    }

    /// Stage audio bytes piped on stdin.
    pub fn stage_stdin_audio() -> Result<NamedTempFile> {
        Self::stage_audio(&mut std::io::stdin().lock())
    }
}
