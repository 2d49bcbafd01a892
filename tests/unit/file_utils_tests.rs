/*!
 * Tests for file and audio staging utilities
 */

use std::io::Cursor;

use anyhow::Result;
use signstream::file_utils::FileManager;

use crate::common;

/// Test that staged audio bytes land in the temporary file verbatim
#[test]
fn test_stage_audio_withReaderBytes_shouldWriteAllBytes() -> Result<()> {
    let mut reader = Cursor::new(b"pcm-bytes".to_vec());

    let staged = FileManager::stage_audio(&mut reader)?;

    assert_eq!(std::fs::read(staged.path())?, b"pcm-bytes");
    Ok(())
}

/// Test that the staged file is removed when the handle drops
#[test]
fn test_stage_audio_whenHandleDropped_shouldRemoveFile() -> Result<()> {
    let mut reader = Cursor::new(b"pcm-bytes".to_vec());
    let staged = FileManager::stage_audio(&mut reader)?;
    let path = staged.path().to_path_buf();
    assert!(path.exists());

    drop(staged);

    assert!(!path.exists());
    Ok(())
}

/// Test reading a document from a file path
#[test]
fn test_read_document_withFilePath_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "captions.vtt",
        "WEBVTT\n",
    )?;

    let content = FileManager::read_document(Some(&path))?;

    assert_eq!(content, "WEBVTT\n");
    Ok(())
}
