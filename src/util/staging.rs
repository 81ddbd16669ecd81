use crate::errors::MyError;
use bytes::Bytes;
use log::warn;
use std::path::{Path, PathBuf};

/// A staged copy of one inbound audio payload.
///
/// Owned by exactly one pipeline invocation; the file is removed when the
/// guard drops, whichever way the invocation ends.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub async fn create(
        dir: &Path,
        key: &str,
        extension: &str,
        payload: &[u8],
    ) -> Result<Self, MyError> {
        let path = dir.join(format!("{key}.{extension}"));
        tokio::fs::write(&path, payload).await.map_err(|e| {
            MyError::Staging(format!("failed to write staged file {}: {e}", path.display()))
        })?;
        Ok(StagedFile { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("audio.bin")
    }

    pub async fn read(&self) -> Result<Bytes, MyError> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            MyError::Staging(format!(
                "failed to read staged file {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Bytes::from(data))
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove staged file {}: {e}", self.path.display());
            }
        }
    }
}

/// File extension for a declared MIME type, for the staged file name.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "audio/ogg" | "audio/oga" | "audio/opus" => "ogg",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/aac" => "aac",
        "audio/webm" => "webm",
        "video/mp4" => "mp4",
        _ => "bin",
    }
}
