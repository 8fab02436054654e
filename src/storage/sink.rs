//! File Sink
//!
//! Writes an uploaded document into the upload directory and hands back the
//! resolved absolute path that goes into the ingest event.

use super::types::UploadedDocument;
use crate::error::{AppError, AppResult};

use std::path::{Path, PathBuf};

/// Accepted document extensions (compared case-insensitively).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

const MAX_FILENAME_BYTES: usize = 255;

pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Persists `bytes` as `directory/filename` and returns the absolute path.
    ///
    /// Creating the directory is idempotent. An existing file with the same
    /// name is replaced.
    pub async fn save(&self, bytes: &[u8], filename: &str) -> AppResult<PathBuf> {
        let filename = validate_filename(filename)?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| AppError::Io {
                path: self.directory.clone(),
                source,
            })?;

        let path = self.directory.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })?;

        let resolved = tokio::fs::canonicalize(&path)
            .await
            .map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Saved {} ({} bytes)", resolved.display(), bytes.len());
        Ok(resolved)
    }

    pub async fn save_document(&self, document: UploadedDocument) -> AppResult<PathBuf> {
        self.save(&document.bytes, &document.filename).await
    }
}

/// Returns the trimmed filename if it is a plain document name.
pub fn validate_filename(filename: &str) -> AppResult<&str> {
    let name = filename.trim();

    if name.is_empty() {
        return Err(AppError::Validation("filename cannot be empty".into()));
    }
    if name.len() > MAX_FILENAME_BYTES {
        return Err(AppError::Validation("filename is too long".into()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(AppError::Validation(
            "filename must not contain path separators".into(),
        ));
    }
    if name == "." || name == ".." || name.contains('\0') {
        return Err(AppError::Validation(format!("invalid filename '{}'", name)));
    }

    let has_document_extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    // A bare ".pdf" is a hidden file without an extension.
    if !has_document_extension {
        return Err(AppError::Validation(format!(
            "'{}' is not a PDF document",
            name
        )));
    }

    Ok(name)
}
