//! Error types for the ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur during ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Extraction failed for {path}: {message}")]
    ExtractionFailure { path: PathBuf, message: String },

    #[error("Watch setup error: {0}")]
    WatchSetup(String),
}
