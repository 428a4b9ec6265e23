//! Relwatch Ingest - Release document ingestion pipeline.
//!
//! This crate provides:
//! - Text extraction from PDF and Word documents
//! - Sentence segmentation into change entries
//! - A folder watcher that parses newly created documents

mod error;
mod extract;
mod parser;
mod segmenter;
mod watcher;

pub use error::{IngestError, IngestResult};
pub use extract::extract_text;
pub use parser::DocumentParser;
pub use segmenter::{RuleSplitter, Segmenter, SegmenterMode, SentenceSplitter, WholeTextSplitter};
pub use watcher::{ChangeSink, FolderWatcher, LogSink, WatchState};
