//! Document parsing: extraction composed with segmentation.

use crate::error::IngestResult;
use crate::extract::extract_text;
use crate::segmenter::Segmenter;
use relwatch_core::ChangeEntry;
use std::path::Path;
use tracing::debug;

/// Parses release documents into ordered change entries.
pub struct DocumentParser {
    segmenter: Segmenter,
}

impl DocumentParser {
    /// Create a parser around the given segmenter.
    pub fn new(segmenter: Segmenter) -> Self {
        Self { segmenter }
    }

    /// Create a parser with the default rule-based segmenter.
    pub fn with_defaults() -> Self {
        Self::new(Segmenter::with_defaults())
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Extract and segment a document into change entries.
    ///
    /// Extraction errors (`UnsupportedFormat`, `ExtractionFailure`,
    /// `FileNotFound`) propagate unchanged; segmentation itself does not
    /// fail.
    pub fn parse(&self, path: &Path) -> IngestResult<Vec<ChangeEntry>> {
        let text = extract_text(path)?;
        let entries = self.segmenter.segment(&text);

        debug!("Parsed {} change entries from {:?}", entries.len(), path);

        Ok(entries)
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}
