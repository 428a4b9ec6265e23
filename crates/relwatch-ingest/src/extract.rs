//! Text extraction from release documents.
//!
//! Dispatches on file extension to a format-specific extractor. Both
//! extractors are treated as black boxes: they either return the full
//! document text or fail loudly, never a silently truncated result.

use crate::error::{IngestError, IngestResult};
use relwatch_core::DocKind;
use std::path::Path;
use tracing::debug;

/// Extract the full text of a document, dispatching by extension.
///
/// Fails with `UnsupportedFormat` for anything other than `.pdf`/`.docx`
/// and with `ExtractionFailure` when the underlying extractor rejects the
/// file (corrupt or unreadable input).
pub fn extract_text(path: &Path) -> IngestResult<String> {
    let kind = DocKind::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if !path.exists() {
        return Err(IngestError::FileNotFound(path.to_path_buf()));
    }

    debug!("Extracting text from {:?} ({})", path, kind);

    match kind {
        DocKind::Pdf => extract_pdf(path),
        DocKind::Docx => extract_docx(path),
    }
}

fn extract_pdf(path: &Path) -> IngestResult<String> {
    let text = pdf_extract::extract_text(path).map_err(|e| IngestError::ExtractionFailure {
        path: path.to_path_buf(),
        message: format!("Failed to extract text from PDF: {}", e),
    })?;

    debug!("Extracted {} characters from PDF", text.len());

    Ok(text)
}

/// Extract paragraph text from a DOCX file, joined with newlines.
fn extract_docx(path: &Path) -> IngestResult<String> {
    let bytes = std::fs::read(path)?;

    let doc = docx_rs::read_docx(&bytes).map_err(|e| IngestError::ExtractionFailure {
        path: path.to_path_buf(),
        message: format!("Failed to read DOCX: {}", e),
    })?;

    let mut paragraphs = Vec::new();

    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut paragraph = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            paragraph.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(paragraph);
        }
    }

    let text = paragraphs.join("\n");

    debug!("Extracted {} characters from DOCX", text.len());

    Ok(text)
}
