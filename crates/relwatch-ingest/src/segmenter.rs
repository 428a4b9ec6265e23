//! Sentence segmentation for extracted document text.
//!
//! The segmentation capability is injected rather than held as hidden
//! process-wide state, so callers can substitute a test double or a
//! degraded fallback. When a degraded splitter is in use the segmenter
//! says so explicitly instead of silently changing behavior.

use relwatch_core::ChangeEntry;
use tracing::warn;

/// Whether the segmenter is running its real capability or a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterMode {
    /// The configured sentence-boundary capability is active.
    Full,
    /// A degraded fallback is active (e.g. whole-text spans).
    Degraded,
}

/// An injectable sentence-boundary capability.
///
/// Implementations produce candidate spans in document order and must be
/// deterministic: the same text always yields the same spans.
pub trait SentenceSplitter: Send + Sync {
    /// Split text into candidate sentence spans, in document order.
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// The mode this splitter operates in.
    fn mode(&self) -> SegmenterMode {
        SegmenterMode::Full
    }
}

/// Default splitter: breaks after `.`, `!` or `?` when followed by
/// whitespace or end of input.
pub struct RuleSplitter;

impl RuleSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut spans = Vec::new();
        let mut start = 0;

        for (i, c) in text.char_indices() {
            if c == '.' || c == '!' || c == '?' {
                let next_idx = i + c.len_utf8();
                let at_boundary = next_idx >= text.len()
                    || text[next_idx..]
                        .chars()
                        .next()
                        .is_some_and(|n| n.is_whitespace());
                if at_boundary {
                    spans.push(&text[start..next_idx]);
                    start = next_idx;
                }
            }
        }

        if start < text.len() {
            spans.push(&text[start..]);
        }

        spans
    }
}

/// Degraded fallback splitter: the whole input as a single span.
///
/// Used when no real segmentation capability is available; keeps `segment`
/// deterministic instead of failing, but reports itself as degraded.
pub struct WholeTextSplitter;

impl SentenceSplitter for WholeTextSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        vec![text]
    }

    fn mode(&self) -> SegmenterMode {
        SegmenterMode::Degraded
    }
}

/// Splits extracted text into ordered, non-empty change entries.
pub struct Segmenter {
    splitter: Box<dyn SentenceSplitter>,
    mode: SegmenterMode,
}

impl Segmenter {
    /// Create a segmenter around the given capability.
    ///
    /// A degraded capability is accepted but logged, so the fallback is
    /// never silent.
    pub fn new(splitter: Box<dyn SentenceSplitter>) -> Self {
        let mode = splitter.mode();
        if mode == SegmenterMode::Degraded {
            warn!("Sentence segmentation running in degraded mode; documents will not be split into sentences");
        }
        Self { splitter, mode }
    }

    /// Create a segmenter with the default rule-based splitter.
    pub fn with_defaults() -> Self {
        Self::new(Box::new(RuleSplitter::new()))
    }

    pub fn mode(&self) -> SegmenterMode {
        self.mode
    }

    /// Segment text into change entries.
    ///
    /// Spans are trimmed and empty spans discarded; source order is
    /// preserved and nothing is deduplicated. Empty or whitespace-only
    /// input yields an empty sequence.
    pub fn segment(&self, text: &str) -> Vec<ChangeEntry> {
        self.splitter
            .split(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ChangeEntry::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_two_sentences() {
        let segmenter = Segmenter::with_defaults();
        let entries = segmenter.segment("Added login flow. Fixed crash on logout.");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Added login flow.");
        assert_eq!(entries[1].text, "Fixed crash on logout.");
    }

    #[test]
    fn test_segment_empty_input() {
        let segmenter = Segmenter::with_defaults();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("   ").is_empty());
        assert!(segmenter.segment("\n\n\t").is_empty());
    }

    #[test]
    fn test_segment_preserves_order() {
        let segmenter = Segmenter::with_defaults();
        let text = "First change. Second change. Third change. Second change.";
        let entries = segmenter.segment(text);

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "First change.",
                "Second change.",
                "Third change.",
                "Second change."
            ]
        );
    }

    #[test]
    fn test_segment_trailing_fragment() {
        let segmenter = Segmenter::with_defaults();
        let entries = segmenter.segment("Done. And one more thing");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "And one more thing");
    }

    #[test]
    fn test_segment_mixed_terminators() {
        let segmenter = Segmenter::with_defaults();
        let entries = segmenter.segment("Fixed it! Really? Yes.");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].text, "Fixed it!");
        assert_eq!(entries[1].text, "Really?");
        assert_eq!(entries[2].text, "Yes.");
    }

    #[test]
    fn test_segment_newline_boundaries() {
        let segmenter = Segmenter::with_defaults();
        let entries = segmenter.segment("Added login flow.\nFixed crash on logout.\n");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Added login flow.");
        assert_eq!(entries[1].text, "Fixed crash on logout.");
    }

    #[test]
    fn test_no_split_inside_version_numbers() {
        let segmenter = Segmenter::with_defaults();
        // Periods not followed by whitespace do not end a sentence.
        let entries = segmenter.segment("Upgraded to v2.4.1 today.");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Upgraded to v2.4.1 today.");
    }

    #[test]
    fn test_degraded_splitter_reports_mode() {
        let segmenter = Segmenter::new(Box::new(WholeTextSplitter));
        assert_eq!(segmenter.mode(), SegmenterMode::Degraded);

        let entries = segmenter.segment("One. Two. Three.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "One. Two. Three.");
    }

    #[test]
    fn test_default_splitter_reports_full_mode() {
        let segmenter = Segmenter::with_defaults();
        assert_eq!(segmenter.mode(), SegmenterMode::Full);
    }

    #[test]
    fn test_segment_deterministic() {
        let segmenter = Segmenter::with_defaults();
        let text = "Shipped dark mode. Removed legacy API.";
        assert_eq!(segmenter.segment(text), segmenter.segment(text));
    }
}
