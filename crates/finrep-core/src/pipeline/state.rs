//! Pipeline state and stages.

use std::path::PathBuf;

use crate::error::PipelineError;
use crate::models::{CompanyMetrics, RawFacts};

/// Stage of the document iteration state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pick the document at the cursor, or finish when none remain.
    SelectDocument,
    /// Read the current document's text.
    ExtractText,
    /// Prompt the model and run the extraction cascade.
    ExtractFacts,
    /// Derive ratios, append the record and advance the cursor.
    DeriveAndAccumulate,
    /// Loop back or finalize.
    Decide,
    /// Write the comparison table.
    Finalize,
    /// Comparison written.
    Done,
    /// Run stopped; the state carries the error.
    Aborted,
}

impl Stage {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Aborted)
    }
}

/// Everything the pipeline knows during one run.
///
/// Created once per run. The `current_*`, `extracted_text` and
/// `raw_metrics` fields are scratch space overwritten for each document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    /// Input documents, fixed at start.
    pub pdf_paths: Vec<PathBuf>,

    /// Number of documents processed so far; never exceeds `pdf_paths.len()`.
    pub current_pdf_index: usize,

    /// Document being processed.
    pub current_pdf: Option<PathBuf>,

    /// Text of the current document.
    pub extracted_text: Option<String>,

    /// Company name resolved for the current document.
    pub current_company: Option<String>,

    /// Facts extracted from the current document.
    pub raw_metrics: Option<RawFacts>,

    /// Finalized records in processing order.
    pub company_metrics: Vec<CompanyMetrics>,

    /// Location of the comparison table, set once at the end of a run.
    pub comparison_output_path: Option<PathBuf>,

    /// Terminal failure, if any.
    pub error: Option<PipelineError>,

    /// Human-readable log of pipeline events.
    pub messages: Vec<String>,
}

impl PipelineState {
    /// Fresh state for the given documents.
    pub fn new(pdf_paths: Vec<PathBuf>) -> Self {
        Self {
            pdf_paths,
            ..Self::default()
        }
    }

    /// Number of documents not yet processed.
    pub fn remaining(&self) -> usize {
        self.pdf_paths.len().saturating_sub(self.current_pdf_index)
    }

    pub(crate) fn clear_scratch(&mut self) {
        self.current_pdf = None;
        self.extracted_text = None;
        self.current_company = None;
        self.raw_metrics = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_state() {
        let state = PipelineState::new(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
        assert_eq!(state.current_pdf_index, 0);
        assert_eq!(state.remaining(), 2);
        assert!(state.company_metrics.is_empty());
        assert!(state.comparison_output_path.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Aborted.is_terminal());
        assert!(!Stage::Finalize.is_terminal());
        assert!(!Stage::SelectDocument.is_terminal());
    }
}
