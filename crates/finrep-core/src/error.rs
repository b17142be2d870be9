//! Error types for the finrep-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the finrep library.
#[derive(Error, Debug)]
pub enum FinrepError {
    /// An input document does not exist. Reported before any processing.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The pipeline reached its aborted state.
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Language-model backend error.
    #[error("model error: {0}")]
    Llm(#[from] finrep_llm::LlmError),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the file from disk.
    #[error("failed to read file: {0}")]
    Read(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Terminal failures of the document pipeline.
///
/// Stored in the pipeline state, hence `Clone` and string causes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A document could not be read. Fatal for the whole run.
    #[error("failed to read {}: {reason}", path.display())]
    DocumentRead { path: PathBuf, reason: String },

    /// No document produced a record.
    #[error("no metrics to compare")]
    NoMetrics,

    /// The comparison table could not be written.
    #[error("failed to write comparison: {0}")]
    Output(String),
}

/// Result type for the finrep library.
pub type Result<T> = std::result::Result<T, FinrepError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_read_message_names_path() {
        let err = PipelineError::DocumentRead {
            path: PathBuf::from("data/inputs/globex_q1.pdf"),
            reason: "PDF has no pages".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read data/inputs/globex_q1.pdf: PDF has no pages"
        );
    }

    #[test]
    fn test_no_metrics_is_distinct() {
        let err: FinrepError = PipelineError::NoMetrics.into();
        assert_eq!(err.to_string(), "pipeline error: no metrics to compare");
    }
}
