//! Core library for earnings-report comparison.
//!
//! This crate provides:
//! - PDF text extraction
//! - Fact extraction from model responses (JSON with regex fallback)
//! - Derived ratios (margins, EPS, revenue growth)
//! - The multi-document pipeline and CSV comparison output

pub mod error;
pub mod extraction;
pub mod metrics;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod report;

pub use error::{FinrepError, PdfError, PipelineError, Result};
pub use extraction::{company_name_from_path, extract_facts, ExtractionStrategy, FactCascade};
pub use metrics::{derive, DerivedMetrics};
pub use models::{CompanyMetrics, FinrepConfig, RawFacts};
pub use pdf::{PdfContent, PdfProcessor, PdfTextExtractor, PdfType, TextExtractor};
pub use pipeline::{analyze, DocumentReport, Pipeline, PipelineState, Stage};
#[cfg(feature = "ollama")]
pub use pipeline::OllamaPipeline;
pub use report::{ComparisonWriter, CsvComparisonWriter};

/// Re-export language-model types.
pub use finrep_llm::{LanguageModel, LlmError};

#[cfg(feature = "ollama")]
pub use finrep_llm::OllamaBackend;
