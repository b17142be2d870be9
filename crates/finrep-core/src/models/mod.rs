//! Data models shared across the pipeline.

pub mod config;
pub mod facts;

pub use config::{ExtractionConfig, FinrepConfig, LlmConfig, OutputConfig};
pub use facts::{CompanyMetrics, RawFacts, COMPARISON_COLUMNS};
