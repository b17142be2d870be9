//! Language-model abstraction layer for finrep.
//!
//! This crate provides a single blocking text-completion interface that the
//! extraction pipeline calls once per document:
//! - `ollama` backend talking to a local Ollama server over HTTP (default)
//!
//! The pipeline only depends on [`LanguageModel`], so tests and alternative
//! providers plug in without touching the core.

mod backend;
mod error;
mod options;

pub use backend::{strip_reasoning, LanguageModel};
pub use error::LlmError;
pub use options::GenerationOptions;

#[cfg(feature = "ollama")]
pub use backend::ollama::OllamaBackend;

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Result type for language-model operations.
pub type Result<T> = std::result::Result<T, LlmError>;
