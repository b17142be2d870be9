//! Multi-document comparison pipeline.

mod accumulator;
mod controller;
mod state;

pub use accumulator::{accumulate, company_record};
pub use controller::{check_inputs, into_output, DocumentReport, Pipeline};
pub use state::{PipelineState, Stage};

use std::path::PathBuf;

use finrep_llm::LanguageModel;

use crate::error::Result;
use crate::pdf::TextExtractor;
use crate::report::ComparisonWriter;

/// Analyze `paths` with the given collaborators and return the location of
/// the comparison table.
///
/// Fails before reading anything if a path does not exist, and with a
/// [`crate::PipelineError`] if the run aborts.
pub fn analyze<X, M, W>(paths: &[PathBuf], extractor: X, model: M, writer: W) -> Result<PathBuf>
where
    X: TextExtractor,
    M: LanguageModel,
    W: ComparisonWriter,
{
    Pipeline::new(extractor, model, writer).analyze(paths)
}

#[cfg(feature = "ollama")]
mod ollama {
    use std::time::Duration;

    use finrep_llm::{GenerationOptions, OllamaBackend};

    use super::Pipeline;
    use crate::error::Result;
    use crate::extraction::FactCascade;
    use crate::models::{FinrepConfig, LlmConfig};
    use crate::pdf::PdfTextExtractor;
    use crate::report::CsvComparisonWriter;

    /// Ollama backend for the configured server and model.
    pub fn backend_from_config(config: &LlmConfig) -> Result<OllamaBackend> {
        let mut options = GenerationOptions::default().with_temperature(config.temperature);
        if let Some(max_tokens) = config.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        let backend = OllamaBackend::with_timeout(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )?
        .with_options(options);
        Ok(backend)
    }

    /// Pipeline reading PDFs from disk, prompting Ollama and writing CSV.
    pub type OllamaPipeline = Pipeline<PdfTextExtractor, OllamaBackend, CsvComparisonWriter>;

    impl OllamaPipeline {
        /// Build the standard pipeline from configuration.
        pub fn from_config(config: &FinrepConfig) -> Result<Self> {
            let model = backend_from_config(&config.llm)?;
            let cascade =
                FactCascade::default().with_fallback_company(&config.extraction.fallback_company);

            Ok(Pipeline::new(
                PdfTextExtractor::new(),
                model,
                CsvComparisonWriter::new(&config.output.output_dir),
            )
            .with_cascade(cascade)
            .with_max_prompt_chars(config.extraction.max_prompt_chars))
        }
    }
}

#[cfg(feature = "ollama")]
pub use ollama::{backend_from_config, OllamaPipeline};
