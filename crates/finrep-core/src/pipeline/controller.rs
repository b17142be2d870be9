//! Document iteration state machine.

use std::path::{Path, PathBuf};

use finrep_llm::LanguageModel;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::accumulator::{accumulate, company_record};
use super::state::{PipelineState, Stage};
use crate::error::{FinrepError, PipelineError, Result};
use crate::extraction::{build_prompt, FactCascade, DEFAULT_MAX_PROMPT_CHARS};
use crate::models::{CompanyMetrics, RawFacts};
use crate::pdf::TextExtractor;
use crate::report::ComparisonWriter;

/// Everything learned about a single document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    /// Document the facts were read from.
    pub source: PathBuf,
    /// Strategy that produced the facts, `None` if none applied.
    pub strategy: Option<&'static str>,
    pub facts: RawFacts,
    pub metrics: CompanyMetrics,
}

/// Sequential pipeline over a fixed list of documents.
///
/// Each document goes through text extraction, a model call and the fact
/// cascade before its record is appended. A document that cannot be read
/// aborts the whole run; nothing is written in that case.
pub struct Pipeline<X, M, W> {
    extractor: X,
    model: M,
    writer: W,
    cascade: FactCascade,
    max_prompt_chars: usize,
}

impl<X, M, W> Pipeline<X, M, W>
where
    X: TextExtractor,
    M: LanguageModel,
    W: ComparisonWriter,
{
    /// Create a pipeline with the default cascade and prompt size.
    pub fn new(extractor: X, model: M, writer: W) -> Self {
        Self {
            extractor,
            model,
            writer,
            cascade: FactCascade::default(),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    /// Replace the extraction cascade.
    pub fn with_cascade(mut self, cascade: FactCascade) -> Self {
        self.cascade = cascade;
        self
    }

    /// Limit how much document text goes into each prompt.
    pub fn with_max_prompt_chars(mut self, max_chars: usize) -> Self {
        self.max_prompt_chars = max_chars;
        self
    }

    /// Perform one transition.
    ///
    /// Terminal stages are returned unchanged.
    pub fn step(&self, stage: Stage, mut state: PipelineState) -> (Stage, PipelineState) {
        let next = match stage {
            Stage::SelectDocument => self.select_document(&mut state),
            Stage::ExtractText => self.extract_text(&mut state),
            Stage::ExtractFacts => self.extract_facts(&mut state),
            Stage::DeriveAndAccumulate => self.derive_and_accumulate(&mut state),
            Stage::Decide => decide(&state),
            Stage::Finalize => self.finalize(&mut state),
            Stage::Done | Stage::Aborted => stage,
        };
        debug!("{:?} -> {:?}", stage, next);
        (next, state)
    }

    /// Run from the first document to a terminal stage.
    pub fn run(&self, state: PipelineState) -> (Stage, PipelineState) {
        let mut stage = Stage::SelectDocument;
        let mut state = state;
        while !stage.is_terminal() {
            (stage, state) = self.step(stage, state);
        }
        (stage, state)
    }

    /// Process `paths` and return the location of the comparison table.
    ///
    /// Every path is checked for existence before any document is read.
    pub fn analyze(&self, paths: &[PathBuf]) -> Result<PathBuf> {
        check_inputs(paths)?;

        info!("Analyzing {} documents", paths.len());
        let (_, state) = self.run(PipelineState::new(paths.to_vec()));
        into_output(state)
    }

    /// Run one document through text extraction, the model and the fact
    /// cascade without writing a comparison table.
    pub fn process_document(&self, path: &Path) -> Result<DocumentReport> {
        check_inputs(&[path.to_path_buf()])?;

        let text = self.extractor.extract(path).map_err(|e| PipelineError::DocumentRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Extracted {} chars from {}", text.len(), path.display());

        let (facts, strategy) = self.facts_for(&text, path);
        let company = facts.company_name.clone().unwrap_or_default();
        let metrics = company_record(&company, &facts, self.cascade.fallback_company());

        Ok(DocumentReport {
            source: path.to_path_buf(),
            strategy,
            facts,
            metrics,
        })
    }

    /// Prompt the model with `text` and run the cascade over its response.
    fn facts_for(&self, text: &str, path: &Path) -> (RawFacts, Option<&'static str>) {
        let prompt = build_prompt(text, self.max_prompt_chars);

        let response = match self.model.complete(&prompt) {
            Ok(response) => response,
            Err(e) => {
                warn!("Model {} failed, continuing without a response: {}", self.model.name(), e);
                String::new()
            }
        };

        let (facts, strategy) =
            self.cascade
                .extract_with_strategy(&response, text, &path.to_string_lossy());

        if facts.has_no_figures() {
            warn!("No figures found for {}", path.display());
        } else {
            let missing = facts.missing_fields();
            if !missing.is_empty() {
                debug!("Figures not found: {}", missing.join(", "));
            }
        }

        (facts, strategy)
    }

    fn select_document(&self, state: &mut PipelineState) -> Stage {
        state.clear_scratch();
        match state.pdf_paths.get(state.current_pdf_index) {
            Some(path) => {
                info!(
                    "Processing document {}/{}: {}",
                    state.current_pdf_index + 1,
                    state.pdf_paths.len(),
                    path.display()
                );
                state.current_pdf = Some(path.clone());
                Stage::ExtractText
            }
            None => Stage::Finalize,
        }
    }

    fn extract_text(&self, state: &mut PipelineState) -> Stage {
        let Some(path) = state.current_pdf.clone() else {
            return Stage::SelectDocument;
        };

        match self.extractor.extract(&path) {
            Ok(text) => {
                debug!("Extracted {} chars from {}", text.len(), path.display());
                state
                    .messages
                    .push(format!("Extracted text from {}", path.display()));
                state.extracted_text = Some(text);
                Stage::ExtractFacts
            }
            Err(e) => abort(
                state,
                PipelineError::DocumentRead {
                    path,
                    reason: e.to_string(),
                },
            ),
        }
    }

    fn extract_facts(&self, state: &mut PipelineState) -> Stage {
        let path = state.current_pdf.clone().unwrap_or_default();
        let text = state.extracted_text.as_deref().unwrap_or_default();
        let (facts, strategy) = self.facts_for(text, &path);

        state.messages.push(format!(
            "Extracted facts for {} ({})",
            facts.company_name.as_deref().unwrap_or_default(),
            strategy.unwrap_or("no strategy")
        ));
        state.current_company = facts.company_name.clone();
        state.raw_metrics = Some(facts);
        Stage::DeriveAndAccumulate
    }

    fn derive_and_accumulate(&self, state: &mut PipelineState) -> Stage {
        let facts = state.raw_metrics.clone().unwrap_or_default();
        let company = state.current_company.clone().unwrap_or_default();

        accumulate(
            &mut state.company_metrics,
            &company,
            &facts,
            self.cascade.fallback_company(),
        );
        state.current_pdf_index += 1;
        Stage::Decide
    }

    fn finalize(&self, state: &mut PipelineState) -> Stage {
        if state.company_metrics.is_empty() {
            return abort(state, PipelineError::NoMetrics);
        }

        match self.writer.write(&state.company_metrics) {
            Ok(path) => {
                info!("Generated comparison at {}", path.display());
                state
                    .messages
                    .push(format!("Generated comparison at {}", path.display()));
                state.comparison_output_path = Some(path);
                Stage::Done
            }
            Err(e) => abort(state, PipelineError::Output(e.to_string())),
        }
    }
}

fn decide(state: &PipelineState) -> Stage {
    if state.remaining() > 0 {
        Stage::SelectDocument
    } else {
        Stage::Finalize
    }
}

fn abort(state: &mut PipelineState, error: PipelineError) -> Stage {
    warn!("Pipeline aborted: {}", error);
    state.messages.push(format!("Error: {}", error));
    state.error = Some(error);
    Stage::Aborted
}

/// Fail with [`FinrepError::MissingInput`] for the first path that does
/// not exist.
pub fn check_inputs(paths: &[PathBuf]) -> Result<()> {
    match paths.iter().find(|p| !p.exists()) {
        Some(missing) => Err(FinrepError::MissingInput(missing.clone())),
        None => Ok(()),
    }
}

/// Turn a finished state into the run's result.
pub fn into_output(state: PipelineState) -> Result<PathBuf> {
    if let Some(error) = state.error {
        return Err(error.into());
    }
    state
        .comparison_output_path
        .ok_or_else(|| PipelineError::Output("pipeline stopped before finalizing".to_string()).into())
}
