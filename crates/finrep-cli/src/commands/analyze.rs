//! Analyze command - compare several earnings reports.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use finrep_core::pipeline::{check_inputs, into_output};
use finrep_core::{CompanyMetrics, FinrepConfig, OllamaPipeline, PipelineState, Stage};

use super::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory for the comparison table
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama server URL (overrides config)
    #[arg(long)]
    ollama_url: Option<String>,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);

    let paths = expand_inputs(&args.inputs)?;
    check_inputs(&paths)?;

    println!(
        "{} Analyzing {} reports with {}",
        style("ℹ").blue(),
        paths.len(),
        config.llm.model
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let spinner = pb.clone();
    let result = tokio::task::spawn_blocking(move || run_pipeline(&config, paths, &spinner)).await?;

    let (output_path, records) = match result {
        Ok(done) => done,
        Err(e) => {
            pb.abandon_with_message(format!("{}", style("Failed").red()));
            return Err(e);
        }
    };
    pb.finish_and_clear();

    print_summary(&records);
    println!(
        "{} Comparison written to {} ({:.1}s)",
        style("✓").green(),
        output_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn apply_overrides(config: &mut FinrepConfig, args: &AnalyzeArgs) {
    if let Some(dir) = &args.output_dir {
        config.output.output_dir = dir.clone();
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(url) = &args.ollama_url {
        config.llm.base_url = url.clone();
    }
}

/// Expand glob patterns; plain paths are kept as given so that missing
/// files are reported by name.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(input));
            continue;
        }

        let mut matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
        if matched.is_empty() {
            anyhow::bail!("No matching files found for pattern: {}", input);
        }
        matched.sort();
        debug!("{} matched {} files", input, matched.len());
        paths.extend(matched);
    }
    Ok(paths)
}

/// Drive the pipeline stage by stage, reporting progress on the spinner.
fn run_pipeline(
    config: &FinrepConfig,
    paths: Vec<PathBuf>,
    pb: &ProgressBar,
) -> anyhow::Result<(PathBuf, Vec<CompanyMetrics>)> {
    let pipeline = OllamaPipeline::from_config(config)?;
    let total = paths.len();

    let mut stage = Stage::SelectDocument;
    let mut state = PipelineState::new(paths);
    while !stage.is_terminal() {
        pb.set_message(progress_message(stage, &state, total));
        (stage, state) = pipeline.step(stage, state);
    }

    info!("Pipeline finished in {:?}", stage);
    for message in &state.messages {
        debug!("{}", message);
    }

    let records = state.company_metrics.clone();
    let output_path = into_output(state)?;
    Ok((output_path, records))
}

fn progress_message(stage: Stage, state: &PipelineState, total: usize) -> String {
    let current = state
        .current_pdf
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let position = (state.current_pdf_index + 1).min(total);

    match stage {
        Stage::ExtractText => format!("[{}/{}] Reading {}", position, total, current),
        Stage::ExtractFacts => format!("[{}/{}] Extracting metrics from {}", position, total, current),
        Stage::Finalize => "Writing comparison".to_string(),
        _ => format!("[{}/{}] {}", position, total, current),
    }
}

fn print_summary(records: &[CompanyMetrics]) {
    println!(
        "{:<28} {:>12} {:>12} {:>8} {:>10} {:>10} {:>10}",
        style("Company").bold(),
        style("Revenue").bold(),
        style("Net income").bold(),
        style("EPS").bold(),
        style("Op. margin").bold(),
        style("Margin").bold(),
        style("Growth").bold(),
    );
    for r in records {
        println!(
            "{:<28} {:>12} {:>12} {:>8} {:>10} {:>10} {:>10}",
            r.company_name,
            cell(r.revenue),
            cell(r.net_income),
            cell(r.eps),
            percent(r.operating_margin),
            percent(r.profit_margin),
            percent(r.revenue_growth),
        );
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_keeps_literal_paths() {
        let paths = expand_inputs(&["missing.pdf".to_string()]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("missing.pdf")]);
    }

    #[test]
    fn test_expand_inputs_sorts_glob_matches() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["globex_q1.pdf", "acme_q1.pdf", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let pattern = format!("{}/*.pdf", dir.path().display());

        let paths = expand_inputs(&[pattern]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("acme_q1.pdf"), dir.path().join("globex_q1.pdf")]
        );
    }

    #[test]
    fn test_expand_inputs_empty_pattern_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.pdf", dir.path().display());
        assert!(expand_inputs(&[pattern]).is_err());
    }

    #[test]
    fn test_cells() {
        assert_eq!(cell(Some(2.0)), "2.00");
        assert_eq!(cell(None), "-");
        assert_eq!(percent(Some(-12.5)), "-12.50%");
    }
}
