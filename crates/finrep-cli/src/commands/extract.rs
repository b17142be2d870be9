//! Extract command - metrics for a single report, without a comparison table.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use finrep_core::{DocumentReport, OllamaPipeline};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama server URL (overrides config)
    #[arg(long)]
    ollama_url: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(url) = &args.ollama_url {
        config.llm.base_url = url.clone();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Extracting metrics from {}", args.input.display()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let input = args.input.clone();
    let result = tokio::task::spawn_blocking(move || {
        OllamaPipeline::from_config(&config)?.process_document(&input)
    })
    .await?;
    pb.finish_and_clear();

    let report = result?;
    info!(
        "Parsed {} with {}",
        report.source.display(),
        report.strategy.unwrap_or("no strategy")
    );
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &DocumentReport) {
    let m = &report.metrics;
    println!("{}", style(&m.company_name).bold());
    println!("  Source:           {}", report.source.display());
    println!(
        "  Parsed with:      {}",
        report.strategy.unwrap_or("nothing")
    );
    print_row("Revenue", m.revenue, "");
    print_row("Net income", m.net_income, "");
    print_row("EPS", m.eps, "");
    print_row("Operating margin", m.operating_margin, "%");
    print_row("Profit margin", m.profit_margin, "%");
    print_row("Revenue growth", m.revenue_growth, "%");

    let missing = report.facts.missing_fields();
    if !missing.is_empty() {
        println!(
            "{} Not found in report: {}",
            style("⚠").yellow(),
            missing.join(", ")
        );
    }
}

fn print_row(label: &str, value: Option<f64>, unit: &str) {
    match value {
        Some(v) => println!("  {:<17} {:.2}{}", format!("{}:", label), v, unit),
        None => println!("  {:<17} {}", format!("{}:", label), style("-").dim()),
    }
}
