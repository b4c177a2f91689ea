//! Extract command - build the lookup artifact from a local document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qtotals_core::models::config::{QtConfig, UnknownLabelPolicy};
use qtotals_core::{build_artifact, render_document, ArtifactFormat, ExtractionResult};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, or already rendered text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    emit: EmitArgs,

    /// Also write the rendered text to this file
    #[arg(long)]
    dump_text: Option<PathBuf>,
}

/// Options shared by every command that writes an artifact.
#[derive(Args)]
pub struct EmitArgs {
    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Exported constant name for TypeScript output
    #[arg(long)]
    const_name: Option<String>,

    /// Drop rows whose age group is not a known label
    #[arg(long)]
    strict: bool,
}

impl EmitArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut QtConfig) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(name) = &self.const_name {
            config.output.const_name = name.clone();
        }
        if self.strict {
            config.extraction.unknown_age_groups = UnknownLabelPolicy::Reject;
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Nested JSON
    Json,
    /// TypeScript `as const` declaration
    Ts,
    /// Flat CSV
    Csv,
}

impl From<OutputFormat> for ArtifactFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ArtifactFormat::Json,
            OutputFormat::Ts => ArtifactFormat::TypeScript,
            OutputFormat::Csv => ArtifactFormat::Csv,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::config::load(config_path)?;
    args.emit.apply(&mut config);
    config.validate()?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args.input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let pb = stage_progress_bar();

    let text = match extension.as_str() {
        "pdf" => {
            pb.set_message("Rendering PDF...");
            pb.set_position(20);
            render_document(&fs::read(&args.input)?, &config)?
        }
        "txt" | "text" => fs::read_to_string(&args.input)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if let Some(path) = &args.dump_text {
        fs::write(path, &text)?;
        debug!("Rendered text written to {}", path.display());
    }

    pb.set_message("Extracting totals...");
    pb.set_position(60);

    let artifact = build_artifact(&text, &config)?;

    pb.finish_and_clear();

    print_summary(&artifact.result);
    write_artifact(&artifact.contents, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn stage_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}

pub fn print_summary(result: &ExtractionResult) {
    if !result.warnings.is_empty() {
        eprintln!("{}", style("Data-quality warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    eprintln!(
        "{} Extracted {} rows in {} buckets across {} events ({} lines read, {}ms)",
        style("ℹ").blue(),
        result.totals.row_count(),
        result.totals.bucket_count(),
        result.totals.events().len(),
        result.report.lines,
        result.processing_time_ms
    );
}

/// Write to `path`, or to stdout when no path is given.
pub fn write_artifact(artifact: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, artifact)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => print!("{}", artifact),
    }
    Ok(())
}
