//! Scrape command - download, extract and emit in a single run.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use qtotals_core::{build_artifact, render_document};

use super::extract::{print_summary, stage_progress_bar, write_artifact, EmitArgs};
use super::fetch::{build_client, download_file};

/// Arguments for the scrape command.
#[derive(Args)]
pub struct ScrapeArgs {
    /// Document URL (default: from config)
    #[arg(long)]
    url: Option<String>,

    /// Output file (default: config output path with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    emit: EmitArgs,

    /// Keep a copy of the downloaded PDF
    #[arg(long)]
    keep_pdf: Option<PathBuf>,
}

pub async fn run(args: ScrapeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.emit.apply(&mut config);
    config.validate()?;

    let url = args.url.unwrap_or_else(|| config.source.url.clone());
    let output = args.output.unwrap_or_else(|| {
        config
            .output
            .path
            .with_extension(config.output.format.extension())
    });

    // Removed on drop, including on error paths
    let workdir = tempfile::tempdir()?;
    let pdf_path = workdir.path().join("source.pdf");

    let pb = stage_progress_bar();
    pb.set_message("Downloading document...");
    pb.set_position(10);

    let client = build_client(&config.source)?;
    let bytes = download_file(&client, &url, &pdf_path, &pb).await?;
    info!("Downloaded {} bytes", bytes);

    if let Some(keep) = &args.keep_pdf {
        fs::copy(&pdf_path, keep)?;
    }

    pb.set_length(100);
    pb.set_message("Rendering PDF...");
    pb.set_position(40);
    let text = render_document(&fs::read(&pdf_path)?, &config)?;

    pb.set_message("Extracting totals...");
    pb.set_position(70);
    let artifact = build_artifact(&text, &config)?;

    pb.finish_and_clear();

    print_summary(&artifact.result);
    write_artifact(&artifact.contents, Some(&output))?;

    eprintln!(
        "{} Data has been scraped from {}",
        style("✓").green(),
        url
    );

    Ok(())
}
