//! Fetch command - download the source document.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use qtotals_core::models::config::SourceConfig;

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Document URL (default: from config)
    #[arg(long)]
    url: Option<String>,

    /// Output file
    #[arg(short, long, default_value = "qt_source.pdf")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: FetchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    config.validate()?;

    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let url = args.url.unwrap_or_else(|| config.source.url.clone());
    let client = build_client(&config.source)?;

    let pb = download_progress_bar();
    let bytes = download_file(&client, &url, &args.output, &pb).await?;
    pb.finish_and_clear();

    eprintln!(
        "{} Downloaded {} bytes to {}",
        style("✓").green(),
        bytes,
        args.output.display()
    );

    Ok(())
}

/// HTTP client configured from the `source` config section.
pub fn build_client(source: &SourceConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(source.user_agent.as_str())
        .timeout(Duration::from_secs(source.timeout_secs))
        .build()
}

pub fn download_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} {msg:<20} [{bar:25.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Downloading");
    pb
}

/// Stream `url` into `path`, returning the byte count.
///
/// Any non-success status is an error; the file only appears once the body
/// is complete.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    pb: &ProgressBar,
) -> anyhow::Result<u64> {
    info!("Fetching {}", url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {} fetching {}", response.status(), url);
    }

    // Get content length if available
    if let Some(content_length) = response.content_length() {
        pb.set_length(content_length);
    }

    // Create temp file first
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;

    // Stream download with progress
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    drop(file);

    // Rename temp to final
    fs::rename(&temp_path, path)?;
    debug!("Wrote {} bytes to {}", downloaded, path.display());

    Ok(downloaded)
}
