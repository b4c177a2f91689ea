//! CLI application for scraping qualifying totals into lookup artifacts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, fetch, scrape};

/// Qualifying totals - turn the published QT table into a typed lookup artifact
#[derive(Parser)]
#[command(name = "qtotals")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the source document
    Fetch(fetch::FetchArgs),

    /// Extract totals from a local PDF or rendered text dump
    Extract(extract::ExtractArgs),

    /// Download, extract and write the artifact in one run
    Scrape(scrape::ScrapeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Fetch(args) => fetch::run(args, cli.config.as_deref()).await,
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Scrape(args) => scrape::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
