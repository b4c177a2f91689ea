//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use qtotals_core::models::config::QtConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.unknown_age_groups")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_path(config_path);
    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qtotals")
        .join("config.json")
}

/// The `--config` file when given, else the per-user default.
fn resolve_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load(config_path: Option<&str>) -> anyhow::Result<QtConfig> {
    if let Some(path) = config_path {
        return QtConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(QtConfig::from_file(&default_path)?)
    } else {
        Ok(QtConfig::default())
    }
}

fn show_config(config_path: &Path) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        QtConfig::from_file(config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        QtConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    QtConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        QtConfig::from_file(config_path)?
    } else {
        QtConfig::default()
    };

    let json = serde_json::to_value(&config)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        QtConfig::from_file(config_path)?
    } else {
        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        QtConfig::default()
    };

    // Parse the value, falling back to a plain string
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    assign(&mut json, key, parsed_value.clone())?;

    // Round-trip through the typed config so invalid values are rejected
    let config: QtConfig = serde_json::from_value(json)?;
    config.save(config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn lookup<'a>(json: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn assign(json: &mut serde_json::Value, key: &str, value: serde_json::Value) -> anyhow::Result<()> {
    let (parent, last) = match key.rsplit_once('.') {
        Some((parent, last)) => (Some(parent), last),
        None => (None, key),
    };

    let mut current = json;
    if let Some(parent) = parent {
        for part in parent.split('.') {
            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    match current.as_object_mut() {
        Some(obj) => {
            obj.insert(last.to_string(), value);
            Ok(())
        }
        None => anyhow::bail!("Cannot set value at non-object path"),
    }
}

fn show_path(config_path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'qtotals config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_assign() {
        let mut json = serde_json::to_value(QtConfig::default()).unwrap();

        assert_eq!(
            lookup(&json, "extraction.unknown_age_groups"),
            Some(&serde_json::Value::String("warn".to_string()))
        );
        assert!(lookup(&json, "extraction.nope").is_none());

        assign(&mut json, "output.const_name", serde_json::Value::String("qt".into())).unwrap();
        let config: QtConfig = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(config.output.const_name, "qt");

        assert!(assign(&mut json, "missing.key", serde_json::Value::Null).is_err());
        assert!(assign(&mut json, "output.const_name.deeper", serde_json::Value::Null).is_err());
    }
}
