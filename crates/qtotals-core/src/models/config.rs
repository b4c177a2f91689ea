//! Configuration structures for the extraction pipeline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::emit::ArtifactFormat;
use crate::error::QtError;
use crate::extract::rules::patterns::TS_IDENTIFIER;

/// Document published for the 2025 national championships.
pub const DEFAULT_SOURCE_URL: &str = "https://assets.contentstack.io/v3/assets/blteb7d012fc7ebef7f/blt7baa06f8d5ccf8e4/670827cb3104e83ec290ef14/2025_-_Nationals_QT.pdf";

/// Main configuration for the qtotals pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QtConfig {
    /// Source document configuration.
    pub source: SourceConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Table extraction configuration.
    pub extraction: ExtractionConfig,

    /// Artifact output configuration.
    pub output: OutputConfig,
}

/// Where and how the source document is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL of the qualifying-totals PDF.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with the request.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: 120,
            user_agent: format!("qtotals/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters the rendered text is reported as suspicious
    /// (most likely a scanned document).
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// What to do with an age-group label that no alias resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLabelPolicy {
    /// Keep the label as a new key without comment.
    Accept,
    /// Keep the label as a new key and report it.
    #[default]
    Warn,
    /// Drop every row filed under the label and report it.
    Reject,
}

/// Table extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Leading tokens that mark a context line.
    pub event_families: Vec<String>,

    /// Extra raw -> canonical age-group spellings, consulted after the
    /// built-in ones.
    pub age_group_aliases: BTreeMap<String, String>,

    /// Handling of unrecognized age-group labels.
    pub unknown_age_groups: UnknownLabelPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            event_families: ["Youth", "Junior", "University", "Senior", "Open", "Masters"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            age_group_aliases: BTreeMap::new(),
            unknown_age_groups: UnknownLabelPolicy::default(),
        }
    }
}

/// Artifact output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Artifact format.
    pub format: ArtifactFormat,

    /// Output path used by `scrape` when none is given on the command line.
    pub path: PathBuf,

    /// Name of the exported constant in TypeScript output.
    pub const_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ArtifactFormat::Json,
            path: PathBuf::from("qt_data.json"),
            const_name: "qualifyingTotals".to_string(),
        }
    }
}

impl QtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Check settings that would otherwise fail late or silently.
    pub fn validate(&self) -> Result<(), QtError> {
        if self.extraction.event_families.iter().all(|f| f.trim().is_empty()) {
            return Err(QtError::Config(
                "extraction.event_families is empty; no line could start a context".to_string(),
            ));
        }
        if self.output.format == ArtifactFormat::TypeScript && !TS_IDENTIFIER.is_match(&self.output.const_name) {
            return Err(QtError::Config(format!(
                "output.const_name {:?} is not a valid identifier",
                self.output.const_name
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(QtError::Config("source.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
