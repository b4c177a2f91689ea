//! Artifact emission for the lookup structure.
//!
//! Every format reproduces insertion order exactly, so identical input gives
//! byte-identical output.

mod flat;
mod json;
mod typescript;

pub use flat::to_csv;
pub use json::to_json;
pub use typescript::to_typescript;

use serde::{Deserialize, Serialize};

use crate::error::EmitError;
use crate::models::totals::QualifyingTotals;

/// Result type for emit operations.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Output artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Nested JSON object.
    #[default]
    Json,
    /// TypeScript `as const` declaration with derived key types.
    TypeScript,
    /// Flat CSV, one row per weight class.
    Csv,
}

impl ArtifactFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::TypeScript => "ts",
            ArtifactFormat::Csv => "csv",
        }
    }
}

/// Render `totals` in the requested format.
///
/// `const_name` is only used by [`ArtifactFormat::TypeScript`].
pub fn render_artifact(totals: &QualifyingTotals, format: ArtifactFormat, const_name: &str) -> Result<String> {
    match format {
        ArtifactFormat::Json => to_json(totals),
        ArtifactFormat::TypeScript => to_typescript(totals, const_name),
        ArtifactFormat::Csv => to_csv(totals),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_names() {
        assert_eq!(serde_json::to_string(&ArtifactFormat::TypeScript).unwrap(), r#""typescript""#);
        assert_eq!(ArtifactFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_render_is_deterministic() {
        let totals = test_support::sample_totals();
        for format in [ArtifactFormat::Json, ArtifactFormat::TypeScript, ArtifactFormat::Csv] {
            let first = render_artifact(&totals, format, "qualifyingTotals").unwrap();
            let second = render_artifact(&totals, format, "qualifyingTotals").unwrap();
            assert_eq!(first, second);
        }
    }
}
