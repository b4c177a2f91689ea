//! Nested JSON output.

use super::Result;
use crate::models::totals::QualifyingTotals;

/// Pretty-printed nested JSON with two-space indentation and a trailing newline.
pub fn to_json(totals: &QualifyingTotals) -> Result<String> {
    let mut out = serde_json::to_string_pretty(totals)?;
    out.push('\n');
    Ok(out)
}
