//! TypeScript declaration output.

use super::Result;
use crate::error::EmitError;
use crate::extract::rules::patterns::TS_IDENTIFIER;
use crate::models::totals::QualifyingTotals;

/// Render an `export const <name> = {...} as const;` module followed by the
/// key types downstream code narrows on.
pub fn to_typescript(totals: &QualifyingTotals, const_name: &str) -> Result<String> {
    if !TS_IDENTIFIER.is_match(const_name) {
        return Err(EmitError::InvalidIdentifier(const_name.to_string()));
    }

    let body = serde_json::to_string_pretty(totals)?;
    let name = const_name;

    Ok(format!(
        "export const {name} = {body} as const;\n\
         \n\
         export type QTEvent = keyof typeof {name};\n\
         export type QTAgeGroup = keyof typeof {name}[QTEvent];\n\
         export type QTGender = keyof typeof {name}[QTEvent][QTAgeGroup];\n\
         export type QTWeightClass = typeof {name}[QTEvent][QTAgeGroup][QTGender][number];\n"
    ))
}
