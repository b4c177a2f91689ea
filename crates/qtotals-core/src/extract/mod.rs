//! Qualifying-totals table extraction.

mod aggregate;
mod classifier;
mod lines;
mod parser;
pub mod rules;

pub use aggregate::{DuplicateWeightClass, TotalsBuilder};
pub use classifier::{Classifier, ClassifierState, Context, LineKind, Step};
pub use lines::{normalize_lines, NormalizedLines};
pub use parser::{ExtractionReport, ExtractionResult, ExtractionWarning, QualifyingTotalsParser, TotalsParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
