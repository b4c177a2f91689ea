//! End-to-end extraction: lines -> classifier -> normalizers -> aggregator.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::aggregate::{DuplicateWeightClass, TotalsBuilder};
use super::classifier::{Classifier, ClassifierState, LineKind};
use super::lines::normalize_lines;
use super::Result;
use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, UnknownLabelPolicy};
use crate::models::totals::{AgeGroup, QualifyingTotals, Row};

/// Result of a table extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted lookup structure. Never empty.
    pub totals: QualifyingTotals,
    /// Line and row counts.
    pub report: ExtractionReport,
    /// Recovered data-quality problems, in line order.
    pub warnings: Vec<ExtractionWarning>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Counters collected while walking the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub lines: usize,
    pub header_lines: usize,
    pub context_lines: usize,
    pub data_lines: usize,
    pub orphan_lines: usize,
    pub unrecognized_lines: usize,
    pub rows_accepted: usize,
    pub duplicate_rows: usize,
    pub rejected_rows: usize,
}

/// A recovered problem. Line numbers count normalized (non-empty) lines from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionWarning {
    /// Weight/total line before any context line.
    OrphanRow { line: usize, text: String },
    /// Second row for a weight class in the same bucket.
    DuplicateWeightClass { line: usize, conflict: DuplicateWeightClass },
    /// Context line introducing an age label outside the known vocabulary.
    UnmappedAgeGroup { line: usize, label: String },
    /// Row dropped because its age label is outside the known vocabulary.
    RejectedAgeGroup { line: usize, label: String },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::OrphanRow { line, text } => {
                write!(f, "line {line}: data before any context line: {text:?}")
            }
            ExtractionWarning::DuplicateWeightClass { line, conflict } => {
                write!(f, "line {line}: {conflict}")
            }
            ExtractionWarning::UnmappedAgeGroup { line, label } => {
                write!(f, "line {line}: unknown age group {label:?} kept as a new key")
            }
            ExtractionWarning::RejectedAgeGroup { line, label } => {
                write!(f, "line {line}: row dropped, unknown age group {label:?}")
            }
        }
    }
}

/// Trait for qualifying-totals parsing.
pub trait TotalsParser {
    /// Parse the rendered text of one document.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Line-classifier based parser.
pub struct QualifyingTotalsParser {
    classifier: Classifier,
    unknown_age_groups: UnknownLabelPolicy,
}

impl QualifyingTotalsParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            classifier: Classifier::from_config(config),
            unknown_age_groups: config.unknown_age_groups,
        }
    }

    /// Set the unknown age-group policy.
    pub fn with_unknown_age_groups(mut self, policy: UnknownLabelPolicy) -> Self {
        self.unknown_age_groups = policy;
        self
    }

    /// Report an unknown label once, at the context line that introduces it.
    fn note_context(&self, age_group: &AgeGroup, line: usize, run: &mut Run) {
        let AgeGroup::Unmapped(label) = age_group else {
            return;
        };
        if self.unknown_age_groups != UnknownLabelPolicy::Warn || run.unmapped_seen.contains(label) {
            return;
        }

        warn!(line, label = %label, "unknown age group kept as a new key");
        run.unmapped_seen.push(label.clone());
        run.warnings.push(ExtractionWarning::UnmappedAgeGroup {
            line,
            label: label.clone(),
        });
    }

    fn accept(&self, row: Row, line: usize, run: &mut Run) {
        if let (AgeGroup::Unmapped(label), UnknownLabelPolicy::Reject) = (&row.age_group, self.unknown_age_groups) {
            warn!(line, label = %label, "dropping row with unknown age group");
            run.report.rejected_rows += 1;
            run.warnings.push(ExtractionWarning::RejectedAgeGroup {
                line,
                label: label.clone(),
            });
            return;
        }

        match run.builder.push(row) {
            Ok(()) => run.report.rows_accepted += 1,
            Err(conflict) => {
                warn!(line, "{}", conflict);
                run.report.duplicate_rows += 1;
                run.warnings
                    .push(ExtractionWarning::DuplicateWeightClass { line, conflict });
            }
        }
    }
}

impl Default for QualifyingTotalsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable bookkeeping for one parse.
#[derive(Default)]
struct Run {
    builder: TotalsBuilder,
    report: ExtractionReport,
    warnings: Vec<ExtractionWarning>,
    unmapped_seen: Vec<String>,
}

impl TotalsParser for QualifyingTotalsParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut run = Run::default();
        let mut state = ClassifierState::Seeking;

        for (index, text_line) in normalize_lines(text).enumerate() {
            let line = index + 1;
            run.report.lines += 1;

            let step = self.classifier.step(state, text_line);
            state = step.state;

            match step.kind {
                LineKind::Header => run.report.header_lines += 1,
                LineKind::Context => {
                    run.report.context_lines += 1;
                    if let ClassifierState::InContext(context) = &state {
                        self.note_context(&context.age_group, line, &mut run);
                    }
                }
                LineKind::Data => run.report.data_lines += 1,
                LineKind::Orphan => {
                    debug!(line, text = text_line, "data line before any context");
                    run.report.orphan_lines += 1;
                    run.warnings.push(ExtractionWarning::OrphanRow {
                        line,
                        text: text_line.to_string(),
                    });
                }
                LineKind::Unrecognized => {
                    trace!(line, text = text_line, "unrecognized line");
                    run.report.unrecognized_lines += 1;
                }
            }

            for row in step.rows {
                self.accept(row, line, &mut run);
            }
        }

        if run.report.orphan_lines > 0 {
            warn!(
                "{} data lines appeared before any context line; the source layout may have drifted",
                run.report.orphan_lines
            );
        }

        if run.builder.is_empty() {
            return Err(ExtractionError::NoRows {
                lines: run.report.lines,
                orphans: run.report.orphan_lines,
            });
        }

        let totals = run.builder.finish();
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {} rows in {} buckets from {} lines ({} warnings) in {}ms",
            totals.row_count(),
            totals.bucket_count(),
            run.report.lines,
            run.warnings.len(),
            processing_time_ms
        );

        Ok(ExtractionResult {
            totals,
            report: run.report,
            warnings: run.warnings,
            processing_time_ms,
        })
    }
}
