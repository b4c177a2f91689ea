//! Core library for qualifying-totals extraction.
//!
//! This crate provides:
//! - PDF text rendering (lopdf + pdf-extract)
//! - A single-pass line classifier that rebuilds the totals table from a
//!   flattened text dump
//! - Field normalization for age groups and weight classes
//! - An insertion-ordered lookup structure with derived key queries
//! - Artifact emitters (JSON, TypeScript declaration, CSV)

pub mod emit;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod pipeline;

pub use emit::{ArtifactFormat, render_artifact};
pub use error::{QtError, Result};
pub use extract::{ExtractionReport, ExtractionResult, ExtractionWarning, QualifyingTotalsParser, TotalsParser};
pub use models::config::QtConfig;
pub use models::totals::{AgeGroup, BucketKey, QualifyingTotal, QualifyingTotals, Row, WeightClass, WeightTotal};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use pipeline::{build_artifact, render_document, Artifact};
