//! Run-level helpers: render a document, extract it, emit the artifact.

use tracing::{debug, warn};

use crate::emit::render_artifact;
use crate::error::Result;
use crate::extract::{ExtractionResult, QualifyingTotalsParser, TotalsParser};
use crate::models::config::QtConfig;
use crate::pdf::PdfExtractor;

/// Serialized artifact plus the extraction it came from.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contents: String,
    pub result: ExtractionResult,
}

/// Render PDF bytes to text.
pub fn render_document(data: &[u8], config: &QtConfig) -> Result<String> {
    let content = PdfExtractor::render(data)?;
    debug!("PDF has {} pages", content.page_count);

    if content.is_sparse(config.pdf.min_text_length) {
        warn!(
            "PDF rendered only {} characters of text; it may be a scanned document",
            content.text.trim().len()
        );
    }

    Ok(content.text)
}

/// Extract totals from rendered text and serialize them as configured.
///
/// Fails when the config is invalid, when no rows survive extraction, or
/// when serialization fails. Per-line problems only show up as warnings.
pub fn build_artifact(text: &str, config: &QtConfig) -> Result<Artifact> {
    config.validate()?;

    let parser = QualifyingTotalsParser::from_config(&config.extraction);
    let result = parser.parse(text)?;
    let contents = render_artifact(&result.totals, config.output.format, &config.output.const_name)?;

    Ok(Artifact { contents, result })
}
