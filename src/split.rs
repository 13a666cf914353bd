use crate::config::Config;
use crate::error::SplitError;
use crate::page_range::parse_range;
use crate::pdf::{ExtractionResult, PdfDocument};
use crate::validate::{validate_inputs, Validation};
use std::path::PathBuf;
use tracing::{debug, info};

/// The four values a split needs, however they were collected.
#[derive(Debug, Clone, Default)]
pub struct SplitRequest {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub pages: String,
    pub output_name: String,
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub extension: String,
    pub compress: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            extension: "pdf".into(),
            compress: false,
        }
    }
}

impl From<&Config> for SplitOptions {
    fn from(cfg: &Config) -> Self {
        SplitOptions {
            extension: cfg.input.extension.clone(),
            compress: cfg.output.compress,
        }
    }
}

impl SplitRequest {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_name.trim())
    }

    pub fn validate(&self, options: &SplitOptions) -> Validation {
        validate_inputs(
            &self.source,
            &self.output_dir,
            &self.pages,
            &self.output_name,
            &options.extension,
        )
    }
}

/// Parse the range, copy the pages and write the result. A bad range fails
/// before the source is opened; running past the last page is reported in
/// the result and the collected pages are still written.
pub fn split_pages(
    request: &SplitRequest,
    options: &SplitOptions,
) -> Result<ExtractionResult, SplitError> {
    let pages = parse_range(&request.pages)?;
    debug!(expr = %request.pages, count = pages.len(), "parsed page range");

    let source = PdfDocument::open(&request.source)?;
    let mut extraction = source.extract_pages(&pages)?;
    drop(source);

    if options.compress {
        extraction.document.compress();
    }

    let output = request.output_path();
    PdfDocument::write_output(&mut extraction.document, &output)?;

    let result = extraction.result;
    info!(
        output = %output.display(),
        pages_written = result.pages_written,
        truncated = result.truncated(),
        "split complete"
    );
    Ok(result)
}
