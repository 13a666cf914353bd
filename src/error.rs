use crate::page_range::RangeError;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures of a split. Running past the end of the source is not one
/// of these; see [`crate::pdf::ExtractionResult::truncated_at`].
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Failed to open PDF {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Malformed page tree: {0}")]
    PageTree(#[from] lopdf::Error),

    #[error("Failed to encode PDF: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
