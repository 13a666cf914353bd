pub mod document;

#[cfg(test)]
pub mod fixture;

pub use document::{ExtractionResult, PdfDocument};
