use std::path::Path;

pub const MSG_INPUT_FILE: &str = "Please select a PDF input file";
pub const MSG_PAGE_RANGE: &str = "Please enter a valid page range";
pub const MSG_OUTPUT_DIR: &str = "Please select a valid output directory";
pub const MSG_FILE_NAME: &str = "Please enter a file name";

/// Every problem found with a set of split inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub messages: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Check all four inputs and collect a message for each one that fails.
/// Never stops at the first problem.
pub fn validate_inputs(
    source: &Path,
    output_dir: &Path,
    pages: &str,
    output_name: &str,
    extension: &str,
) -> Validation {
    let mut messages = Vec::new();

    let has_extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if !has_extension {
        messages.push(MSG_INPUT_FILE.to_string());
    }

    if pages.trim().is_empty() {
        messages.push(MSG_PAGE_RANGE.to_string());
    }

    if !output_dir.is_dir() {
        messages.push(MSG_OUTPUT_DIR.to_string());
    }

    if output_name.trim().is_empty() {
        messages.push(MSG_FILE_NAME.to_string());
    }

    Validation { messages }
}
