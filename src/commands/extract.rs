use crate::split::{split_pages, SplitOptions, SplitRequest};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: &str,
    output: Q,
    options: &SplitOptions,
) -> Result<()> {
    let output = output.as_ref();
    let output_dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let request = SplitRequest {
        source: input.as_ref().to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        pages: pages.to_string(),
        output_name,
    };

    let validation = request.validate(options);
    if !validation.is_valid() {
        anyhow::bail!("{}", validation.messages.join("\n"));
    }

    let result = split_pages(&request, options)?;

    if let Some(page) = result.truncated_at {
        println!(
            "Page {} is past the end of the {}-page input; keeping the {} page(s) collected before it",
            page, result.source_pages, result.pages_written
        );
    }
    println!(
        "Extracted {} page(s) to {}",
        result.pages_written,
        request.output_path().display()
    );

    Ok(())
}
