use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pdf::PdfDocument;
use crate::split::{split_pages, SplitOptions, SplitRequest};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1-3,4,7-9')")]
    pub pages: String,
    #[schemars(description = "Existing directory to write the new PDF into")]
    pub output_dir: String,
    #[schemars(description = "File name of the new PDF")]
    pub output_name: String,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    options: SplitOptions,
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new(options: SplitOptions) -> Self {
        Self {
            options,
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new(SplitOptions::default())
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF, to help choose page ranges")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let result = PageCountResult {
                    page_count: doc.page_count(),
                    path,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Copy page ranges from a PDF into a new PDF in the given order. \
                          Extraction stops at the first page past the end of the source; pages \
                          collected before it are still written and the result is marked truncated.")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let result = split_result(req, &self.options);
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }
}

fn split_result(req: PdfSplitRequest, options: &SplitOptions) -> SplitResult {
    let request = SplitRequest {
        source: req.path.into(),
        output_dir: req.output_dir.into(),
        pages: req.pages,
        output_name: req.output_name,
    };
    let output_path = request.output_path().display().to_string();

    let validation = request.validate(options);
    if !validation.is_valid() {
        return SplitResult {
            output_path: None,
            messages: validation.messages,
            ..Default::default()
        };
    }

    match split_pages(&request, options) {
        Ok(result) => {
            let mut messages = Vec::new();
            if let Some(page) = result.truncated_at {
                messages.push(format!(
                    "Page {} exceeds the {}-page input; output holds the pages collected before it",
                    page, result.source_pages
                ));
            }
            SplitResult {
                output_path: Some(output_path),
                pages_requested: result.pages_requested,
                pages_written: result.pages_written,
                source_pages: result.source_pages,
                truncated: result.truncated(),
                messages,
            }
        }
        Err(e) => SplitResult {
            output_path: None,
            messages: vec![format!("Error: {}", e)],
            ..Default::default()
        },
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: u32,
}

#[derive(Debug, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_path: Option<String>,
    pub pages_requested: usize,
    pub pages_written: usize,
    pub source_pages: u32,
    pub truncated: bool,
    pub messages: Vec<String>,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page-range splitting. Use pdf_page_count to see how many pages a PDF has, \
                 then pdf_split to copy page ranges such as '1-3,4,7-9' into a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(options: SplitOptions) -> Result<()> {
    let server = PdfServer::new(options);
    info!("serving MCP over stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixture::sample_pdf_bytes;

    fn split_request(dir: &std::path::Path, pages: &str) -> PdfSplitRequest {
        let source = dir.join("in.pdf");
        std::fs::write(&source, sample_pdf_bytes(3)).unwrap();
        PdfSplitRequest {
            path: source.display().to_string(),
            pages: pages.into(),
            output_dir: dir.display().to_string(),
            output_name: "out.pdf".into(),
        }
    }

    #[test]
    fn split_reports_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let result = split_result(split_request(dir.path(), "2-5"), &SplitOptions::default());
        assert!(result.output_path.is_some());
        assert_eq!(result.pages_requested, 4);
        assert_eq!(result.pages_written, 2);
        assert_eq!(result.source_pages, 3);
        assert!(result.truncated);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn split_stops_at_first_page_past_the_end() {
        let dir = tempfile::tempdir().unwrap();
        let result = split_result(split_request(dir.path(), "2,9,3"), &SplitOptions::default());
        assert!(result.truncated);
        assert_eq!(result.pages_requested, 3);
        assert_eq!(result.pages_written, 1);
        let out = PdfDocument::open(dir.path().join("out.pdf")).unwrap();
        assert_eq!(crate::pdf::fixture::page_labels(&out.doc), ["Page 2"]);
    }

    #[test]
    fn split_returns_validation_messages() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = split_request(dir.path(), "");
        req.output_name = String::new();
        let result = split_result(req, &SplitOptions::default());
        assert!(result.output_path.is_none());
        assert_eq!(
            result.messages,
            ["Please enter a valid page range", "Please enter a file name"]
        );
        assert!(!dir.path().join("out.pdf").exists());
    }

    #[test]
    fn split_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = split_result(split_request(dir.path(), "3-1"), &SplitOptions::default());
        assert!(result.output_path.is_none());
        assert!(result.messages[0].starts_with("Error:"));
    }
}
