use crate::pdf::ExtractionResult;
use crate::split::{split_pages, SplitOptions, SplitRequest};
use std::path::PathBuf;
use tracing::{error, info};

pub const TRUNCATION_NOTICE: &str =
    "Range exceeded number of pages in input.\nFile will still be saved.";
pub const SAVE_PROMPT: &str = "Output PDF saved. Do you want to quit?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    InputFile,
    OutputDirectory,
    OutputName,
    PageRanges,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::InputFile => "Choose Source PDF File",
            Field::OutputDirectory => "Select Output Directory",
            Field::OutputName => "Output file name",
            Field::PageRanges => "Page Ranges: 1,3,4-10",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Process,
    Quit,
}

/// What the application needs from whatever is presenting it.
pub trait Frontend {
    fn get_field(&mut self, field: Field) -> String;
    fn show_error(&mut self, title: &str, message: &str);
    fn show_info(&mut self, title: &str, message: &str);
    /// Ask whether to end the session; `true` ends it.
    fn confirm_and_exit(&mut self, title: &str, message: &str) -> bool;
}

pub struct App {
    pub options: SplitOptions,
    pub running: bool,
    pub last_result: Option<ExtractionResult>,
}

impl App {
    pub fn new(options: SplitOptions) -> Self {
        App {
            options,
            running: true,
            last_result: None,
        }
    }
}

pub fn handle_event<F: Frontend>(app: &mut App, button: Button, ui: &mut F) {
    match button {
        Button::Quit => app.running = false,
        Button::Process => process(app, ui),
    }
}

fn process<F: Frontend>(app: &mut App, ui: &mut F) {
    let request = SplitRequest {
        source: PathBuf::from(ui.get_field(Field::InputFile).trim()),
        output_dir: PathBuf::from(ui.get_field(Field::OutputDirectory).trim()),
        output_name: ui.get_field(Field::OutputName),
        pages: ui.get_field(Field::PageRanges),
    };

    let validation = request.validate(&app.options);
    if !validation.is_valid() {
        ui.show_error("Error", &validation.messages.join("\n"));
        return;
    }

    match split_pages(&request, &app.options) {
        Ok(result) => {
            app.last_result = Some(result);
            if result.truncated() {
                ui.show_info("Info", TRUNCATION_NOTICE);
            }
            if ui.confirm_and_exit("File Save", SAVE_PROMPT) {
                info!("session ended after save");
                app.running = false;
            }
        }
        Err(e) => {
            error!(error = %e, "split failed");
            ui.show_error("Error", &e.to_string());
        }
    }
}
