use crate::app::{handle_event, App, Button, Field, Frontend};
use crate::split::SplitOptions;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Line-oriented stand-in for the splitter's form window.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    eof: bool,
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Terminal {
            input,
            output,
            eof: false,
            error: None,
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn prompt(&mut self, text: &str) -> String {
        let written = write!(self.output, "{}: ", text).and_then(|_| self.output.flush());
        self.record(written);

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.eof = true;
                String::new()
            }
            Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
            Err(e) => {
                self.record(Err(e));
                self.eof = true;
                String::new()
            }
        }
    }

    fn choose_button(&mut self) -> Button {
        let answer = self.prompt("[P]rocess or [Q]uit");
        if self.eof || answer.trim().to_ascii_lowercase().starts_with('q') {
            Button::Quit
        } else {
            Button::Process
        }
    }
}

impl<R: BufRead, W: Write> Frontend for Terminal<R, W> {
    fn get_field(&mut self, field: Field) -> String {
        self.prompt(field.label())
    }

    fn show_error(&mut self, title: &str, message: &str) {
        let written = writeln!(self.output, "{}:\n{}", title, message);
        self.record(written);
    }

    fn show_info(&mut self, title: &str, message: &str) {
        let written = writeln!(self.output, "{}:\n{}", title, message);
        self.record(written);
    }

    fn confirm_and_exit(&mut self, title: &str, message: &str) -> bool {
        let answer = self.prompt(&format!("{} - {} [y/N]", title, message));
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn run(options: SplitOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal::new(stdin.lock(), stdout.lock());
    let mut app = App::new(options);
    session(&mut app, &mut terminal)
}

pub fn session<R: BufRead, W: Write>(app: &mut App, terminal: &mut Terminal<R, W>) -> Result<()> {
    writeln!(terminal.output, "PDF Splitter")?;
    while app.running {
        let button = terminal.choose_button();
        handle_event(app, button, terminal);
        if let Some(e) = terminal.error.take() {
            return Err(e.into());
        }
        if terminal.eof {
            break;
        }
    }
    Ok(())
}
