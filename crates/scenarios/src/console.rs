//! Console input and output for interactive scenarios.
//!
//! [`Console`] is the raw line-oriented device (the terminal in the
//! binary, a scripted transcript in tests). [`ConsoleHelper`] layers the
//! prompting, progress and object-printing conventions every scenario
//! shares on top of it.

use std::io::{self, BufRead, Write};

use partner_core::error::CoreError;
use serde::Serialize;

use crate::error::ScenarioError;

/// Spaces per indentation level in [`ConsoleHelper::write_object`].
const INDENT_WIDTH: usize = 2;

/// What kind of line is being written, so devices can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Title,
    /// Start of a long-running step; the line stays open until the step ends.
    Progress,
    /// Completion of the open progress line.
    ProgressDone,
    Success,
    Error,
}

/// A line-oriented console device.
pub trait Console: Send {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write(&mut self, kind: LineKind, text: &str) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// Terminal console
// ---------------------------------------------------------------------------

/// [`Console`] over the process's stdin and stdout.
#[derive(Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, kind: LineKind, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match kind {
            LineKind::Plain => writeln!(stdout, "{text}")?,
            LineKind::Title => {
                writeln!(stdout)?;
                writeln!(stdout, "{text}")?;
                writeln!(stdout, "{}", "=".repeat(text.chars().count()))?;
            }
            LineKind::Progress => write!(stdout, "{text}... ")?,
            LineKind::ProgressDone => writeln!(stdout, "{text}")?,
            LineKind::Success => writeln!(stdout, "[ok] {text}")?,
            LineKind::Error => writeln!(stdout, "[error] {text}")?,
        }
        stdout.flush()
    }
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

/// Shared prompting and printing conventions for scenarios.
pub struct ConsoleHelper {
    device: Box<dyn Console>,
    progress_open: bool,
}

impl ConsoleHelper {
    pub fn new(device: Box<dyn Console>) -> Self {
        Self {
            device,
            progress_open: false,
        }
    }

    /// Helper over the terminal.
    pub fn stdio() -> Self {
        Self::new(Box::new(StdConsole))
    }

    pub fn write_line(&mut self, text: &str) -> Result<(), ScenarioError> {
        self.close_progress("")?;
        Ok(self.device.write(LineKind::Plain, text)?)
    }

    pub fn title(&mut self, text: &str) -> Result<(), ScenarioError> {
        self.close_progress("")?;
        Ok(self.device.write(LineKind::Title, text)?)
    }

    pub fn success(&mut self, text: &str) -> Result<(), ScenarioError> {
        self.close_progress("")?;
        Ok(self.device.write(LineKind::Success, text)?)
    }

    /// Report an error. An open progress line is marked as failed first.
    pub fn error(&mut self, text: &str) -> Result<(), ScenarioError> {
        self.close_progress("failed")?;
        Ok(self.device.write(LineKind::Error, text)?)
    }

    /// Announce a step that may take a while. Closed by
    /// [`stop_progress`](Self::stop_progress).
    pub fn start_progress(&mut self, message: &str) -> Result<(), ScenarioError> {
        self.close_progress("")?;
        self.device.write(LineKind::Progress, message)?;
        self.progress_open = true;
        Ok(())
    }

    pub fn stop_progress(&mut self) -> Result<(), ScenarioError> {
        self.close_progress("done")
    }

    fn close_progress(&mut self, outcome: &str) -> Result<(), ScenarioError> {
        if self.progress_open {
            self.progress_open = false;
            self.device.write(LineKind::ProgressDone, outcome)?;
        }
        Ok(())
    }

    /// Print `value` as indented JSON, under `title` when given.
    pub fn write_object<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        title: Option<&str>,
        indent: usize,
    ) -> Result<(), ScenarioError> {
        if let Some(title) = title {
            self.title(title)?;
        } else {
            self.close_progress("")?;
        }

        let rendered = serde_json::to_string_pretty(value)?;
        let pad = " ".repeat(indent * INDENT_WIDTH);
        for line in rendered.lines() {
            self.device.write(LineKind::Plain, &format!("{pad}{line}"))?;
        }
        Ok(())
    }

    fn read_raw(&mut self, prompt: &str) -> Result<String, ScenarioError> {
        self.close_progress("")?;
        self.device
            .read_line(prompt)?
            .ok_or(ScenarioError::InputClosed)
    }

    /// Read a value that may be left blank. Returned as typed.
    pub fn read_optional_string(&mut self, prompt: &str) -> Result<String, ScenarioError> {
        self.read_raw(prompt)
    }

    /// Keep prompting until something other than whitespace is entered.
    /// Returns the trimmed input.
    pub fn read_non_empty_string(
        &mut self,
        prompt: &str,
        empty_error: &str,
    ) -> Result<String, ScenarioError> {
        loop {
            let line = self.read_raw(prompt)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                self.error(empty_error)?;
                continue;
            }
            return Ok(trimmed.to_string());
        }
    }

    /// Keep prompting until non-empty input that `parse` accepts is entered.
    /// Parse failures are shown and the prompt repeats.
    pub fn read_parsed<T, F>(
        &mut self,
        prompt: &str,
        empty_error: &str,
        parse: F,
    ) -> Result<T, ScenarioError>
    where
        F: Fn(&str) -> Result<T, CoreError>,
    {
        loop {
            let line = self.read_non_empty_string(prompt, empty_error)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    /// Like [`read_parsed`](Self::read_parsed) but blank input is passed to
    /// `parse` instead of being rejected.
    pub fn read_optional_parsed<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, ScenarioError>
    where
        F: Fn(&str) -> Result<T, CoreError>,
    {
        loop {
            let line = self.read_optional_string(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }
}
