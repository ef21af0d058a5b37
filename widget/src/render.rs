//! Line-oriented terminal surface.
//!
//! Input lines are parsed into [`Command`]s; frames are painted as plain text.
//!
//! ```text
//! Tasks: 2
//!   1. Buy milk
//!   2. Walk dog
//! > _
//! ```

use crate::view::Frame;
use std::fmt::Write;

/// Help text for the interactive surface
pub const HELP: &str = "\
Type a task and press Enter to add it.
  /draft <text>  set the input without adding
  /add           add the current input
  /rm <n>        delete row n
  /list          repaint
  /json          print the list as JSON
  /quit          exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type `text` into the input and press Enter
    Submit(String),
    /// Type `text` into the input
    SetDraft(String),
    /// Press the add button
    Add,
    /// Press the delete button of row `n` (1-based)
    Remove(usize),
    /// Repaint without changes
    List,
    /// Dump the collection as JSON
    Json,
    /// Show help
    Help,
    /// Leave
    Quit,
    /// Unrecognized slash command
    Unknown(String),
}

impl Command {
    /// Parse a raw input line
    ///
    /// Lines starting with `/` are commands; anything else is submitted as
    /// typed. Blank submissions are ignored by [`TodoApp::handle`](crate::app::TodoApp::handle).
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Self::Submit(line.to_string());
        };

        let (word, arg) = rest.split_once(' ').unwrap_or((rest, ""));
        match word {
            "draft" => Self::SetDraft(arg.to_string()),
            "add" => Self::Add,
            "rm" | "delete" => match arg.trim().parse::<usize>() {
                Ok(n) if n > 0 => Self::Remove(n),
                _ => Self::Unknown(line.to_string()),
            },
            "list" => Self::List,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Paint a frame as text
#[must_use]
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tasks: {}", frame.count);

    for (index, row) in frame.rows.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, row.text);
    }

    if let Some(error) = &frame.error {
        let _ = writeln!(out, "! {error}");
    }

    let _ = write!(out, "> {}", frame.draft);
    out
}
