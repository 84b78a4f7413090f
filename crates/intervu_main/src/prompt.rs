use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Line-oriented terminal input
pub struct Prompt {
    term: Term,
}

impl Prompt {
    pub fn new() -> Self {
        Self { term: Term::stdout() }
    }

    pub fn text(&self, label: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} ", format!("{label}:").bold()))
            .context("Failed to write prompt")?;
        self.term.read_line().context("Failed to read input")
    }

    /// Reads without echoing the typed characters
    pub fn secret(&self, label: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} ", format!("{label}:").bold()))
            .context("Failed to write prompt")?;
        self.term
            .read_secure_line()
            .context("Failed to read input")
    }

    /// Uses `value` when given, otherwise asks for it
    pub fn text_or(&self, value: Option<String>, label: &str) -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None => self.text(label),
        }
    }

    pub fn secret_or(&self, value: Option<String>, label: &str) -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None => self.secret(label),
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

/// What the person typed at the interview prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Answer(String),
    End,
}

pub const END_COMMAND: &str = "/end";

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        if line.trim().eq_ignore_ascii_case(END_COMMAND) {
            ChatInput::End
        } else {
            ChatInput::Answer(line.to_string())
        }
    }
}

/// Interview input with line editing and history
pub struct ChatEditor {
    editor: DefaultEditor,
}

impl ChatEditor {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize the line editor")?;
        Ok(Self { editor })
    }

    /// Ctrl-C and Ctrl-D both count as a request to end the interview
    pub fn read(&mut self) -> Result<ChatInput> {
        match self.editor.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ChatInput::parse(&line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(ChatInput::End),
            Err(error) => Err(error).context("Failed to read input"),
        }
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.editor.readline(&format!("{question} [y/N] ")) {
            Ok(line) => Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes")),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
            Err(error) => Err(error).context("Failed to read input"),
        }
    }
}
