//! Shared terminal contracts used by the shell engine and the terminal UI.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable command metadata,
//! command results, scrollback entries, and session snapshots without depending on Leptos,
//! browser APIs, or the engine internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registration metadata for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name typed at the prompt.
    pub name: String,
    /// One-line help text.
    pub description: String,
}

impl CommandDescriptor {
    /// Creates a descriptor from trusted caller input.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns whether `candidate` names this command, ignoring case.
    ///
    /// Both sides fold with [`str::to_lowercase`], the rule the parser applies to typed names.
    pub fn matches(&self, candidate: &str) -> bool {
        self.name == candidate || self.name.to_lowercase() == candidate.to_lowercase()
    }
}

/// Value produced by a command handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum CommandOutput {
    /// Explicit text. An empty string renders as an empty output entry.
    Text(String),
    /// The handler returned nothing; the shell records a default acknowledgement.
    Nothing,
    /// Signal to reset scrollback to a fresh welcome entry.
    Clear,
}

impl CommandOutput {
    /// Wraps text output.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Wraps lines joined by `\n`.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::Text(joined)
    }
}

/// Structured shell error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellErrorCode {
    /// User input violated command usage.
    Usage,
    /// A referenced command or target was not found.
    NotFound,
    /// The command is unavailable in this host context.
    Unavailable,
    /// Internal command failure.
    Internal,
}

/// Error emitted by parsing, lookup, or handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellError {
    /// Error category.
    pub code: ShellErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ShellErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Usage, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ShellErrorCode::Internal, message)
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ShellError {}

/// Opaque scrollback entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    /// Creates an identifier from a generated token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One rendered line or block in scrollback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier assigned at creation.
    pub id: EntryId,
    /// Prompt plus command text; empty for pure-output entries.
    pub input_text: String,
    /// Rendered result text, possibly multi-line.
    pub output_text: Option<String>,
    /// Whether the output is error-styled.
    pub is_error: bool,
    /// Creation time in unix milliseconds.
    pub timestamp_ms: u64,
}

impl HistoryEntry {
    /// Returns whether this entry only carries output.
    pub fn is_output_only(&self) -> bool {
        self.input_text.is_empty()
    }
}

/// Direction for command-history recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryDirection {
    /// Step toward older submissions.
    Older,
    /// Step toward the live buffer.
    Newer,
}

/// Direction for rotating the selected suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleDirection {
    /// Move to the next suggestion.
    Next,
    /// Move to the previous suggestion.
    Previous,
}

/// Terminal color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellTheme {
    /// Dark palette.
    #[default]
    Dark,
    /// Light palette.
    Light,
}

impl ShellTheme {
    /// Stable id used in commands and CSS classes.
    pub fn id(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parses a theme id.
    pub fn from_id(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Style hint passed to the notification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyStyle {
    /// Neutral information.
    Info,
    /// Positive outcome, such as an achievement unlock.
    Success,
    /// Something went wrong.
    Error,
}

impl NotifyStyle {
    /// Stable id used in CSS classes.
    pub fn id(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Read-only snapshot of process-wide session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current working path shown in the prompt.
    pub cwd: String,
    /// Active theme.
    pub theme: ShellTheme,
    /// Whether sound effects are enabled.
    pub sound_enabled: bool,
    /// Unlocked achievement names in unlock order.
    pub achievements: Vec<String>,
}
