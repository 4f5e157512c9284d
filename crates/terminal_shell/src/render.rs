//! Flattens scrollback into display lines.

use serde::{Deserialize, Serialize};
use terminal_shell_contract::{EntryId, HistoryEntry};

/// Styling class of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// Echoed input.
    Prompt,
    /// Normal output.
    Output,
    /// Error-flagged output.
    Error,
}

impl LineKind {
    /// Stable id used in CSS classes.
    pub fn id(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Output => "output",
            Self::Error => "error",
        }
    }
}

/// One display line derived from a scrollback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLine {
    /// Entry the line belongs to.
    pub entry_id: EntryId,
    /// Line position within its entry, for stable keys.
    pub line: usize,
    /// Styling class.
    pub kind: LineKind,
    /// Text to display.
    pub text: String,
}

/// Prompt prefix for `cwd`.
pub fn prompt(cwd: &str) -> String {
    format!("{cwd}>")
}

/// Echo text recorded for a submission typed at `cwd`.
pub fn echo_line(cwd: &str, raw_line: &str) -> String {
    format!("{} {raw_line}", prompt(cwd))
}

/// Renders one entry: its prompt line, then one line per output line.
pub fn render_entry(entry: &HistoryEntry) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    if !entry.input_text.is_empty() {
        lines.push(RenderedLine {
            entry_id: entry.id.clone(),
            line: 0,
            kind: LineKind::Prompt,
            text: entry.input_text.clone(),
        });
    }
    if let Some(output) = &entry.output_text {
        let kind = if entry.is_error {
            LineKind::Error
        } else {
            LineKind::Output
        };
        let offset = lines.len();
        lines.extend(output.split('\n').enumerate().map(|(index, text)| RenderedLine {
            entry_id: entry.id.clone(),
            line: offset + index,
            kind,
            text: text.to_string(),
        }));
    }
    lines
}

/// Renders a whole transcript in order.
pub fn render_scrollback(entries: &[HistoryEntry]) -> Vec<RenderedLine> {
    entries.iter().flat_map(render_entry).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(input: &str, output: Option<&str>, is_error: bool) -> HistoryEntry {
        HistoryEntry {
            id: EntryId::new("e-1"),
            input_text: input.to_string(),
            output_text: output.map(str::to_string),
            is_error,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn prompt_and_echo_formats() {
        assert_eq!(prompt("/projects"), "/projects>");
        assert_eq!(echo_line("/", "ls -a"), "/> ls -a");
    }

    #[test]
    fn multi_line_output_splits_per_line() {
        let lines = render_entry(&entry("", Some("a\nb"), false));
        let texts = lines.iter().map(|line| line.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(lines.iter().all(|line| line.kind == LineKind::Output));
        assert_eq!(lines[1].line, 1);
    }

    #[test]
    fn error_entries_render_error_lines_after_prompt() {
        let lines = render_entry(&entry("/> x", Some("boom"), true));
        assert_eq!(
            lines.iter().map(|line| line.kind).collect::<Vec<_>>(),
            vec![LineKind::Prompt, LineKind::Error]
        );
    }

    #[test]
    fn empty_output_still_renders_one_line() {
        let lines = render_scrollback(&[entry("", Some(""), false), entry("/> a", None, false)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[1].kind, LineKind::Prompt);
    }
}
