//! Live edit buffer with history recall and suggestion selection.

use terminal_shell_contract::{CycleDirection, HistoryDirection};

use crate::history::CommandHistoryLog;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Edit buffer, history cursor and suggestion list.
pub struct InputState {
    buffer: String,
    history_index: Option<usize>,
    suggestions: Vec<String>,
    selected: Option<usize>,
}

impl InputState {
    /// Current buffer text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Position in the history log, `None` when not browsing.
    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    /// Current suggestion list.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Selected suggestion, if any.
    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected
    }

    /// Replaces the buffer as the user types.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Moves through `log`. Returns whether the buffer changed position.
    ///
    /// Older stops at the oldest entry; newer past the newest entry returns to an empty buffer.
    pub fn navigate_history(
        &mut self,
        log: &CommandHistoryLog,
        direction: HistoryDirection,
    ) -> bool {
        let next = match (direction, self.history_index) {
            (HistoryDirection::Older, None) if !log.is_empty() => Some(0),
            (HistoryDirection::Older, Some(index)) if index + 1 < log.len() => Some(index + 1),
            (HistoryDirection::Newer, Some(0)) => None,
            (HistoryDirection::Newer, Some(index)) => Some(index - 1),
            _ => return false,
        };

        self.history_index = next;
        self.buffer = next
            .and_then(|index| log.get(index))
            .unwrap_or_default()
            .to_string();
        self.clear_suggestions();
        true
    }

    /// Replaces the suggestion list and drops any selection.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.selected = None;
    }

    /// Empties the suggestion list.
    pub fn clear_suggestions(&mut self) {
        self.set_suggestions(Vec::new());
    }

    /// Rotates the selection with wraparound. Returns `false` when there is nothing to select.
    pub fn cycle_suggestion(&mut self, direction: CycleDirection) -> bool {
        let count = self.suggestions.len();
        if count == 0 {
            return false;
        }
        self.selected = Some(match (direction, self.selected) {
            (CycleDirection::Next, None) => 0,
            (CycleDirection::Next, Some(index)) => (index + 1) % count,
            (CycleDirection::Previous, None) => count - 1,
            (CycleDirection::Previous, Some(index)) => (index + count - 1) % count,
        });
        true
    }

    /// Moves the selected (or first) suggestion into the buffer.
    pub fn accept_suggestion(&mut self) -> bool {
        let index = self.selected.unwrap_or(0);
        let Some(choice) = self.suggestions.get(index).cloned() else {
            return false;
        };
        self.buffer = choice;
        self.clear_suggestions();
        true
    }

    /// Clears everything after a submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
