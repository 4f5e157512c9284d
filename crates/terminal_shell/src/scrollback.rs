//! Append-only transcript of echoed input and command output.

use platform_host::{Clock, IdGenerator};
use terminal_shell_contract::{EntryId, HistoryEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered scrollback entries with non-decreasing timestamps.
pub struct Scrollback {
    entries: Vec<HistoryEntry>,
}

impl Scrollback {
    /// Starts a transcript holding only the welcome entry.
    pub fn welcome(ids: &dyn IdGenerator, clock: &dyn Clock, message: &str) -> Self {
        let mut scrollback = Self::default();
        scrollback.reset(ids, clock, message);
        scrollback
    }

    /// Rebuilds a transcript from persisted entries.
    ///
    /// An empty list yields a fresh welcome entry. Timestamps that run backwards are raised to
    /// their predecessor's value.
    pub fn restore(
        entries: Vec<HistoryEntry>,
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
        welcome_message: &str,
    ) -> Self {
        if entries.is_empty() {
            return Self::welcome(ids, clock, welcome_message);
        }
        let mut floor = 0;
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.timestamp_ms = entry.timestamp_ms.max(floor);
                floor = entry.timestamp_ms;
                entry
            })
            .collect();
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends one entry stamped with a fresh id and a non-decreasing timestamp.
    pub fn append(
        &mut self,
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
        input_text: String,
        output_text: Option<String>,
        is_error: bool,
    ) -> &HistoryEntry {
        let floor = self.entries.last().map_or(0, |entry| entry.timestamp_ms);
        self.entries.push(HistoryEntry {
            id: EntryId::new(ids.next_id()),
            input_text,
            output_text,
            is_error,
            timestamp_ms: clock.now_ms().max(floor),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Drops the oldest entries until at most `capacity` remain. Returns how many were dropped.
    pub fn trim_to(&mut self, capacity: usize) -> usize {
        let excess = self.entries.len().saturating_sub(capacity.max(1));
        self.entries.drain(..excess);
        excess
    }

    /// Replaces everything with a single fresh welcome entry.
    pub fn reset(&mut self, ids: &dyn IdGenerator, clock: &dyn Clock, welcome_message: &str) {
        let floor = self.entries.last().map_or(0, |entry| entry.timestamp_ms);
        self.entries.clear();
        self.entries.push(HistoryEntry {
            id: EntryId::new(ids.next_id()),
            input_text: String::new(),
            output_text: Some(welcome_message.to_string()),
            is_error: false,
            timestamp_ms: clock.now_ms().max(floor),
        });
    }
}
