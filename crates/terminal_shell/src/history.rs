//! Bounded log of submitted lines, most recent first.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Previously submitted raw input, newest at index 0.
pub struct CommandHistoryLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CommandHistoryLog {
    /// Creates an empty log holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuilds a log from persisted lines (newest first), dropping overflow.
    pub fn restore(lines: Vec<String>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        log.entries = lines.into_iter().take(log.capacity).collect();
        log
    }

    /// Records a submission as the newest entry, evicting the oldest past capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.entries.truncate(self.capacity);
    }

    /// Returns the entry `index` steps back from the newest.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of remembered lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been submitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of remembered lines.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copies the lines out, newest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
