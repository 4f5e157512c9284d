//! Unique identifier sources for scrollback entries.

use std::cell::Cell;

use crate::time::unix_time_ms_now;

/// Source of opaque identifiers that are never reused.
pub trait IdGenerator {
    /// Returns a fresh identifier.
    fn next_id(&self) -> String;
}

#[derive(Debug, Default)]
/// Identifiers built from a millisecond timestamp and a per-process counter.
///
/// The timestamp component keeps identifiers unique across page reloads, the counter keeps
/// them unique within one millisecond.
pub struct TimestampIdGenerator {
    counter: Cell<u64>,
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let count = self.counter.get().wrapping_add(1);
        self.counter.set(count);
        format!("{:x}-{count:x}", unix_time_ms_now())
    }
}

#[derive(Debug)]
/// Deterministic identifiers `<prefix>-1`, `<prefix>-2`, ... for tests.
pub struct SequentialIdGenerator {
    prefix: String,
    counter: Cell<u64>,
}

impl SequentialIdGenerator {
    /// Creates a generator using `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Cell::new(0),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("entry")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let count = self.counter.get() + 1;
        self.counter.set(count);
        format!("{}-{count}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIdGenerator::new("e");
        assert_eq!(ids.next_id(), "e-1");
        assert_eq!(ids.next_id(), "e-2");
    }

    #[test]
    fn timestamp_ids_are_distinct_within_one_millisecond() {
        let ids = TimestampIdGenerator::default();
        let generated = (0..64).map(|_| ids.next_id()).collect::<HashSet<_>>();
        assert_eq!(generated.len(), 64);
    }
}
