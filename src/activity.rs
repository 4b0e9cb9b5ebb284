use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // e.g. "3:45:22 PM: You fed your pet! Hunger decreased."
        write!(f, "{}: {}", self.at.format("%-I:%M:%S %p"), self.message)
    }
}

/// Bounded, most-recent-first record of what happened to the pet.
///
/// The front of the deque is the newest entry. Pushing past capacity drops
/// the oldest entry from the back.
#[derive(Clone, Debug)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub const CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(Local::now(), message);
    }

    pub fn push_at(&mut self, at: DateTime<Local>, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            at,
            message: message.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Formatted copies, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(Self::CAPACITY)
    }
}
