use std::collections::VecDeque;

use super::types::ExecutionRecord;

/// Bounded FIFO log of past dispatch executions.
///
/// Ring-buffer semantics: appending past capacity evicts the oldest
/// record in O(1).
pub struct HistoryLedger {
    entries: VecDeque<ExecutionRecord>,
    capacity: usize,
}

impl HistoryLedger {
    /// Create an empty ledger holding at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when over capacity.
    pub fn append(&mut self, record: ExecutionRecord) {
        self.entries.push_back(record);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no record is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clone out the retained records, oldest first.
    pub fn snapshot(&self) -> Vec<ExecutionRecord> {
        self.entries.iter().cloned().collect()
    }
}
