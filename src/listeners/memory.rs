//! In-memory listener.

use std::sync::{Mutex, PoisonError};

use crate::listeners::TraceListener;
use crate::registry::record::TraceRecord;

/// Keeps every record it receives. Useful for tests and inspection.
#[derive(Debug, Default)]
pub struct MemoryListener {
    name: String,
    records: Mutex<Vec<TraceRecord>>,
}

impl MemoryListener {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the captured records, oldest first.
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(TraceRecord::message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TraceListener for MemoryListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn trace(&self, record: &TraceRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}
