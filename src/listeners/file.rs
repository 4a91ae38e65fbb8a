//! File-appending listener.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::UNIX_EPOCH;

use crate::error::TraceResult;
use crate::listeners::TraceListener;
use crate::registry::record::TraceRecord;

/// Appends one line per record: `<epoch_ms> <event_type> <channel> <id> <message>`.
#[derive(Debug)]
pub struct FileListener {
    name: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileListener {
    /// Open (or create) the file in append mode.
    pub fn open(name: &str, path: &Path) -> TraceResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceListener for FileListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn trace(&self, record: &TraceRecord) {
        let millis = record
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        // Multi-line messages (e.g. error chains) stay on one line.
        let message = record.message().replace('\n', " | ");

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(
            writer,
            "{} {} {} {} {}",
            millis, record.event_type, record.source, record.id, message
        ) {
            tracing::error!(path = ?self.path, error = %e, "Failed to write trace record");
        }
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.flush() {
            tracing::error!(path = ?self.path, error = %e, "Failed to flush trace file");
        }
    }
}

impl Drop for FileListener {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}
