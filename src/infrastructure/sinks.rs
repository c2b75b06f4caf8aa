//! Append-only persistence sinks.
//!
//! Every sink line is `<timestamp>,<record>` with the timestamp in local
//! time as `YYYY-MM-DD HH:MM:SS.mmm`. Persistence is best-effort: a write
//! failure is logged and swallowed, never propagated into the pipeline.

use crate::soa::Connector;
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Current local time in the sink line format.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Appends timestamped records to one file, opened per write.
pub struct RecordSink {
    path: PathBuf,
}

impl RecordSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped record line.
    pub fn append(&self, record: &dyn fmt::Display) {
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path);
        let mut file = match opened {
            Ok(file) => file,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "sink open failed");
                return;
            }
        };
        if let Err(error) = writeln!(file, "{},{}", timestamp_now(), record) {
            warn!(path = %self.path.display(), %error, "sink write failed");
        }
    }
}

impl<V: fmt::Display> Connector<V> for RecordSink {
    fn publish(&self, data: &V) {
        self.append(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        let sink = RecordSink::new(&path);

        sink.append(&"first");
        sink.append(&"second");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(",first"));
        assert!(lines[1].ends_with(",second"));
        // Timestamp prefix: "YYYY-MM-DD HH:MM:SS.mmm"
        let stamp = lines[0].split(',').next().unwrap();
        assert_eq!(stamp.len(), 23);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path cannot be opened as a file; append must not panic.
        let sink = RecordSink::new(dir.path());
        sink.append(&"dropped");
    }
}
