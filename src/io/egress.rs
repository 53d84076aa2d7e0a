//! Snapshot egress - writes dashboard snapshots to file
//!
//! Snapshots are written in JSONL format (one JSON object per line)
//! to the file specified in config.

use crate::services::dashboard::DashboardSnapshot;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Egress writer for dashboard snapshots
pub struct Egress {
    file_path: String,
}

impl Egress {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "egress_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write a snapshot to the egress file
    /// Returns true if successful, false otherwise
    pub fn write_snapshot(&self, snapshot: &DashboardSnapshot) -> bool {
        let json = snapshot.to_json();

        match self.append_line(&json) {
            Ok(()) => {
                info!(
                    id = %snapshot.id,
                    scope = %snapshot.scope,
                    rows = %snapshot.line.len(),
                    "snapshot_egressed"
                );
                true
            }
            Err(e) => {
                error!(
                    id = %snapshot.id,
                    error = %e,
                    "snapshot_egress_failed"
                );
                false
            }
        }
    }

    /// Append a line to the egress file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "egress_written");

        Ok(())
    }
}
