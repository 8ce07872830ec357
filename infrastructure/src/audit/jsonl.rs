//! JSONL audit trail writer
//!
//! One JSON object per line, flushed after every event so the trail is
//! complete even if the process dies. The file is opened in append mode;
//! one trail accumulates across runs.

use esg_application::{AuditEvent, AuditSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit sink writing JSON Lines to a file
pub struct JsonlAuditSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditSink {
    /// Open (or create) the trail file in append mode
    ///
    /// Returns `None` if the file cannot be opened; auditing then stays
    /// off rather than failing the run.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Failed to create audit directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path,
            }),
            Err(e) => {
                warn!("Failed to open audit trail {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, event: AuditEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize audit event: {}", e);
                return;
            }
        };
        match self.writer.lock() {
            Ok(mut writer) => {
                if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
                    warn!("Failed to write audit event: {}", e);
                }
            }
            Err(poisoned) => {
                let mut writer = poisoned.into_inner();
                let _ = writeln!(writer, "{line}").and_then(|_| writer.flush());
            }
        }
    }
}

impl Drop for JsonlAuditSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
