//! # Run Reports
//!
//! JSON summaries of an embed or extract run, written with `--report`.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::stego::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Embed,
    Extract,
}

/// JSON record of one embed or extract run.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: Operation,
    /// RFC 3339 wall-clock time the report was built
    pub timestamp: String,
    pub elapsed_ms: u64,
    /// Share of the carrier covered by the frame, in percent
    pub utilization_pct: f64,
    #[serde(flatten)]
    pub summary: Summary,
}

impl OperationReport {
    pub fn new(operation: Operation, summary: Summary, elapsed: Duration) -> Self {
        Self {
            operation,
            timestamp: chrono::Local::now().to_rfc3339(),
            elapsed_ms: elapsed.as_millis() as u64,
            utilization_pct: utilization(summary.bytes_used, summary.carrier_len),
            summary,
        }
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;

        Ok(())
    }
}

fn utilization(used: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    used as f64 * 100.0 / total as f64
}
