use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::types::{BatchDecision, InsertResult, NormalizedRecord};

/// Observer interface for import diagnostics.
///
/// The pipeline reports every processed row, every invalid email, the batch decision,
/// and every insert attempt. Implementors can print, append to a log file, or record
/// events for assertions in tests. All callbacks default to no-ops.
pub trait ImportObserver: Send + Sync {
    /// Called once per processed data row with its corrected values.
    fn on_row(&self, _line: usize, _record: &NormalizedRecord) {}

    /// Called for every row whose email failed validation.
    fn on_invalid_email(&self, _line: usize, _record: &NormalizedRecord, _reason: &str) {}

    /// Called once after the full scan with the batch decision.
    fn on_decision(&self, _decision: &BatchDecision) {}

    /// Called once per insert attempt during a load pass.
    fn on_insert(&self, _record: &NormalizedRecord, _result: &InsertResult) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_row(&self, line: usize, record: &NormalizedRecord) {
        for o in &self.observers {
            o.on_row(line, record);
        }
    }

    fn on_invalid_email(&self, line: usize, record: &NormalizedRecord, reason: &str) {
        for o in &self.observers {
            o.on_invalid_email(line, record, reason);
        }
    }

    fn on_decision(&self, decision: &BatchDecision) {
        for o in &self.observers {
            o.on_decision(decision);
        }
    }

    fn on_insert(&self, record: &NormalizedRecord, result: &InsertResult) {
        for o in &self.observers {
            o.on_insert(record, result);
        }
    }
}

/// Prints operator diagnostics to stdout.
///
/// One line per processed row showing the corrected values, one warning per invalid
/// email naming the bad value and its source line, a summary of the batch decision,
/// and one line per insert attempt.
#[derive(Debug, Default)]
pub struct StdoutObserver;

impl ImportObserver for StdoutObserver {
    fn on_row(&self, line: usize, record: &NormalizedRecord) {
        println!(
            "line {line}: {} {} <{}>",
            record.name, record.surname, record.email
        );
    }

    fn on_invalid_email(&self, line: usize, _record: &NormalizedRecord, reason: &str) {
        println!("warning: line {line}: {reason}");
    }

    fn on_decision(&self, decision: &BatchDecision) {
        match decision {
            BatchDecision::Loadable(records) => {
                println!("{} rows valid, 0 invalid emails", records.len());
            }
            BatchDecision::Rejected { invalid, .. } => {
                println!("{invalid} invalid emails, batch rejected; no rows will be loaded");
            }
        }
    }

    fn on_insert(&self, record: &NormalizedRecord, result: &InsertResult) {
        match result {
            InsertResult::Inserted => println!("inserted {}", record.email),
            InsertResult::Failed(reason) => {
                println!("insert failed for {}: {reason}", record.email);
            }
        }
    }
}

/// Appends one JSON object per event to a local log file.
///
/// Writes are best-effort; failures to open/write the log file are ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_row(&self, line: usize, record: &NormalizedRecord) {
        self.append_line(&json!({ "event": "row", "line": line, "record": record }).to_string());
    }

    fn on_invalid_email(&self, line: usize, record: &NormalizedRecord, reason: &str) {
        self.append_line(
            &json!({
                "event": "invalid_email",
                "line": line,
                "email": record.email,
                "reason": reason,
            })
            .to_string(),
        );
    }

    fn on_decision(&self, decision: &BatchDecision) {
        let event = match decision {
            BatchDecision::Loadable(records) => {
                json!({ "event": "decision", "loadable": true, "rows": records.len() })
            }
            BatchDecision::Rejected { invalid, failures } => json!({
                "event": "decision",
                "loadable": false,
                "invalid": invalid,
                "lines": failures.iter().map(|(line, _)| *line).collect::<Vec<_>>(),
            }),
        };
        self.append_line(&event.to_string());
    }

    fn on_insert(&self, record: &NormalizedRecord, result: &InsertResult) {
        self.append_line(
            &json!({ "event": "insert", "email": record.email, "result": result }).to_string(),
        );
    }
}
