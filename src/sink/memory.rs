//! In-memory [`RecordSink`] used to test the load orchestrator without a database.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SinkError;
use crate::types::{InsertResult, NormalizedRecord};

use super::RecordSink;

/// A fake sink backed by a `Vec`, enforcing the same unique-email constraint as the
/// real users table.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<State>,
    fail_drops: bool,
}

#[derive(Debug, Default)]
struct State {
    table_exists: bool,
    rows: Vec<NormalizedRecord>,
}

impl MemorySink {
    /// Create a sink with the users table already in place.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                table_exists: true,
                rows: Vec::new(),
            }),
            fail_drops: false,
        }
    }

    /// Create a sink whose `drop_table` always fails, for exercising DDL error paths.
    pub fn failing_drops() -> Self {
        Self {
            state: Mutex::new(State {
                table_exists: true,
                rows: Vec::new(),
            }),
            fail_drops: true,
        }
    }

    /// Rows inserted so far, in insertion order.
    pub fn rows(&self) -> Vec<NormalizedRecord> {
        self.state.lock().expect("sink mutex poisoned").rows.clone()
    }

    /// Number of rows inserted so far.
    pub fn row_count(&self) -> usize {
        self.state.lock().expect("sink mutex poisoned").rows.len()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn create_schema(&self) -> Result<(), SinkError> {
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), SinkError> {
        if self.fail_drops {
            return Err(SinkError::Other {
                message: "drop rejected by sink".to_string(),
            });
        }
        let mut state = self.state.lock().expect("sink mutex poisoned");
        state.table_exists = false;
        state.rows.clear();
        Ok(())
    }

    async fn create_table(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        state.table_exists = true;
        state.rows.clear();
        Ok(())
    }

    async fn insert(&self, record: &NormalizedRecord) -> InsertResult {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        if !state.table_exists {
            return InsertResult::Failed("relation \"users\" does not exist".to_string());
        }
        if state.rows.iter().any(|r| r.email == record.email) {
            return InsertResult::Failed(format!("duplicate email '{}'", record.email));
        }
        state.rows.push(record.clone());
        InsertResult::Inserted
    }
}
