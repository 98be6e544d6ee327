//! Storage sinks for validated records.
//!
//! [`RecordSink`] is the narrow seam between the load orchestrator and the underlying
//! storage: schema/table setup plus one insert per record. The orchestrator is tested
//! against [`memory::MemorySink`]; production runs use [`postgres::PostgresSink`]
//! (cargo feature `postgres`).

use async_trait::async_trait;

use crate::error::SinkError;
use crate::types::{InsertResult, NormalizedRecord};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemorySink;
#[cfg(feature = "postgres")]
pub use postgres::PostgresSink;

/// Abstraction over the storage destination.
///
/// One sink instance is exclusively owned by a single run; there is exactly one writer
/// and no background task.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Ensure the schema the users table lives in exists.
    async fn create_schema(&self) -> Result<(), SinkError>;

    /// Drop the users table if it exists.
    async fn drop_table(&self) -> Result<(), SinkError>;

    /// Create the users table: bounded name and surname columns plus a unique email.
    async fn create_table(&self) -> Result<(), SinkError>;

    /// Attempt to insert one record.
    ///
    /// Storage-level rejections (e.g. a duplicate email under the uniqueness
    /// constraint) come back as [`InsertResult::Failed`], not as errors, so a load
    /// pass can continue with the remaining records.
    async fn insert(&self, record: &NormalizedRecord) -> InsertResult;
}
