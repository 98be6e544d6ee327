//! Load orchestration: one insert per record of a loadable batch.

use log::warn;

use crate::error::SinkError;
use crate::pipeline::observability::ImportObserver;
use crate::sink::RecordSink;
use crate::types::{InsertResult, NormalizedRecord};

/// Insert every record in order, reporting each outcome to the observer.
///
/// Row-level insert failures (e.g. a duplicate email) do not abort the remaining
/// records; only batch-level validation failure prevents a load, and that is enforced
/// upstream by the type: the only source of records here is
/// [`crate::types::BatchDecision::Loadable`]. There is no transactional wrapping, so a
/// failure does not roll back records already inserted in the same run.
pub async fn load<S: RecordSink + ?Sized>(
    records: &[NormalizedRecord],
    sink: &S,
    observer: Option<&dyn ImportObserver>,
) -> Vec<InsertResult> {
    let mut results = Vec::with_capacity(records.len());
    for record in records {
        let result = sink.insert(record).await;
        if let Some(obs) = observer {
            obs.on_insert(record, &result);
        }
        results.push(result);
    }
    results
}

/// Rebuild the users table: ensure the schema, drop any existing table, create it fresh.
///
/// A failed schema step or a failed drop is reported and does not prevent the create
/// attempt; only a failed create is an error.
pub async fn recreate_table<S: RecordSink + ?Sized>(sink: &S) -> Result<(), SinkError> {
    if let Err(e) = sink.create_schema().await {
        warn!("schema setup failed: {e}");
    }
    if let Err(e) = sink.drop_table().await {
        warn!("dropping users table failed: {e}");
    }
    sink.create_table().await
}
