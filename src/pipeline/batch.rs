//! Batch processing: read, normalize, and validate every data row, then decide.

use std::io::Read;
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::{Batch, BatchDecision, RawRecord, ValidationOutcome};

use super::normalize::normalize;
use super::observability::ImportObserver;
use super::validate::validate;

/// Process the CSV file at `path` into a [`Batch`] and its [`BatchDecision`].
///
/// See [`process_reader`] for the row rules.
pub fn process_path(
    path: impl AsRef<Path>,
    observer: Option<&dyn ImportObserver>,
) -> ImportResult<(Batch, BatchDecision)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    process_reader(&mut rdr, observer)
}

/// Process CSV data from an existing CSV reader.
///
/// Rules:
///
/// - The first line is a header and is always skipped.
/// - Every data row must have exactly three fields (name, surname, email); a row with
///   any other width fails the whole run, since line attribution past it is unreliable.
/// - Every row is normalized and validated; the scan never stops at an invalid row, so
///   the operator sees every offending email in one pass.
///
/// Reports `on_row` for every data row, `on_invalid_email` for each failure, and
/// `on_decision` once after the full pass. This function performs no storage I/O.
pub fn process_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    observer: Option<&dyn ImportObserver>,
) -> ImportResult<(Batch, BatchDecision)> {
    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based line numbers; +1 again because the header is line 1.
        let line = row_idx0 + 2;
        let record = result?;
        if record.len() != 3 {
            return Err(ImportError::FieldCount {
                line,
                found: record.len(),
            });
        }

        rows.push(RawRecord {
            name: record.get(0).unwrap_or("").to_string(),
            surname: record.get(1).unwrap_or("").to_string(),
            email: record.get(2).unwrap_or("").to_string(),
            line,
        });
    }

    Ok(process_records(rows, observer))
}

/// Normalize and validate already-read rows, in source order.
///
/// Split out from [`process_reader`] so callers holding rows from another source can
/// reuse the same pipeline.
pub fn process_records(
    rows: Vec<RawRecord>,
    observer: Option<&dyn ImportObserver>,
) -> (Batch, BatchDecision) {
    let mut outcomes = Vec::with_capacity(rows.len());
    for raw in &rows {
        let normalized = normalize(raw);
        if let Some(obs) = observer {
            obs.on_row(raw.line, &normalized);
        }

        let outcome = validate(normalized, raw.line);
        if let ValidationOutcome::Invalid {
            record,
            reason,
            line,
        } = &outcome
        {
            if let Some(obs) = observer {
                obs.on_invalid_email(*line, record, reason);
            }
        }
        outcomes.push(outcome);
    }

    let batch = Batch::new(outcomes);
    let decision = batch.decide();
    if let Some(obs) = observer {
        obs.on_decision(&decision);
    }
    (batch, decision)
}
