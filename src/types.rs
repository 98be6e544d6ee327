//! Core data model for the import pipeline.
//!
//! One CSV file becomes a sequence of [`RawRecord`]s. Each raw record is corrected into a
//! [`NormalizedRecord`], validated into a [`ValidationOutcome`], and the full set of outcomes
//! forms a [`Batch`] that collapses into a single [`BatchDecision`]: the batch either loads
//! in its entirety or not at all.

use serde::{Deserialize, Serialize};

/// One data row as read from the CSV source, before any correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Raw name field.
    pub name: String,
    /// Raw surname field.
    pub surname: String,
    /// Raw email field.
    pub email: String,
    /// 1-indexed source line. The header is line 1, so data rows start at line 2.
    pub line: usize,
}

/// A record after normalization (whitespace stripping, casing, apostrophe handling).
///
/// Produced by [`crate::pipeline::normalize()`]; normalization is idempotent, so
/// normalizing an already-normalized record yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Corrected name ("john" -> "John").
    pub name: String,
    /// Corrected surname ("o'brien" -> "O'Brien").
    pub surname: String,
    /// Lowercased email.
    pub email: String,
}

/// Per-row validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The row passed email validation.
    Valid(NormalizedRecord),
    /// The row failed validation; carries enough context to report and re-run.
    Invalid {
        /// The normalized record, including the offending email value.
        record: NormalizedRecord,
        /// Human-readable failure reason.
        reason: String,
        /// 1-indexed source line of the row.
        line: usize,
    },
}

impl ValidationOutcome {
    /// Returns `true` for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// All validation outcomes for one file, in source order, header excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    /// One outcome per data row.
    pub outcomes: Vec<ValidationOutcome>,
}

impl Batch {
    /// Create a batch from per-row outcomes.
    pub fn new(outcomes: Vec<ValidationOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of data rows in the batch.
    pub fn row_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of rows that failed validation.
    pub fn invalid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_valid()).count()
    }

    /// Collapse the batch into a load decision.
    ///
    /// The decision is strictly all-or-nothing: a single invalid row rejects the whole
    /// batch, regardless of how many other rows are valid.
    pub fn decide(&self) -> BatchDecision {
        let mut failures = Vec::new();
        for outcome in &self.outcomes {
            if let ValidationOutcome::Invalid { reason, line, .. } = outcome {
                failures.push((*line, reason.clone()));
            }
        }

        if failures.is_empty() {
            let records = self
                .outcomes
                .iter()
                .filter_map(|o| match o {
                    ValidationOutcome::Valid(record) => Some(record.clone()),
                    ValidationOutcome::Invalid { .. } => None,
                })
                .collect();
            BatchDecision::Loadable(records)
        } else {
            BatchDecision::Rejected {
                invalid: failures.len(),
                failures,
            }
        }
    }
}

/// The all-or-nothing load decision for a [`Batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchDecision {
    /// Every row validated; the records may be loaded, in source order.
    Loadable(Vec<NormalizedRecord>),
    /// At least one row failed validation; nothing may be loaded.
    Rejected {
        /// Total count of invalid rows.
        invalid: usize,
        /// `(source line, reason)` for every invalid row, in source order.
        failures: Vec<(usize, String)>,
    },
}

/// Outcome of one insert attempt against a [`crate::sink::RecordSink`].
///
/// Created only while loading a loadable batch; never persisted beyond the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InsertResult {
    /// The record was stored.
    Inserted,
    /// Storage rejected the record (e.g. duplicate email under the uniqueness constraint).
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str) -> NormalizedRecord {
        NormalizedRecord {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn all_valid_batch_is_loadable_in_order() {
        let batch = Batch::new(vec![
            ValidationOutcome::Valid(record("a@example.com")),
            ValidationOutcome::Valid(record("b@example.com")),
        ]);

        match batch.decide() {
            BatchDecision::Loadable(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].email, "a@example.com");
                assert_eq!(records[1].email, "b@example.com");
            }
            other => panic!("expected Loadable, got {other:?}"),
        }
    }

    #[test]
    fn single_invalid_row_rejects_whole_batch() {
        let batch = Batch::new(vec![
            ValidationOutcome::Valid(record("a@example.com")),
            ValidationOutcome::Invalid {
                record: record("xxxx@asdf@asdf"),
                reason: "invalid email format 'xxxx@asdf@asdf'".to_string(),
                line: 3,
            },
            ValidationOutcome::Valid(record("c@example.com")),
        ]);

        assert_eq!(batch.invalid_count(), 1);
        match batch.decide() {
            BatchDecision::Rejected { invalid, failures } => {
                assert_eq!(invalid, 1);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, 3);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_is_loadable_and_empty() {
        let batch = Batch::default();
        match batch.decide() {
            BatchDecision::Loadable(records) => assert!(records.is_empty()),
            other => panic!("expected Loadable, got {other:?}"),
        }
    }
}
