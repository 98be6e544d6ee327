use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type shared across the import pipeline and the CLI boundary.
///
/// Per-row email failures are deliberately *not* represented here: they are
/// [`crate::types::ValidationOutcome::Invalid`] values, accumulated and resolved at the
/// batch level. This enum covers the failures that stop a run outright.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. CSV file missing or unreadable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decode error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid or contradictory command line options.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A data row did not have exactly three fields (name, surname, email).
    #[error("line {line}: expected 3 fields (name, surname, email), found {found}")]
    FieldCount { line: usize, found: usize },

    /// Storage-level failure (connection or DDL).
    #[error("storage error: {0}")]
    Sink(#[from] SinkError),
}

/// Error returned by [`crate::sink::RecordSink`] schema and table operations.
///
/// Per-record insert rejections are not errors either; they surface as
/// [`crate::types::InsertResult::Failed`] so a load pass can keep going.
#[derive(Debug, Error)]
pub enum SinkError {
    #[cfg(feature = "postgres")]
    /// Database error from the Postgres sink.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Sink-specific failure with no richer structure.
    #[error("{message}")]
    Other { message: String },
}
