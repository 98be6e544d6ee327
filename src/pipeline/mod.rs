//! The normalization + validation pipeline.
//!
//! Most callers should use [`batch::process_path`], which:
//!
//! - reads the CSV file (header skipped, exactly three fields per row)
//! - normalizes every row via [`normalize::normalize`]
//! - validates every row via [`validate::validate`], never stopping at a failure
//! - reports per-row diagnostics to an [`observability::ImportObserver`]
//! - collapses the batch into an all-or-nothing [`crate::types::BatchDecision`]

pub mod batch;
pub mod normalize;
pub mod observability;
pub mod validate;

pub use batch::{process_path, process_reader, process_records};
pub use normalize::normalize;
pub use observability::{CompositeObserver, FileObserver, ImportObserver, StdoutObserver};
pub use validate::{email_is_valid, validate};
