//! `user-import` ingests a CSV file of user records (name, surname, email), normalizes
//! and validates every row, and loads valid batches into a relational `users` table.
//!
//! The load decision is strictly all-or-nothing: a single invalid email rejects the
//! entire batch, and zero inserts happen. The scan still completes, so every offending
//! row is reported with its value and 1-indexed source line.
//!
//! ## What a run does
//!
//! - **Normalize**: strip whitespace, lowercase, capitalize name/surname, and apply the
//!   apostrophe rule ("o'brien" becomes "O'Brien"). See [`pipeline::normalize()`].
//! - **Validate**: syntax-only email checking against a documented grammar — no DNS,
//!   no mailbox verification. See [`pipeline::email_is_valid`].
//! - **Decide**: collapse all row outcomes into a [`types::BatchDecision`].
//! - **Load**: one parameterized insert per record of a loadable batch; a rejected
//!   insert (duplicate email) does not abort the rest. See [`load::load`].
//!
//! ## Quick example: validate a file
//!
//! ```no_run
//! use user_import::pipeline::{process_path, StdoutObserver};
//! use user_import::types::BatchDecision;
//!
//! # fn main() -> Result<(), user_import::ImportError> {
//! let observer = StdoutObserver;
//! let (_batch, decision) = process_path("users.csv", Some(&observer))?;
//! match decision {
//!     BatchDecision::Loadable(records) => println!("{} rows ready to load", records.len()),
//!     BatchDecision::Rejected { invalid, .. } => println!("{invalid} invalid emails"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: load into a sink
//!
//! The storage destination is abstracted behind [`sink::RecordSink`], so the load
//! orchestrator runs against the in-memory fake exactly as it does against Postgres.
//!
//! ```no_run
//! use user_import::load::load;
//! use user_import::sink::MemorySink;
//! use user_import::types::NormalizedRecord;
//!
//! # async fn run() {
//! let sink = MemorySink::new();
//! let records = vec![NormalizedRecord {
//!     name: "John".to_string(),
//!     surname: "O'Brien".to_string(),
//!     email: "john@example.com".to_string(),
//! }];
//! let results = load(&records, &sink, None).await;
//! assert_eq!(results.len(), 1);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: normalization, validation, batch processing, and diagnostics
//! - [`types`]: data model (records, outcomes, batch decision)
//! - [`sink`]: the [`sink::RecordSink`] seam plus in-memory and Postgres sinks
//! - [`load`]: load orchestration and table rebuilding
//! - [`config`]: the closed set of run modes built from CLI options
//! - [`error`]: error types used across the crate

pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod sink;
pub mod types;

pub use error::{ImportError, ImportResult};
