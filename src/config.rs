//! Run configuration: a single immutable value built once from parsed options.
//!
//! The CLI boundary parses flags into [`CliOptions`]; [`RunMode::from_options`] resolves
//! them into exactly one of the closed set of run modes, rejecting every contradictory
//! combination up front. Nothing downstream ever re-checks "is this option set".

use std::path::PathBuf;

use crate::error::{ImportError, ImportResult};

/// Database connection parameters (`-u`, `-p`, `-h`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbParams {
    /// Database username.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Database host.
    pub host: String,
}

/// Raw option values as parsed from the command line, before mode resolution.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    /// `--create_table` was passed.
    pub create_table: bool,
    /// `--dry_run` was passed.
    pub dry_run: bool,
    /// `--file <path>` value, if passed.
    pub file: Option<PathBuf>,
    /// `-u <user>` value, if passed.
    pub user: Option<String>,
    /// `-p <password>` value, if passed.
    pub password: Option<String>,
    /// `-h <host>` value, if passed.
    pub host: Option<String>,
}

impl CliOptions {
    fn has_credentials(&self) -> bool {
        self.user.is_some() || self.password.is_some() || self.host.is_some()
    }
}

/// The closed set of mutually exclusive run modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Rebuild the users table, then exit without processing any file.
    CreateTable(DbParams),
    /// Validate the file, then load it if every row is valid.
    Import {
        /// Path of the CSV file to process.
        file: PathBuf,
        /// Connection parameters for the storage sink.
        db: DbParams,
    },
    /// Validate and report only; storage is never touched.
    DryRun {
        /// Path of the CSV file to process.
        file: PathBuf,
    },
}

impl RunMode {
    /// Resolve raw options into a run mode.
    ///
    /// Rules:
    ///
    /// - `--create_table` excludes `--file` and `--dry_run`, and requires credentials
    /// - `--dry_run` requires `--file` and excludes all database credentials
    /// - `--file` alone is an import and requires credentials
    /// - anything else is a configuration error
    pub fn from_options(opts: CliOptions) -> ImportResult<Self> {
        if opts.create_table {
            if opts.file.is_some() || opts.dry_run {
                return Err(config_error(
                    "--create_table cannot be combined with --file or --dry_run",
                ));
            }
            return Ok(Self::CreateTable(require_db(&opts)?));
        }

        if opts.dry_run {
            if opts.has_credentials() {
                return Err(config_error(
                    "--dry_run does not take database credentials",
                ));
            }
            let file = opts
                .file
                .ok_or_else(|| config_error("--dry_run requires --file <path>"))?;
            return Ok(Self::DryRun { file });
        }

        match &opts.file {
            Some(file) => {
                let db = require_db(&opts)?;
                Ok(Self::Import {
                    file: file.clone(),
                    db,
                })
            }
            None => Err(config_error(
                "nothing to do; pass --create_table, --file, or --dry_run --file",
            )),
        }
    }
}

fn require_db(opts: &CliOptions) -> ImportResult<DbParams> {
    match (&opts.user, &opts.password, &opts.host) {
        (Some(user), Some(password), Some(host)) => Ok(DbParams {
            user: user.clone(),
            password: password.clone(),
            host: host.clone(),
        }),
        _ => Err(config_error(
            "database credentials required: -u <user> -p <password> -h <host>",
        )),
    }
}

fn config_error(message: &str) -> ImportError {
    ImportError::Config {
        message: message.to_string(),
    }
}
