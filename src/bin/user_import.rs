//! Command line front end: flag parsing, logging setup, and mode dispatch.
//!
//! All decision logic lives in the library; this binary only turns flags into a
//! [`RunMode`] and wires the pipeline to a [`PostgresSink`].

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use user_import::config::{CliOptions, RunMode};
use user_import::load::{load, recreate_table};
use user_import::pipeline::{process_path, StdoutObserver};
use user_import::sink::PostgresSink;
use user_import::types::{BatchDecision, InsertResult};
use user_import::ImportError;

// `-h` is the database host here, so clap's default help shorthand is disabled and
// `--help` is re-added explicitly below.
#[derive(Parser, Debug)]
#[command(
    name = "user-import",
    about = "Validate a CSV of user records and load it into the users table",
    disable_help_flag = true
)]
struct Args {
    /// Path of the CSV file to process.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Rebuild the users table, then exit without processing any file.
    #[arg(long = "create_table")]
    create_table: bool,

    /// Validate and report without altering the database.
    #[arg(long = "dry_run")]
    dry_run: bool,

    /// Database username.
    #[arg(short = 'u', value_name = "USER")]
    user: Option<String>,

    /// Database password.
    #[arg(short = 'p', value_name = "PASSWORD")]
    password: Option<String>,

    /// Database host.
    #[arg(short = 'h', value_name = "HOST")]
    host: Option<String>,

    /// Print usage information.
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let opts = CliOptions {
        create_table: args.create_table,
        dry_run: args.dry_run,
        file: args.file,
        user: args.user,
        password: args.password,
        host: args.host,
    };

    let mode = match RunMode::from_options(opts) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(mode).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(mode: RunMode) -> Result<ExitCode, ImportError> {
    let observer = StdoutObserver;

    match mode {
        RunMode::CreateTable(db) => {
            let sink = PostgresSink::connect(&db).await?;
            recreate_table(&sink).await?;
            println!("users table rebuilt");
            Ok(ExitCode::SUCCESS)
        }
        RunMode::DryRun { file } => {
            let (_batch, decision) = process_path(&file, Some(&observer))?;
            Ok(exit_code_for(&decision))
        }
        RunMode::Import { file, db } => {
            let (_batch, decision) = process_path(&file, Some(&observer))?;
            match decision {
                BatchDecision::Loadable(records) => {
                    // Connect only now: a rejected batch never touches the database.
                    let sink = PostgresSink::connect(&db).await?;
                    let results = load(&records, &sink, Some(&observer)).await;
                    let failed = results
                        .iter()
                        .filter(|r| matches!(r, InsertResult::Failed(_)))
                        .count();
                    if failed > 0 {
                        log::warn!("{failed} of {} inserts failed", results.len());
                    }
                    Ok(ExitCode::SUCCESS)
                }
                decision @ BatchDecision::Rejected { .. } => Ok(exit_code_for(&decision)),
            }
        }
    }
}

fn exit_code_for(decision: &BatchDecision) -> ExitCode {
    match decision {
        BatchDecision::Loadable(_) => ExitCode::SUCCESS,
        BatchDecision::Rejected { .. } => ExitCode::FAILURE,
    }
}
