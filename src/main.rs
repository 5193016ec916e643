//! # `SchoolDb`
//!
//! `SchoolDb` is a command-line tool for keeping a small relational dataset of
//! teachers, classes and students in a local SQLite file.
//!
//! ## Usage
//!
//! ```sh
//! schooldb --add-teacher "Ms. Lee"
//! schooldb --add-class Math 1 --add-student Ann 1
//! schooldb --query class_with_teacher --id 1
//! schooldb --list-teachers --list-classes --list-students
//! ```
//!
//! The store defaults to `./school.db`; use `--database`, `SCHOOLDB_DATABASE`
//! or a `schooldb.yaml` settings file to move it.

use clap::Parser as _;
use schooldb::cli::{Args, print_banner};
use schooldb::error::SchoolError;
use std::io;
use tracing::{Level, error};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    // The banner precedes argument parsing so it also shows on usage errors
    if let Err(err) = print_banner(&mut io::stdout()) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }

    let args = Args::try_parse().unwrap_or_else(|err| err.exit());

    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    match schooldb::run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            // The diagnostic must reach stderr even when logging is filtered off
            if tracing::enabled!(Level::ERROR) {
                error!("{err:#}");
            } else {
                eprintln!("Error: {err:#}");
            }
            std::process::exit(
                err.downcast_ref::<SchoolError>()
                    .map_or(1, SchoolError::exit_code),
            );
        }
    }
}
