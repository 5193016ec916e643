//! `SchoolDb` - A CLI tool for managing teachers, classes and students
//!
//! This library keeps three flat tables (Teacher, Class, Student) in a local
//! SQLite file, inserts rows on request and answers a fixed set of relational
//! queries. Every invocation opens the store, ensures the schema, runs the
//! requested commands in a fixed order and closes the store again.

pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod system;
pub mod utils;

use anyhow::{Context as _, Result};
use cli::{Args, execute_all};
use config::Config;
use std::io::{self, Write};
use store::Store;
use system::{RealSystem, System};
use tracing::debug;

/// Main entry point for the schooldb library, printing to stdout
///
/// # Errors
///
/// Returns an error if settings cannot be resolved, the store cannot be
/// opened, or any command fails
pub fn run(args: &Args) -> Result<()> {
    let system = RealSystem::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(args, &system, &mut out)
}

/// Run the requested commands using `system` and writing results to `out`
///
/// The store is closed on every path: explicitly on success, by drop when a
/// command fails.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved, the store cannot be
/// opened, or any command fails
pub fn run_with(args: &Args, system: &dyn System, out: &mut dyn Write) -> Result<()> {
    let config = Config::resolve(system, args)?;

    utils::fs::create_parent_directories(system, &config.database)?;
    let store = Store::open(&config.database, config.reference_policy())?;

    let commands = args.commands();
    if commands.is_empty() {
        debug!("No commands given");
    }
    execute_all(&commands, &store, out)?;
    out.flush().context("Failed to flush output")?;

    store.close()?;
    Ok(())
}
