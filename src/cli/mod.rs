//! Command-line interface module
//! 
//! Handles argument parsing and ordered command dispatch

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
