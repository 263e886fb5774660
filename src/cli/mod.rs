//! CLI module for refquest
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)
//!
//! Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, FormatArg, SourceArg};
pub use setup::{init_logging, resolve_config};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    use clap::Parser;
    Cli::parse()
}
