//! # cmdkit
//!
//! A small command-line application scaffold. The heart of it is a
//! classifier that splits the raw argument vector into a primary command,
//! an optional secondary command and option flags, and answers lookups over
//! that split. Around it sit a command registry, help/usage/version output,
//! YAML settings and a set of file system helpers for command handlers.
//!
//! ## Example
//!
//! ```
//! use cmdkit::cli::CommandLine;
//!
//! let cl = CommandLine::new("myapp", ["convert", "--out", "result.txt"]);
//! assert_eq!(cl.command(), "convert");
//! assert_eq!(cl.option_value("--out"), Some("result.txt"));
//! assert!(!cl.is_help_requested());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging on stderr with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
