#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use cmdkit::{
    cli::{self, CommandLine, debug_requested},
    config::Settings,
    setup_logging,
    utils::process,
};
use std::env;

fn main() -> Result<()> {
    // Logging first, so settings loading is traced under --debug
    setup_logging(debug_requested(env::args_os()))?;

    // Settings carry the help/usage/version literals, so they come before classification
    let settings_path = Settings::default_path();
    let settings = match &settings_path {
        Some(path) => Settings::load(path)
            .unwrap_or_else(|e| process::stderr_and_exit(&format!("Error: {e}"), 1)),
        None => Settings::default(),
    };

    let command_line = CommandLine::from_env(settings.reserved.clone());

    let code = cli::execute_command(&command_line, &settings, settings_path.as_deref())?;
    if code != 0 {
        process::exit_with_status(code);
    }
    Ok(())
}
