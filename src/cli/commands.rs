//! Command registry, dispatcher and built-in command handlers

use crate::{
    cli::{args::is_option, output, CommandLine},
    config::Settings,
    core::{BumpLevel, FileReport, VersionParser},
    error::AppError,
    utils::{fs::FileSystemUtils, process},
};
use anyhow::Context;
use std::{
    collections::BTreeMap,
    fmt,
    path::Path,
};
use tracing::{debug, info, instrument};

/// `ls` options that take a value
const LS_VALUE_OPTIONS: [&str; 2] = ["--ext", "--match"];

/// Everything a command handler gets to work with
pub struct CommandContext<'a> {
    pub command_line: &'a CommandLine,
    pub settings: &'a Settings,
    /// Where settings were looked up, whether or not the file existed
    pub settings_path: Option<&'a Path>,
}

/// A command handler
pub type Handler = fn(&CommandContext<'_>) -> anyhow::Result<()>;

/// Mapping from primary command literal to handler
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in commands
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("loc", execute_loc_command)
            .register("profile", execute_profile_command)
            .register("bump", execute_bump_command)
            .register("ls", execute_ls_command)
            .register("stat", execute_stat_command);
        registry
    }

    /// Register `handler` under `name`, replacing any previous handler
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) -> &mut Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// What the dispatcher did with a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered handler ran
    Handled(String),
    Help,
    Usage,
    Version,
    /// No primary command was given
    MissingCommand,
    /// The primary command has no handler
    Unknown(String),
}

impl Dispatch {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Handled(_) | Self::Help | Self::Usage | Self::Version => 0,
            Self::MissingCommand | Self::Unknown(_) => 1,
        }
    }
}

/// Route a command line to a registered handler or a printer.
///
/// A missing primary command prints usage and fails. A registered command
/// runs its handler, which sees every option including `--help`. Otherwise
/// help, usage and version requests are served in that order, and anything
/// left prints the failure message.
#[instrument(skip_all, fields(command = ctx.command_line.command()))]
pub fn dispatch(registry: &CommandRegistry, ctx: &CommandContext<'_>) -> anyhow::Result<Dispatch> {
    let command_line = ctx.command_line;

    if !command_line.validates_command_suite() {
        debug!("No primary command given");
        output::print_usage(ctx.settings);
        return Ok(Dispatch::MissingCommand);
    }

    let command = command_line.command();
    if let Some(handler) = registry.get(command) {
        debug!("Running command: {}", command);
        handler(ctx).with_context(|| format!("Command '{command}' failed"))?;
        return Ok(Dispatch::Handled(command.to_string()));
    }

    if command_line.is_help_requested() {
        output::print_help(ctx.settings);
        Ok(Dispatch::Help)
    } else if command_line.is_usage_requested() {
        output::print_usage(ctx.settings);
        Ok(Dispatch::Usage)
    } else if command_line.is_version_requested() {
        output::print_version(ctx.settings);
        Ok(Dispatch::Version)
    } else {
        debug!("No handler registered for: {}", command);
        output::print_failure(ctx.settings);
        Ok(Dispatch::Unknown(command.to_string()))
    }
}

/// Dispatch against the built-in registry and return the exit status
pub fn execute_command(
    command_line: &CommandLine,
    settings: &Settings,
    settings_path: Option<&Path>,
) -> anyhow::Result<i32> {
    let registry = CommandRegistry::builtin();
    let ctx = CommandContext {
        command_line,
        settings,
        settings_path,
    };

    let outcome = dispatch(&registry, &ctx)?;
    debug!("Dispatch outcome: {:?}", outcome);
    Ok(outcome.exit_code())
}

/// Print the working directory and the settings file location
fn execute_loc_command(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let cwd = FileSystemUtils::new().current_dir()?;
    process::stdout(&cwd.display().to_string());

    match ctx.settings_path {
        Some(path) => process::stdout(&path.display().to_string()),
        None => process::stdout("(no settings location)"),
    }
    Ok(())
}

/// Print the developer profile from settings
fn execute_profile_command(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let profile = &ctx.settings.developer;
    process::stdout(&profile.developer);
    process::stdout(&profile.email);
    process::stdout(&profile.default_license);
    process::stdout(&profile.base_repository);
    Ok(())
}

/// `bump <patch|minor|major> <version>`
#[instrument(skip_all)]
fn execute_bump_command(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let command_line = ctx.command_line;

    let level_arg = command_line.secondary_command();
    if level_arg.is_empty() {
        return Err(AppError::validation("bump needs a level: patch, minor or major").into());
    }
    let level: BumpLevel = level_arg.parse()?;

    let input = command_line
        .argument_after(level_arg)
        .filter(|arg| !is_option(arg))
        .ok_or_else(|| AppError::validation("bump needs a version to bump, e.g. 1.2.3"))?;

    let version = VersionParser::new()?
        .parse(input)
        .context("Failed to read version")?;
    let bumped = version.bump(level)?;

    info!("Bumped {} to {}", version, bumped);
    process::stdout(&bumped.to_string());
    Ok(())
}

/// `ls [dir] [--ext EXT] [--match GLOB] [--full]`
#[instrument(skip_all)]
fn execute_ls_command(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let command_line = ctx.command_line;
    let fs_utils = FileSystemUtils::new();

    let entries: Vec<String> = if let Some(pattern) = command_line.option_value("--match") {
        let full_path = command_line.has_option("--full", false);
        fs_utils
            .list_match_files(pattern, full_path)?
            .iter()
            .map(|path| path.display().to_string())
            .collect()
    } else {
        let extension = command_line.option_value("--ext");
        let listing = match (ls_directory(command_line), extension) {
            (Some(dir), Some(extension)) => fs_utils.list_filter_files(extension, dir),
            (Some(dir), None) => fs_utils.list_all_files(dir),
            (None, Some(extension)) => fs_utils.list_filter_files_cwd(extension),
            (None, None) => fs_utils.list_all_files_cwd(),
        };
        listing.with_context(|| {
            format!("Failed to list {}", ls_directory(command_line).unwrap_or("."))
        })?
    };

    debug!("Listing {} entries", entries.len());
    for entry in &entries {
        process::stdout(entry);
    }
    Ok(())
}

/// Directory operand of `ls`: the first bare token after the command that
/// is not the value of `--ext` or `--match`
fn ls_directory(command_line: &CommandLine) -> Option<&str> {
    let mut rest = command_line.args().iter().skip(1);
    while let Some(arg) = rest.next() {
        if LS_VALUE_OPTIONS.contains(&arg.as_str()) {
            rest.next();
        } else if !is_option(arg) {
            return Some(arg);
        }
    }
    None
}

/// `stat <path>`
#[instrument(skip_all)]
fn execute_stat_command(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let command_line = ctx.command_line;
    let path = command_line
        .argument_after(command_line.command())
        .ok_or_else(|| AppError::validation("stat needs a path"))?;

    let report = FileReport::collect(&FileSystemUtils::new(), path)?;
    process::stdout(&report.render());
    Ok(())
}
