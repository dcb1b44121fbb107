//! Command-line argument classification
//!
//! Splits the raw argument vector into a primary command, an optional
//! secondary command and everything else, then answers lookups against it.
//! Nothing here fails: a missing command or option value is reported as an
//! empty string or `None` and the caller decides what to do about it.

use serde::{Deserialize, Serialize};
use std::{env, ffi::OsString};

/// Flag that switches logging to debug level
pub const DEBUG_FLAG: &str = "--debug";

/// Prefix that marks an option token
const OPTION_PREFIX: char = '-';

/// Literals that signal one kind of framework request (help, usage, version)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RequestLiterals {
    /// Flags matched anywhere in the arguments, e.g. `--help`
    pub flags: Vec<String>,
    /// Reserved primary command, e.g. `help`
    pub command: Option<String>,
}

impl RequestLiterals {
    /// Build literals from a flag list and an optional reserved command
    pub fn new<I, S>(flags: I, command: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
            command: command.map(str::to_string),
        }
    }

    fn matches(&self, args: &[String], primary: &str) -> bool {
        let by_command = self
            .command
            .as_deref()
            .is_some_and(|command| !primary.is_empty() && command == primary);

        by_command || args.iter().any(|arg| self.flags.contains(arg))
    }
}

/// The injectable set of help, usage and version literals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReservedFlags {
    pub help: RequestLiterals,
    pub usage: RequestLiterals,
    pub version: RequestLiterals,
}

impl Default for ReservedFlags {
    fn default() -> Self {
        Self {
            help: RequestLiterals::new(["-h", "--help"], Some("help")),
            usage: RequestLiterals::new(["--usage"], Some("usage")),
            version: RequestLiterals::new(["--version"], Some("version")),
        }
    }
}

/// A classified command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    primary: String,
    secondary: String,
    reserved: ReservedFlags,
}

impl CommandLine {
    /// Classify `args` using the default help/usage/version literals
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reserved(program, args, ReservedFlags::default())
    }

    /// Classify `args` with caller-supplied help/usage/version literals
    pub fn with_reserved<I, S>(program: impl Into<String>, args: I, reserved: ReservedFlags) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        // Command tokens end at the first option, and there are at most two.
        let mut commands = args.iter().take_while(|arg| !is_option(arg)).take(2);
        let primary = commands.next().cloned().unwrap_or_default();
        let secondary = commands.next().cloned().unwrap_or_default();

        Self {
            program: program.into(),
            args,
            primary,
            secondary,
            reserved,
        }
    }

    /// Classify the arguments of the running process
    pub fn from_env(reserved: ReservedFlags) -> Self {
        Self::from_os_args(env::args_os(), reserved)
    }

    /// Classify a full argument vector (program name first) of OS strings.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn from_os_args<I>(argv: I, reserved: ReservedFlags) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut argv = argv.into_iter().map(lossy);
        let program = argv.next().unwrap_or_default();
        Self::with_reserved(program, argv, reserved)
    }

    /// Name the executable was invoked as
    pub fn program_name(&self) -> &str {
        &self.program
    }

    /// All arguments after the program name, in their original order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Primary command, empty when none was given
    pub fn command(&self) -> &str {
        &self.primary
    }

    /// Secondary command, empty when none was given
    pub fn secondary_command(&self) -> &str {
        &self.secondary
    }

    /// Whether a primary command was supplied
    pub fn validates_command_suite(&self) -> bool {
        !self.primary.is_empty()
    }

    /// Whether `flag` occurs in the arguments.
    ///
    /// With `requires_argument`, the first occurrence must also be followed
    /// by another element.
    pub fn has_option(&self, flag: &str, requires_argument: bool) -> bool {
        match self.position_of(flag) {
            Some(index) if requires_argument => index + 1 < self.args.len(),
            Some(_) => true,
            None => false,
        }
    }

    /// Value following the first occurrence of `flag`
    pub fn option_value(&self, flag: &str) -> Option<&str> {
        self.argument_after(flag)
    }

    /// Element immediately following the first occurrence of `token`
    pub fn argument_after(&self, token: &str) -> Option<&str> {
        let index = self.position_of(token)?;
        self.args.get(index + 1).map(String::as_str)
    }

    pub fn is_help_requested(&self) -> bool {
        self.reserved.help.matches(&self.args, &self.primary)
    }

    pub fn is_usage_requested(&self) -> bool {
        self.reserved.usage.matches(&self.args, &self.primary)
    }

    pub fn is_version_requested(&self) -> bool {
        self.reserved.version.matches(&self.args, &self.primary)
    }

    fn position_of(&self, token: &str) -> Option<usize> {
        self.args.iter().position(|arg| arg == token)
    }
}

/// Whether `token` is an option rather than a command or positional value
pub fn is_option(token: &str) -> bool {
    token.starts_with(OPTION_PREFIX)
}

/// Whether the debug flag appears after the program name.
///
/// Needs no settings, so logging can be set up before anything else runs.
pub fn debug_requested<I>(argv: I) -> bool
where
    I: IntoIterator<Item = OsString>,
{
    argv.into_iter().skip(1).any(|arg| arg == DEBUG_FLAG)
}

fn lossy(arg: OsString) -> String {
    arg.into_string()
        .unwrap_or_else(|arg| arg.to_string_lossy().into_owned())
}
