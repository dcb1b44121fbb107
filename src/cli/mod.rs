//! Command-line interface module
//!
//! Provides argument classification, command dispatch and the standard
//! help/usage/version output.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{CommandLine, DEBUG_FLAG, RequestLiterals, ReservedFlags, debug_requested};
pub use commands::{CommandContext, CommandRegistry, Dispatch, dispatch, execute_command};
