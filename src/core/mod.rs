//! Core functionality behind the built-in commands
//!
//! Version bumping and file inspection.

pub mod inspect;
pub mod version;

pub use inspect::{EntryKind, FileReport};
pub use version::{BumpLevel, SemVer, VersionParser};
