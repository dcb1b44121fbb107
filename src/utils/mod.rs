//! Utility modules for common functionality
//!
//! Provides file system helpers and output stream / exit helpers.

pub mod fs;
pub mod process;

pub use fs::FileSystemUtils;
