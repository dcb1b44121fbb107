//! Semantic version parsing and bumping

use crate::error::{AppError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, instrument};

/// A `major.minor.patch[-pre][+build]` version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release identifier, without the leading `-`
    pub pre: Option<String>,
    /// Build metadata, without the leading `+`
    pub build: Option<String>,
}

/// Which component to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl FromStr for BumpLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(AppError::validation(format!(
                "Unknown bump level '{s}'. Expected one of: patch, minor, major"
            ))),
        }
    }
}

impl SemVer {
    /// Version with the given level incremented and lower levels reset.
    ///
    /// Fails when the incremented component is already `u64::MAX`.
    pub fn bump(&self, level: BumpLevel) -> Result<Self> {
        let increment = |component: u64| {
            component
                .checked_add(1)
                .ok_or_else(|| AppError::version("Version component out of range", self.to_string()))
        };

        let (major, minor, patch) = match level {
            BumpLevel::Patch => (self.major, self.minor, increment(self.patch)?),
            BumpLevel::Minor => (self.major, increment(self.minor)?, 0),
            BumpLevel::Major => (increment(self.major)?, 0, 0),
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre: None,
            build: None,
        })
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

/// Parser for version strings
pub struct VersionParser {
    re_semver: Regex,
}

impl VersionParser {
    /// Create a new version parser
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_semver: Regex::new(
                r"^v?(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
            )
            .map_err(|e| AppError::validation(format!("Failed to compile regex: {}", e)))?,
        })
    }

    /// Parse a version string; a leading `v` is accepted and dropped
    #[instrument(skip(self))]
    pub fn parse(&self, input: &str) -> Result<SemVer> {
        let trimmed = input.trim();
        let caps = self
            .re_semver
            .captures(trimmed)
            .ok_or_else(|| AppError::version("Not a major.minor.patch version", input))?;

        let number = |index: usize| -> Result<u64> {
            caps.get(index)
                .map_or("0", |m| m.as_str())
                .parse()
                .map_err(|_| AppError::version("Version component out of range", input))
        };

        let version = SemVer {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre: caps.get(4).map(|m| m.as_str().to_string()),
            build: caps.get(5).map(|m| m.as_str().to_string()),
        };

        debug!("Parsed version {}", version);
        Ok(version)
    }
}

impl FromStr for SemVer {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        VersionParser::new()?.parse(s)
    }
}
