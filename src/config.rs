//! Settings for cmdkit
//!
//! Settings are an explicit value handed to whatever needs them. They are
//! read from a YAML file when one exists and fall back to defaults otherwise.

use crate::{cli::ReservedFlags, error::AppError};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "CMDKIT_SETTINGS";

const SETTINGS_DIR: &str = ".cmdkit";
const SETTINGS_FILE: &str = "settings.yaml";

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Application identity shown by the printers
    pub app: AppInfo,
    /// User-facing messages
    pub messages: Messages,
    /// Help, usage and version literals
    pub reserved: ReservedFlags,
    /// Developer profile
    pub developer: DeveloperProfile,
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Messages printed by the dispatcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
    /// Usage line, printed on its own or at the top of the help text
    pub usage: String,
    /// Body of the help text
    pub help: String,
    /// Printed when no command matches
    pub failure: String,
}

/// Developer profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeveloperProfile {
    pub developer: String,
    pub email: String,
    pub default_license: String,
    pub base_repository: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            usage: "Usage: cmdkit <command> [<subcommand>] [options] [args]".to_string(),
            help: [
                "Commands:",
                "  loc                            Show working directory and settings path",
                "  profile                        Show the developer profile",
                "  bump <patch|minor|major> <v>   Print the bumped version",
                "  ls [dir] [--ext EXT] [--match GLOB] [--full]",
                "                                 List files",
                "  stat <path>                    Show file metadata",
                "",
                "Options:",
                "  -h, --help    Show this help",
                "  --usage       Show usage",
                "  --version     Show version",
                "  --debug       Enable debug logging",
            ]
            .join("\n"),
            failure: "Could not complete the command that you entered. Please try again."
                .to_string(),
        }
    }
}

impl Default for DeveloperProfile {
    fn default() -> Self {
        Self {
            developer: "unknown".to_string(),
            email: "unknown".to_string(),
            default_license: "MIT".to_string(),
            base_repository: String::new(),
        }
    }
}

impl Settings {
    /// Location of the settings file: `$CMDKIT_SETTINGS`, else `~/.cmdkit/settings.yaml`
    pub fn default_path() -> Option<PathBuf> {
        match env::var_os(SETTINGS_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE)),
        }
    }

    /// Load settings from `path`, using defaults when the file does not exist
    #[instrument]
    pub fn load<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("Settings file not found: {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::file_system("read", path.to_path_buf(), e))?;
        let settings = Self::parse(&content, path)?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse YAML settings content; `origin` is only used in errors
    pub fn parse(content: &str, origin: &Path) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yml::from_str(content).map_err(|e| {
            AppError::settings(
                format!("Failed to parse {}", origin.display()),
                origin,
                Some(Box::new(e)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_default_reserved_flags() {
        let settings = Settings::default();
        assert_eq!(settings.reserved.help.flags, vec!["-h", "--help"]);
        assert_eq!(settings.reserved.version.command.as_deref(), Some("version"));
        assert_eq!(settings.app.name, "cmdkit");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        fs::write(
            &path,
            "developer:\n  developer: Ada\n  email: ada@example.com\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.developer.developer, "Ada");
        assert_eq!(settings.developer.email, "ada@example.com");
        assert_eq!(settings.developer.default_license, "MIT");
        assert_eq!(settings.messages, Messages::default());
        assert_eq!(settings.reserved, ReservedFlags::default());
    }

    #[test]
    fn test_reserved_literals_from_file() {
        let content = "reserved:\n  help:\n    flags: ['-?']\n    command: hilfe\n";
        let settings = Settings::parse(content, Path::new("inline")).unwrap();
        assert_eq!(settings.reserved.help.flags, vec!["-?"]);
        assert_eq!(settings.reserved.help.command.as_deref(), Some("hilfe"));
        assert_eq!(settings.reserved.usage, ReservedFlags::default().usage);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("  \n", Path::new("inline")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let result = Settings::parse("app: [unclosed", Path::new("broken.yaml"));
        assert!(matches!(result, Err(AppError::Settings { .. })));
    }
}
