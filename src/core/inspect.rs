//! File inspection for the `stat` command

use crate::{
    error::{AppError, Result},
    utils::fs::FileSystemUtils,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// What kind of entry a path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other => "other",
        }
    }
}

/// Metadata gathered for a single path
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub name: Option<String>,
    pub directory: Option<PathBuf>,
    pub extension: Option<String>,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub is_link: bool,
    pub real_path: PathBuf,
    #[serde(skip)]
    modified_display: String,
}

impl FileReport {
    /// Gather metadata for `path`
    #[instrument(skip(fs_utils))]
    pub fn collect<P: AsRef<Path> + std::fmt::Debug>(fs_utils: &FileSystemUtils, path: P) -> Result<Self> {
        let path = path.as_ref();

        if !fs_utils.file_exists(path) {
            return Err(AppError::validation(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }

        let kind = if fs_utils.is_file(path) {
            EntryKind::File
        } else if fs_utils.is_dir(path) {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };

        let modified = fs_utils.file_mod_time(path)?;
        let report = Self {
            path: path.to_path_buf(),
            name: fs_utils.filename(path),
            directory: fs_utils.directory(path),
            extension: fs_utils.file_extension(path),
            kind,
            size: fs_utils.file_size(path)?,
            modified_display: fs_utils.format_mod_time(&modified),
            modified,
            is_link: fs_utils.is_link(path),
            real_path: fs_utils.real_path(path)?,
        };

        debug!("Collected report for {}", path.display());
        Ok(report)
    }

    /// Aligned `key: value` lines
    pub fn render(&self) -> String {
        let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

        let rows = [
            ("path", self.path.display().to_string()),
            ("name", or_dash(self.name.clone())),
            (
                "directory",
                or_dash(self.directory.as_ref().map(|d| d.display().to_string())),
            ),
            ("extension", or_dash(self.extension.clone())),
            ("kind", self.kind.label().to_string()),
            ("size", format!("{} bytes", self.size)),
            ("modified", self.modified_display.clone()),
            ("symlink", if self.is_link { "yes" } else { "no" }.to_string()),
            ("real path", self.real_path.display().to_string()),
        ];

        rows.iter()
            .map(|(key, value)| format!("{:<10} {}", format!("{key}:"), value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_file_report() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("notes.md");
        fs::write(&file, "# notes\n").unwrap();

        let report = FileReport::collect(&FileSystemUtils::new(), &file).unwrap();
        assert_eq!(report.name.as_deref(), Some("notes.md"));
        assert_eq!(report.extension.as_deref(), Some("md"));
        assert_eq!(report.kind, EntryKind::File);
        assert_eq!(report.size, 8);
        assert!(!report.is_link);
        assert_eq!(report.real_path, fs::canonicalize(&file).unwrap());
    }

    #[test]
    fn test_collect_directory_report() {
        let temp_dir = TempDir::new().unwrap();
        let report = FileReport::collect(&FileSystemUtils::new(), temp_dir.path()).unwrap();
        assert_eq!(report.kind, EntryKind::Directory);
        assert_eq!(report.extension, None);
    }

    #[test]
    fn test_collect_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileReport::collect(&FileSystemUtils::new(), temp_dir.path().join("gone"));
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_render() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data");
        fs::write(&file, "12345").unwrap();

        let rendered = FileReport::collect(&FileSystemUtils::new(), &file)
            .unwrap()
            .render();

        assert!(rendered.contains("name:      data"));
        assert!(rendered.contains("extension: -"));
        assert!(rendered.contains("size:      5 bytes"));
        assert!(rendered.contains("kind:      file"));
        assert_eq!(rendered.lines().count(), 9);
    }
}
