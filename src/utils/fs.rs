//! File system utility functions
//!
//! Path handling, existence checks, metadata and directory listings used by
//! the command handlers. Functions that depend on the working directory take
//! it as a parameter and have a `_cwd` or cwd-default wrapper.

use crate::error::{AppError, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// ctime-style timestamp layout, e.g. `Mon Oct 19 09:14:02 2026`
pub const MOD_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub fn new() -> Self {
        Self
    }

    /// File name of a path, including its extension
    pub fn filename<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Extension of a path without the leading dot
    pub fn file_extension<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    /// Directory part of a path
    pub fn directory<P: AsRef<Path>>(&self, path: P) -> Option<PathBuf> {
        path.as_ref().parent().map(Path::to_path_buf)
    }

    /// Join path components in order
    pub fn make_path<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        parts.into_iter().collect::<PathBuf>()
    }

    /// Get the current working directory
    pub fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir()
            .map_err(|e| AppError::file_system("current_dir", PathBuf::from("."), e))
    }

    /// Full path of `name` inside `dir`
    pub fn full_path_in<D: AsRef<Path>, N: AsRef<Path>>(&self, dir: D, name: N) -> PathBuf {
        dir.as_ref().join(name)
    }

    /// Full path of `name` inside the current working directory
    pub fn full_path<N: AsRef<Path>>(&self, name: N) -> Result<PathBuf> {
        Ok(self.full_path_in(self.current_dir()?, name))
    }

    /// Check if anything exists at a path
    pub fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Check if a directory exists at a path
    pub fn dir_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }

    /// Check if a path exists and is a directory
    pub fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// Check if a path is a symbolic link, without following it
    pub fn is_link<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_symlink()
    }

    /// Resolve a path through any symbolic links
    #[instrument(skip(self))]
    pub fn real_path<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        fs::canonicalize(path).map_err(|e| AppError::file_system("canonicalize", path, e))
    }

    /// Get file size in bytes
    #[instrument(skip(self))]
    pub fn file_size<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<u64> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| AppError::file_system("metadata", path, e))?;
        Ok(metadata.len())
    }

    /// Get the modification time in local time
    #[instrument(skip(self))]
    pub fn file_mod_time<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<DateTime<Local>> {
        let path = path.as_ref();
        let modified = fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| AppError::file_system("modified", path, e))?;
        Ok(DateTime::<Local>::from(modified))
    }

    /// Format a modification time the way `ctime` does
    pub fn format_mod_time(&self, time: &DateTime<Local>) -> String {
        time.format(MOD_TIME_FORMAT).to_string()
    }

    /// Names of all regular files directly inside `dir`, sorted
    #[instrument(skip(self))]
    pub fn list_all_files<P: AsRef<Path> + std::fmt::Debug>(&self, dir: P) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        let mut names = Vec::new();

        for (name, path) in self.read_dir_entries(dir)? {
            if path.is_file() {
                names.push(name);
            }
        }

        names.sort();
        debug!("Found {} files in {}", names.len(), dir.display());
        Ok(names)
    }

    /// Names of entries in `dir` ending with `extension`, sorted.
    ///
    /// A leading dot is added to `extension` when it is missing.
    #[instrument(skip(self))]
    pub fn list_filter_files<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        extension: &str,
        dir: P,
    ) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        let suffix = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };

        let mut names: Vec<String> = self
            .read_dir_entries(dir)?
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| name.ends_with(&suffix))
            .collect();

        names.sort();
        debug!("Found {} '{}' entries in {}", names.len(), suffix, dir.display());
        Ok(names)
    }

    /// All regular files in the current working directory
    pub fn list_all_files_cwd(&self) -> Result<Vec<String>> {
        self.list_all_files(self.current_dir()?)
    }

    /// Entries in the current working directory ending with `extension`
    pub fn list_filter_files_cwd(&self, extension: &str) -> Result<Vec<String>> {
        self.list_filter_files(extension, self.current_dir()?)
    }

    /// Paths matching a glob pattern, relative to the working directory.
    ///
    /// With `full_path` every match is joined onto the working directory.
    #[instrument(skip(self))]
    pub fn list_match_files(&self, pattern: &str, full_path: bool) -> Result<Vec<PathBuf>> {
        let paths = glob::glob(pattern).map_err(|e| AppError::pattern(pattern, e))?;

        let mut files = Vec::new();
        for path_result in paths {
            match path_result {
                Ok(path) => files.push(path),
                Err(e) => warn!("Error reading path for pattern {}: {}", pattern, e),
            }
        }

        if full_path {
            let cwd = self.current_dir()?;
            files = files.into_iter().map(|path| cwd.join(path)).collect();
        }

        files.sort();
        debug!("Pattern {} matched {} paths", pattern, files.len());
        Ok(files)
    }

    fn read_dir_entries(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(dir).map_err(|e| AppError::file_system("read_dir", dir, e))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::file_system("read_dir", dir, e))?;
            result.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
        Ok(result)
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "bee").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("script.py"), "print()").unwrap();
        fs::create_dir(temp_dir.path().join("docs.txt")).unwrap();
        temp_dir
    }

    #[test]
    fn test_path_parts() {
        let fs_utils = FileSystemUtils::new();
        let path = Path::new("/srv/data/report.tar.gz");

        assert_eq!(fs_utils.filename(path).as_deref(), Some("report.tar.gz"));
        assert_eq!(fs_utils.file_extension(path).as_deref(), Some("gz"));
        assert_eq!(fs_utils.directory(path), Some(PathBuf::from("/srv/data")));
        assert_eq!(fs_utils.file_extension("Makefile"), None);
    }

    #[test]
    fn test_make_path() {
        let fs_utils = FileSystemUtils::new();
        let path = fs_utils.make_path(["a", "b", "c.txt"]);
        assert_eq!(path, Path::new("a").join("b").join("c.txt"));
    }

    #[test]
    fn test_full_path() {
        let fs_utils = FileSystemUtils::new();
        let path = fs_utils.full_path_in("/work", "test.txt");
        assert_eq!(path, PathBuf::from("/work/test.txt"));

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(fs_utils.full_path("test.txt").unwrap(), cwd.join("test.txt"));
    }

    #[test]
    fn test_cwd_listings() {
        let fs_utils = FileSystemUtils::new();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(
            fs_utils.list_all_files_cwd().unwrap(),
            fs_utils.list_all_files(&cwd).unwrap()
        );
        assert_eq!(
            fs_utils.list_filter_files_cwd("toml").unwrap(),
            fs_utils.list_filter_files("toml", &cwd).unwrap()
        );
        assert!(
            fs_utils
                .list_all_files_cwd()
                .unwrap()
                .contains(&"Cargo.toml".to_string())
        );
    }

    #[test]
    fn test_existence_checks() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();
        let file = temp_dir.path().join("a.txt");

        assert!(fs_utils.file_exists(&file));
        assert!(fs_utils.is_file(&file));
        assert!(!fs_utils.is_dir(&file));
        assert!(fs_utils.dir_exists(temp_dir.path()));
        assert!(fs_utils.is_dir(temp_dir.path()));
        assert!(!fs_utils.file_exists(temp_dir.path().join("nope")));
        assert!(!fs_utils.is_link(&file));
    }

    #[test]
    fn test_file_size_and_mod_time() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();
        let file = temp_dir.path().join("b.txt");

        assert_eq!(fs_utils.file_size(&file).unwrap(), 3);

        let modified = fs_utils.file_mod_time(&file).unwrap();
        let age = Local::now().signed_duration_since(modified);
        assert!(age.num_minutes() < 5);

        let missing = fs_utils.file_size(temp_dir.path().join("nope"));
        assert!(matches!(missing, Err(AppError::FileSystem { .. })));
    }

    #[test]
    fn test_format_mod_time() {
        let fs_utils = FileSystemUtils::new();
        let time = DateTime::parse_from_rfc3339("2014-03-05T07:08:09+00:00")
            .unwrap()
            .with_timezone(&Local);
        let formatted = fs_utils.format_mod_time(&time);
        assert!(formatted.ends_with("2014"));
        assert_eq!(formatted.split_whitespace().count(), 5);
    }

    #[test]
    fn test_list_all_files_skips_directories() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();

        let files = fs_utils.list_all_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec!["a.txt", "b.txt", "script.py"]);
    }

    #[test]
    fn test_list_filter_files() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();

        let with_dot = fs_utils.list_filter_files(".txt", temp_dir.path()).unwrap();
        let without_dot = fs_utils.list_filter_files("txt", temp_dir.path()).unwrap();

        assert_eq!(with_dot, vec!["a.txt", "b.txt", "docs.txt"]);
        assert_eq!(with_dot, without_dot);
        assert_eq!(fs_utils.list_filter_files("py", temp_dir.path()).unwrap(), vec!["script.py"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let fs_utils = FileSystemUtils::new();
        let result = fs_utils.list_all_files("/definitely/not/here");
        assert!(matches!(result, Err(AppError::FileSystem { .. })));
    }

    #[test]
    fn test_list_match_files() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();
        let pattern = format!("{}/*.txt", temp_dir.path().display());

        let matches = fs_utils.list_match_files(&pattern, false).unwrap();
        assert_eq!(matches.len(), 3);
        assert!(matches.contains(&temp_dir.path().join("a.txt")));

        let invalid = fs_utils.list_match_files("[", false);
        assert!(matches!(invalid, Err(AppError::Pattern { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        let temp_dir = populated_dir();
        let fs_utils = FileSystemUtils::new();
        let target = temp_dir.path().join("a.txt");
        let link = temp_dir.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(fs_utils.is_link(&link));
        assert_eq!(
            fs_utils.real_path(&link).unwrap(),
            fs::canonicalize(&target).unwrap()
        );
    }
}
