//! File System Types
//!
//! Core trait and error type for the file system capability.

use async_trait::async_trait;
use thiserror::Error;

/// File system errors.
///
/// Every failure surfaced by a `FileSystem` is one of these. The underlying
/// cause is kept as text so the platform error never leaks to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    #[error("[FileSystem] Unable to read file from '{path}': {message}")]
    Read { path: String, message: String },

    #[error("[FileSystem] Unable to write file to '{path}': {message}")]
    Write { path: String, message: String },

    #[error("[FileSystem] Unable to remove file from '{path}': {message}")]
    Remove { path: String, message: String },

    #[error("[FileSystem] Unable to check existence of '{path}': {message}")]
    Exists { path: String, message: String },

    #[error(
        "[FileSystem] Unable to execute glob pattern '{pattern}' excluding files matching '{}': {message}",
        .exclude.join(",")
    )]
    Glob {
        pattern: String,
        exclude: Vec<String>,
        message: String,
    },

    #[error("[FileSystem] Unable to read and parse JSON file from '{path}': {message}")]
    Json { path: String, message: String },
}

impl FileSystemError {
    pub(crate) fn read(path: &str, cause: impl ToString) -> Self {
        Self::Read { path: path.to_string(), message: cause.to_string() }
    }

    pub(crate) fn write(path: &str, cause: impl ToString) -> Self {
        Self::Write { path: path.to_string(), message: cause.to_string() }
    }

    pub(crate) fn remove(path: &str, cause: impl ToString) -> Self {
        Self::Remove { path: path.to_string(), message: cause.to_string() }
    }

    pub(crate) fn exists(path: &str, cause: impl ToString) -> Self {
        Self::Exists { path: path.to_string(), message: cause.to_string() }
    }

    pub(crate) fn glob(pattern: &str, exclude: &[String], cause: impl ToString) -> Self {
        Self::Glob {
            pattern: pattern.to_string(),
            exclude: exclude.to_vec(),
            message: cause.to_string(),
        }
    }

    pub(crate) fn json(path: &str, cause: impl ToString) -> Self {
        Self::Json { path: path.to_string(), message: cause.to_string() }
    }

    /// The path (or glob pattern) the failed operation was given.
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Remove { path, .. }
            | Self::Exists { path, .. }
            | Self::Json { path, .. } => path,
            Self::Glob { pattern, .. } => pattern,
        }
    }
}

pub type Result<T> = std::result::Result<T, FileSystemError>;

/// Abstract file system capability that can be implemented by different backends.
///
/// Implementations are stateless from the caller's point of view: every call
/// is independent and may be issued concurrently.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read the contents of a file as UTF-8 text. Invalid sequences are
    /// replaced with U+FFFD rather than failing.
    async fn read_file(&self, path: &str) -> Result<String>;

    /// Write `content` to `path`, creating any missing parent directories first.
    async fn write_file(&self, path: &str, content: &str) -> Result<()>;

    /// Remove the file or directory at `path`. Absent paths are a no-op.
    async fn remove_file(&self, path: &str) -> Result<()>;

    /// Check if a path exists. Fails only when the check itself cannot be made.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Find all paths matching `pattern`, dropping those matching any of the
    /// `exclude` ignore patterns.
    async fn glob(&self, pattern: &str, exclude: &[String]) -> Result<Vec<String>>;

    /// `glob` with no exclusions.
    async fn glob_all(&self, pattern: &str) -> Result<Vec<String>> {
        self.glob(pattern, &[]).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FileSystemError::read("missing.txt", "No such file or directory (os error 2)");
        assert_eq!(
            err.to_string(),
            "[FileSystem] Unable to read file from 'missing.txt': No such file or directory (os error 2)"
        );

        let err = FileSystemError::write("out/a.txt", "denied");
        assert_eq!(err.to_string(), "[FileSystem] Unable to write file to 'out/a.txt': denied");

        let err = FileSystemError::remove("a", "busy");
        assert_eq!(err.to_string(), "[FileSystem] Unable to remove file from 'a': busy");

        let err = FileSystemError::exists("locked/a.txt", "Permission denied (os error 13)");
        assert_eq!(
            err.to_string(),
            "[FileSystem] Unable to check existence of 'locked/a.txt': Permission denied (os error 13)"
        );

        let err = FileSystemError::json("package.json", "EOF while parsing");
        assert_eq!(
            err.to_string(),
            "[FileSystem] Unable to read and parse JSON file from 'package.json': EOF while parsing"
        );
    }

    #[test]
    fn test_glob_error_lists_exclusions() {
        let exclude = vec!["b/**".to_string(), "c/*.md".to_string()];
        let err = FileSystemError::glob("**/*.txt", &exclude, "bad pattern");
        assert_eq!(
            err.to_string(),
            "[FileSystem] Unable to execute glob pattern '**/*.txt' excluding files matching 'b/**,c/*.md': bad pattern"
        );
        assert_eq!(err.path(), "**/*.txt");

        let err = FileSystemError::glob("[", &[], "bad pattern");
        assert!(err.to_string().contains("excluding files matching '':"));
    }

    #[test]
    fn test_error_path_accessor() {
        assert_eq!(FileSystemError::exists("x/y", "denied").path(), "x/y");
        assert_eq!(FileSystemError::remove("z", "busy").path(), "z");
    }
}
