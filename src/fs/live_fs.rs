//! Live File System Implementation
//!
//! Delegates to `tokio::fs` for file operations and to the `glob` crate for
//! pattern matching. No caching, locking or atomic writes happen here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use tokio::fs;

use super::types::*;

/// Options for creating a `LiveFileSystem`.
#[derive(Debug, Clone)]
pub struct LiveFileSystemOptions {
    /// Base directory for relative paths and glob patterns (defaults to the
    /// process working directory)
    pub cwd: Option<PathBuf>,
    /// Let wildcards match names starting with `.`
    pub dot: bool,
    /// Match glob patterns case-sensitively
    pub case_sensitive: bool,
}

impl Default for LiveFileSystemOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            dot: false,
            case_sensitive: true,
        }
    }
}

/// File system backed by the host operating system.
#[derive(Debug, Clone, Default)]
pub struct LiveFileSystem {
    options: LiveFileSystemOptions,
}

impl LiveFileSystem {
    /// Create a file system rooted at the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LiveFileSystemOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LiveFileSystemOptions {
        &self.options
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.options.cwd {
            Some(cwd) => cwd.join(path),
            None => PathBuf::from(path),
        }
    }

    fn match_options(&self) -> MatchOptions {
        // Dotfiles are filtered after matching; see `hides_dotfile`.
        MatchOptions {
            case_sensitive: self.options.case_sensitive,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        }
    }
}

#[async_trait]
impl FileSystem for LiveFileSystem {
    async fn read_file(&self, path: &str) -> Result<String> {
        tracing::debug!(path, "read_file");
        let bytes = fs::read(self.resolve(path))
            .await
            .map_err(|e| FileSystemError::read(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        tracing::debug!(path, bytes = content.len(), "write_file");
        let target = self.resolve(path);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileSystemError::write(path, e))?;
        }
        fs::write(&target, content)
            .await
            .map_err(|e| FileSystemError::write(path, e))
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        // Not atomic: the path may change between the check and the removal.
        if !self.exists(path).await? {
            tracing::debug!(path, "remove_file: nothing to remove");
            return Ok(());
        }
        tracing::debug!(path, "remove_file");
        let target = self.resolve(path);
        let metadata = fs::symlink_metadata(&target)
            .await
            .map_err(|e| FileSystemError::remove(path, e))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&target).await
        } else {
            fs::remove_file(&target).await
        };
        removed.map_err(|e| FileSystemError::remove(path, e))
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        fs::try_exists(self.resolve(path))
            .await
            .map_err(|e| FileSystemError::exists(path, e))
    }

    async fn glob(&self, pattern: &str, exclude: &[String]) -> Result<Vec<String>> {
        tracing::debug!(pattern, ?exclude, "glob");
        let cwd = self.options.cwd.clone();
        let dot = self.options.dot;
        let match_options = self.match_options();
        let owned_pattern = pattern.to_string();
        let owned_exclude = exclude.to_vec();

        let result = tokio::task::spawn_blocking(move || {
            glob_blocking(cwd.as_deref(), &owned_pattern, &owned_exclude, dot, match_options)
        })
        .await
        .map_err(|e| FileSystemError::glob(pattern, exclude, e))?;

        result.map_err(|message| FileSystemError::glob(pattern, exclude, message))
    }
}

/// An ignore pattern. `dir/**` also excludes `dir` itself.
pub(super) struct Ignore {
    pattern: Pattern,
    dir: Option<Pattern>,
}

impl Ignore {
    pub(super) fn new(source: &str) -> std::result::Result<Self, String> {
        let compile = |p: &str| {
            Pattern::new(p).map_err(|e| format!("invalid ignore pattern '{}': {}", source, e))
        };
        let dir = match source.strip_suffix("/**") {
            Some(dir) if !dir.is_empty() => Some(compile(dir)?),
            _ => None,
        };
        Ok(Self { pattern: compile(source)?, dir })
    }

    pub(super) fn matches(&self, path: &str, options: MatchOptions) -> bool {
        self.pattern.matches_with(path, options)
            || self.dir.as_ref().map_or(false, |dir| dir.matches_with(path, options))
    }
}

/// Whether `segment` is `.` or `..`, which the matcher yields for any
/// component starting with a dot.
fn is_dot_entry(segment: &str) -> bool {
    segment == "." || segment == ".."
}

/// With `dot` off, a result is hidden when one of its components starts with
/// `.` and no dot-leading pattern component matches it literally.
fn hides_dotfile(reported: &str, dot_components: &[Pattern], options: MatchOptions) -> bool {
    reported
        .split('/')
        .filter(|c| c.starts_with('.') && !is_dot_entry(c))
        .any(|c| !dot_components.iter().any(|p| p.matches_with(c, options)))
}

/// Run the matcher synchronously. Relative patterns are matched under `cwd`
/// and reported relative to it.
fn glob_blocking(
    cwd: Option<&Path>,
    pattern: &str,
    exclude: &[String],
    dot: bool,
    options: MatchOptions,
) -> std::result::Result<Vec<String>, String> {
    let ignores = exclude
        .iter()
        .map(|p| Ignore::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let dot_components: Vec<Pattern> = pattern
        .split('/')
        .filter(|c| c.starts_with('.'))
        .filter_map(|c| Pattern::new(c).ok())
        .collect();
    let last_component = pattern.rsplit('/').next().unwrap_or_default();

    let base = cwd.filter(|_| !Path::new(pattern).is_absolute());
    let full_pattern = match base {
        Some(dir) => format!(
            "{}/{}",
            Pattern::escape(&dir.to_string_lossy()).trim_end_matches('/'),
            pattern
        ),
        None => pattern.to_string(),
    };

    let paths = glob::glob_with(&full_pattern, options).map_err(|e| e.to_string())?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "glob: skipping unreadable entry");
                continue;
            }
        };
        let raw = path.to_string_lossy();
        let last_segment = raw.rsplit('/').next().unwrap_or_default();
        if is_dot_entry(last_segment) && last_segment != last_component {
            continue;
        }
        let reported = match base {
            Some(dir) => path
                .strip_prefix(dir)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|_| raw.clone().into_owned()),
            None => raw.clone().into_owned(),
        };
        if reported.is_empty() {
            continue;
        }
        if !dot && hides_dotfile(&reported, &dot_components, options) {
            continue;
        }
        if ignores.iter().any(|ignore| ignore.matches(&reported, options)) {
            tracing::trace!(path = %reported, "glob: excluded");
            continue;
        }
        matches.push(reported);
    }

    Ok(matches)
}

// ============================================================================
// Tests
// ============================================================================
