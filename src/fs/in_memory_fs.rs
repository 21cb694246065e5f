//! In-Memory File System Implementation
//!
//! A pure in-memory file system with the same contract as `LiveFileSystem`.
//! Consumers inject it in tests or dry runs where touching disk is unwanted.

use std::collections::HashMap;

use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use tokio::sync::RwLock;

use super::live_fs::Ignore;
use super::types::*;

#[derive(Debug, Clone)]
enum Entry {
    File(String),
    Directory,
}

/// In-memory virtual file system.
///
/// Paths are normalized to absolute form; relative paths resolve against `/`.
pub struct InMemoryFileSystem {
    data: RwLock<HashMap<String, Entry>>,
}

impl InMemoryFileSystem {
    /// Create a new empty in-memory file system.
    pub fn new() -> Self {
        let mut data = HashMap::new();
        data.insert("/".to_string(), Entry::Directory);
        Self { data: RwLock::new(data) }
    }

    /// Create with initial files.
    pub fn with_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut data = HashMap::new();
        data.insert("/".to_string(), Entry::Directory);
        for (path, content) in files {
            let normalized = normalize_path(path.as_ref());
            // Seeds nested under an earlier seeded file, or landing on a
            // directory created by one, are dropped.
            if ensure_parent_dirs(&mut data, &normalized).is_err() {
                continue;
            }
            if let Some(Entry::Directory) = data.get(&normalized) {
                continue;
            }
            data.insert(normalized, Entry::File(content.into()));
        }
        Self { data: RwLock::new(data) }
    }

    /// All stored paths, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let data = self.data.read().await;
        let mut paths: Vec<String> = data.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Default for InMemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Path utilities
// ============================================================================

fn normalize_path(path: &str) -> String {
    let mut resolved: Vec<&str> = Vec::new();
    for part in path.split('/').filter(|p| !p.is_empty() && *p != ".") {
        if part == ".." {
            resolved.pop();
        } else {
            resolved.push(part);
        }
    }
    format!("/{}", resolved.join("/"))
}

fn dirname(normalized: &str) -> &str {
    match normalized.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &normalized[..pos],
    }
}

/// Create every missing ancestor directory of `path`. Fails with the path of
/// the first ancestor that exists as a file.
fn ensure_parent_dirs(
    data: &mut HashMap<String, Entry>,
    path: &str,
) -> std::result::Result<(), String> {
    let dir = dirname(path);
    if dir == "/" {
        return Ok(());
    }
    match data.get(dir) {
        Some(Entry::Directory) => Ok(()),
        Some(Entry::File(_)) => Err(format!("ENOTDIR: not a directory, mkdir '{}'", dir)),
        None => {
            ensure_parent_dirs(data, dir)?;
            data.insert(dir.to_string(), Entry::Directory);
            Ok(())
        }
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

#[async_trait]
impl FileSystem for InMemoryFileSystem {
    async fn read_file(&self, path: &str) -> Result<String> {
        let data = self.data.read().await;
        let normalized = normalize_path(path);
        match data.get(&normalized) {
            Some(Entry::File(content)) => Ok(content.clone()),
            Some(Entry::Directory) => Err(FileSystemError::read(
                path,
                format!("EISDIR: illegal operation on a directory, read '{}'", normalized),
            )),
            None => Err(FileSystemError::read(
                path,
                format!("ENOENT: no such file or directory, open '{}'", normalized),
            )),
        }
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let mut data = self.data.write().await;
        let normalized = normalize_path(path);
        ensure_parent_dirs(&mut data, &normalized).map_err(|e| FileSystemError::write(path, e))?;
        if let Some(Entry::Directory) = data.get(&normalized) {
            return Err(FileSystemError::write(
                path,
                format!("EISDIR: illegal operation on a directory, open '{}'", normalized),
            ));
        }
        data.insert(normalized, Entry::File(content.to_string()));
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        let mut data = self.data.write().await;
        let normalized = normalize_path(path);
        if normalized == "/" {
            return Err(FileSystemError::remove(path, "EPERM: operation not permitted, rm '/'"));
        }
        if data.remove(&normalized).is_some() {
            let prefix = format!("{}/", normalized);
            data.retain(|key, _| !key.starts_with(&prefix));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let data = self.data.read().await;
        Ok(data.contains_key(&normalize_path(path)))
    }

    async fn glob(&self, pattern: &str, exclude: &[String]) -> Result<Vec<String>> {
        let relative = !pattern.starts_with('/');
        let absolute_pattern = if relative {
            format!("/{}", pattern)
        } else {
            pattern.to_string()
        };
        let matcher =
            Pattern::new(&absolute_pattern).map_err(|e| FileSystemError::glob(pattern, exclude, e))?;
        let ignores = exclude
            .iter()
            .map(|p| Ignore::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| FileSystemError::glob(pattern, exclude, e))?;

        let options = match_options();
        let data = self.data.read().await;
        let mut matches: Vec<String> = data
            .keys()
            .filter(|p| p.as_str() != "/" && matcher.matches_with(p, options))
            .map(|p| if relative { p[1..].to_string() } else { p.clone() })
            .filter(|p| !ignores.iter().any(|ignore| ignore.matches(p, options)))
            .collect();
        matches.sort();
        Ok(matches)
    }
}

// ============================================================================
// Tests
// ============================================================================
