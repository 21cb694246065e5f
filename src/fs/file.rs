//! File value type
//!
//! `File` describes an intended write, detached from what is on disk.
//! Files are not overwriteable unless the caller opts in.

use serde::{Deserialize, Serialize};

use super::types::*;

/// An immutable description of a file to be written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    path: String,
    content: String,
    #[serde(default)]
    is_overwriteable: bool,
}

impl File {
    /// Create a file that must not clobber existing content.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        create_file(path, content, false)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_overwriteable(&self) -> bool {
        self.is_overwriteable
    }

    /// A copy of this file with different content.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            path: self.path.clone(),
            content: content.into(),
            is_overwriteable: self.is_overwriteable,
        }
    }
}

pub fn create_file(
    path: impl Into<String>,
    content: impl Into<String>,
    is_overwriteable: bool,
) -> File {
    File {
        path: path.into(),
        content: content.into(),
        is_overwriteable,
    }
}

/// What `write_file_value` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Overwritten,
    /// Target exists and the file is not overwriteable; disk untouched.
    Skipped,
}

/// Write `file` through `fs`, honoring its overwrite flag.
pub async fn write_file_value<F>(fs: &F, file: &File) -> Result<WriteOutcome>
where
    F: FileSystem + ?Sized,
{
    let existed = fs.exists(file.path()).await?;
    if existed && !file.is_overwriteable() {
        tracing::debug!(path = file.path(), "file exists and is not overwriteable, skipping");
        return Ok(WriteOutcome::Skipped);
    }
    fs.write_file(file.path(), file.content()).await?;
    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Written
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFileSystem;

    #[test]
    fn test_create_file_defaults() {
        let file = File::new("f.txt", "hi");
        assert!(!file.is_overwriteable());
        assert_eq!(file, create_file("f.txt", "hi", false));

        let file = create_file("f.txt", "hi", true);
        assert!(file.is_overwriteable());
        assert_eq!(file.path(), "f.txt");
        assert_eq!(file.content(), "hi");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(create_file("f.txt", "hi", true), create_file("f.txt", "hi", true));
        assert_ne!(create_file("f.txt", "hi", true), create_file("f.txt", "hi", false));
        assert_ne!(File::new("f.txt", "hi"), File::new("g.txt", "hi"));
    }

    #[test]
    fn test_with_content_leaves_original() {
        let original = create_file("a.md", "old", true);
        let changed = original.with_content("new");
        assert_eq!(original.content(), "old");
        assert_eq!(changed.content(), "new");
        assert_eq!(changed.path(), "a.md");
        assert!(changed.is_overwriteable());
    }

    #[test]
    fn test_serde_shape() {
        let file: File = serde_json::from_str(r#"{"path":"a","content":"b"}"#).unwrap();
        assert_eq!(file, File::new("a", "b"));
        let json = serde_json::to_value(create_file("a", "b", true)).unwrap();
        assert_eq!(json["isOverwriteable"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn test_write_file_value_respects_flag() {
        let fs = InMemoryFileSystem::with_files([("docs/index.md", "keep me")]);

        let protected = File::new("docs/index.md", "replacement");
        assert_eq!(write_file_value(&fs, &protected).await.unwrap(), WriteOutcome::Skipped);
        assert_eq!(fs.read_file("docs/index.md").await.unwrap(), "keep me");

        let overwriteable = create_file("docs/index.md", "replacement", true);
        assert_eq!(
            write_file_value(&fs, &overwriteable).await.unwrap(),
            WriteOutcome::Overwritten
        );
        assert_eq!(fs.read_file("docs/index.md").await.unwrap(), "replacement");

        let fresh = File::new("docs/new.md", "new");
        assert_eq!(write_file_value(&fs, &fresh).await.unwrap(), WriteOutcome::Written);
        assert_eq!(fs.read_file("docs/new.md").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_raw_write_ignores_flag() {
        let fs = InMemoryFileSystem::with_files([("a.txt", "old")]);
        let file = File::new("a.txt", "new");
        fs.write_file(file.path(), file.content()).await.unwrap();
        assert_eq!(fs.read_file("a.txt").await.unwrap(), "new");
    }
}
