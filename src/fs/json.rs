//! JSON file reading on top of any `FileSystem`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::*;

/// Read the file at `path` and parse it as JSON.
///
/// A read failure propagates unchanged; a parse failure yields
/// `FileSystemError::Json` naming the path.
pub async fn read_json_file<F>(fs: &F, path: &str) -> Result<Value>
where
    F: FileSystem + ?Sized,
{
    read_json_file_as(fs, path).await
}

/// Like `read_json_file`, decoding straight into `T`.
pub async fn read_json_file_as<T, F>(fs: &F, path: &str) -> Result<T>
where
    T: DeserializeOwned,
    F: FileSystem + ?Sized,
{
    let content = fs.read_file(path).await?;
    serde_json::from_str(&content).map_err(|e| FileSystemError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFileSystem;
    use serde::Deserialize;
    use serde_json::json;

    #[tokio::test]
    async fn test_reads_structured_value() {
        let fs = InMemoryFileSystem::with_files([(
            "package.json",
            r#"{"name": "docs", "version": "1.0.0", "keywords": ["a", "b"], "private": true}"#,
        )]);
        let value = read_json_file(&fs, "package.json").await.unwrap();
        assert_eq!(
            value,
            json!({"name": "docs", "version": "1.0.0", "keywords": ["a", "b"], "private": true})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_names_path() {
        let fs = InMemoryFileSystem::with_files([("broken.json", "{ \"name\": ")]);
        let err = read_json_file(&fs, "broken.json").await.unwrap_err();
        assert!(matches!(err, FileSystemError::Json { .. }));
        assert!(err
            .to_string()
            .starts_with("[FileSystem] Unable to read and parse JSON file from 'broken.json': "));
    }

    #[tokio::test]
    async fn test_read_failure_propagates_unchanged() {
        let fs = InMemoryFileSystem::new();
        let err = read_json_file(&fs, "missing.json").await.unwrap_err();
        assert!(matches!(err, FileSystemError::Read { .. }));
    }

    #[tokio::test]
    async fn test_typed_decoding() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Manifest {
            name: String,
            version: String,
        }

        let fs = InMemoryFileSystem::with_files([("m.json", r#"{"name":"x","version":"2.0.0"}"#)]);
        let manifest: Manifest = read_json_file_as(&fs, "m.json").await.unwrap();
        assert_eq!(manifest, Manifest { name: "x".into(), version: "2.0.0".into() });

        let fs = InMemoryFileSystem::with_files([("m.json", r#"{"name":"x"}"#)]);
        let err = read_json_file_as::<Manifest, _>(&fs, "m.json").await.unwrap_err();
        assert!(err.to_string().contains("m.json"));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let fs: std::sync::Arc<dyn FileSystem> =
            std::sync::Arc::new(InMemoryFileSystem::with_files([("n.json", "42")]));
        assert_eq!(read_json_file(fs.as_ref(), "n.json").await.unwrap(), json!(42));
    }
}
