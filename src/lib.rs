//! fs-service - A small asynchronous file system capability
//!
//! This library exposes a `FileSystem` trait (read, write, remove, exists,
//! glob) with a platform-backed and an in-memory implementation, a JSON file
//! reader built on top of it, and the `File` value type used to describe
//! intended writes.

pub mod fs;
pub mod logging;

pub use fs::{
    create_file, read_json_file, read_json_file_as, write_file_value, File, FileSystem,
    FileSystemError, InMemoryFileSystem, LiveFileSystem, LiveFileSystemOptions, WriteOutcome,
};
