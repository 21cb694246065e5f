//! File System Module
//!
//! Provides the file system capability and its implementations:
//! - LiveFileSystem: backed by the host file system and the `glob` matcher
//! - InMemoryFileSystem: pure in-memory store, for tests and dry runs

pub mod types;
pub mod live_fs;
pub mod in_memory_fs;
pub mod json;
pub mod file;

pub use types::*;
pub use live_fs::{LiveFileSystem, LiveFileSystemOptions};
pub use in_memory_fs::InMemoryFileSystem;
pub use json::{read_json_file, read_json_file_as};
pub use file::{create_file, write_file_value, File, WriteOutcome};
