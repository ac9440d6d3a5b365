//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_permission_source;
mod json_file_permission_source;

pub use in_memory_permission_source::InMemoryPermissionSource;
pub use json_file_permission_source::JsonFilePermissionSource;
