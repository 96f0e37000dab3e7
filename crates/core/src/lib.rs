//! Shared types and record-building logic for the ArchivesSpace
//! Digital Object client.
//!
//! Holds the default Digital Object template, the override-merge rules
//! applied during creation, and the [`FileVersion`](file_version::FileVersion)
//! sub-record model. Everything here is pure data manipulation; HTTP
//! lives in `aspace-client`.

pub mod file_version;
pub mod record;
pub mod types;
