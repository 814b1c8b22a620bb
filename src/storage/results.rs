//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

use crate::storage::validation::RelativePath;

/// Result of a folder creation
#[derive(Debug, Clone)]
pub struct CreateFolderResult {
    pub path: RelativePath,
    pub real_path: PathBuf,
}

/// Result of a file write
#[derive(Debug, Clone)]
pub struct WriteResult {
    pub path: RelativePath,
    pub real_path: PathBuf,
    pub size: u64,
}

/// Result of opening a file for reading; `reader` streams the content
#[derive(Debug)]
pub struct ReadResult<R> {
    pub path: RelativePath,
    pub size: u64,
    pub reader: R,
}

/// Result of a file or folder removal
#[derive(Debug, Clone)]
pub struct RemoveResult {
    pub path: RelativePath,
    pub was_folder: bool,
}
