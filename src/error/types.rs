//! Error types
//!
//! Defines the store's error kinds and the application-level error that wraps them.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    AlreadyExists(String),
    NotFound(String),
    InvalidName(String),
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::AlreadyExists(p) => write!(f, "Already exists: /{}", p),
            StorageError::NotFound(p) => write!(f, "Not found: /{}", p),
            StorageError::InvalidName(n) => write!(f, "Invalid file name: {:?}", n),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// General LiteBox error that encompasses all error types
#[derive(Debug)]
pub enum LiteboxError {
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
    Usage(String),
}

impl fmt::Display for LiteboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteboxError::Storage(e) => write!(f, "Storage error: {}", e),
            LiteboxError::Config(e) => write!(f, "Configuration error: {}", e),
            LiteboxError::IoError(e) => write!(f, "I/O error: {}", e),
            LiteboxError::Usage(msg) => write!(f, "Usage error: {}", msg),
        }
    }
}

impl std::error::Error for LiteboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LiteboxError::Storage(e) => Some(e),
            LiteboxError::Config(e) => Some(e),
            LiteboxError::IoError(e) => Some(e),
            LiteboxError::Usage(_) => None,
        }
    }
}

impl From<StorageError> for LiteboxError {
    fn from(error: StorageError) -> Self {
        LiteboxError::Storage(error)
    }
}

impl From<config::ConfigError> for LiteboxError {
    fn from(error: config::ConfigError) -> Self {
        LiteboxError::Config(error)
    }
}

impl From<io::Error> for LiteboxError {
    fn from(error: io::Error) -> Self {
        LiteboxError::IoError(error)
    }
}
