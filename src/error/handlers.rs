//! Error handlers
//!
//! Logs failures and maps them to process exit codes.

use crate::error::types::{LiteboxError, StorageError};
use log::{error, warn};

pub const EXIT_OK: i32 = 0;
pub const EXIT_REJECTED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_CONFIG: i32 = 3;
pub const EXIT_IO: i32 = 4;

/// Handle a LiteBox error
pub fn handle_error(err: &LiteboxError) {
    match err {
        LiteboxError::Storage(StorageError::Io(_))
        | LiteboxError::IoError(_)
        | LiteboxError::Config(_) => error!("{}", err),
        _ => warn!("{}", err),
    }
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &LiteboxError) -> i32 {
    match err {
        LiteboxError::Storage(StorageError::Io(_)) => EXIT_IO,
        LiteboxError::Storage(_) => EXIT_REJECTED,
        LiteboxError::Config(_) => EXIT_CONFIG,
        LiteboxError::IoError(_) => EXIT_IO,
        LiteboxError::Usage(_) => EXIT_USAGE,
    }
}
