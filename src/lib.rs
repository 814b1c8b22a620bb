pub mod commands;
pub mod config;
pub mod error;
pub mod storage;

pub use config::StoreConfig;
pub use error::{LiteboxError, StorageError};
pub use storage::Store;
