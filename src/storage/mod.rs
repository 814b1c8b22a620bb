//! File system storage management
//!
//! Path sanitization, the hierarchical store and its tree listing.

pub mod filesystem;
pub mod listing;
pub mod operations;
pub mod results;
pub mod validation;

// Re-export commonly used items
pub use filesystem::{FileSystem, LocalFileSystem};
pub use listing::{ListingOptions, Node};
pub use operations::Store;
pub use validation::{RelativePath, sanitize, sanitize_name};
