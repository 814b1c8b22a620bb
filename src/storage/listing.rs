//! Tree listing
//!
//! Walks the storage root and describes every folder and file in it.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use log::warn;
use serde::Serialize;

use crate::error::StorageError;
use crate::storage::filesystem::FileSystem;
use crate::storage::validation::STAGING_DIR;

/// One entry of a listing.
///
/// Serializes as `{"type": "folder", "name", "size", "children"}` or
/// `{"type": "file", "name", "size", "path"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        name: String,
        /// Total bytes of every file below this folder
        size: u64,
        children: Vec<Node>,
    },
    File {
        name: String,
        size: u64,
        /// Slash-separated path from the storage root
        path: String,
    },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::File { name, .. } => name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::Folder { size, .. } | Node::File { size, .. } => *size,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    /// Direct children, empty for files
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Folder { children, .. } => children,
            Node::File { .. } => &[],
        }
    }
}

/// Sum of the sizes of a listing
pub fn total_size(nodes: &[Node]) -> u64 {
    nodes.iter().map(Node::size).sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    /// Order each level by name instead of directory enumeration order
    pub sort_by_name: bool,
}

type ListingFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Node>, StorageError>> + Send + 'a>>;

/// Describe everything under `dir`, whose path from the root is `relative`
/// (empty for the root itself).
///
/// Folder sizes are summed from the walk, so every call costs a full
/// traversal of the subtree.
pub fn serialize<'a, F: FileSystem>(
    fs: &'a F,
    dir: PathBuf,
    relative: String,
    options: ListingOptions,
) -> ListingFuture<'a> {
    Box::pin(async move {
        let mut names = fs.read_dir(&dir).await?;
        if options.sort_by_name {
            names.sort();
        }

        let mut nodes = Vec::with_capacity(names.len());
        for os_name in names {
            if relative.is_empty() && os_name == STAGING_DIR {
                continue;
            }

            let path = dir.join(&os_name);
            let name = match os_name.into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(
                        "{} is not valid UTF-8; listing it under a lossy name",
                        path.display()
                    );
                    raw.to_string_lossy().into_owned()
                }
            };
            let stat = match fs.stat(&path).await {
                Ok(Some(stat)) => stat,
                Ok(None) => {
                    warn!("Skipping {}: entry vanished or is a dangling link", path.display());
                    continue;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let child_relative = if relative.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", relative, name)
            };

            if stat.is_dir() {
                let children = serialize(fs, path, child_relative, options).await?;
                nodes.push(Node::Folder {
                    name,
                    size: total_size(&children),
                    children,
                });
            } else {
                nodes.push(Node::File {
                    name,
                    size: stat.len,
                    path: child_relative,
                });
            }
        }

        Ok(nodes)
    })
}
