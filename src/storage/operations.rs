//! Storage operations
//!
//! Folder creation, file writes and reads, removal and tree listing, all
//! confined to a single storage root.

use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::StorageError;
use crate::storage::filesystem::{EntryStat, FileSystem, LocalFileSystem};
use crate::storage::listing::{self, ListingOptions, Node};
use crate::storage::results::{CreateFolderResult, ReadResult, RemoveResult, WriteResult};
use crate::storage::validation::{RelativePath, STAGING_DIR, sanitize_name};

const PARTIAL_SUFFIX: &str = ".part";

static PARTIAL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hierarchical file store rooted at one directory.
///
/// Holds no state besides the root: every call reads the filesystem again,
/// and concurrent calls are not coordinated with each other.
#[derive(Debug, Clone)]
pub struct Store<F = LocalFileSystem> {
    root: PathBuf,
    fs: F,
    listing: ListingOptions,
}

impl Store<LocalFileSystem> {
    /// Open a store on the local disk, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::with_backend(root, LocalFileSystem).await
    }
}

impl<F: FileSystem> Store<F> {
    /// Open a store over an arbitrary backend, creating `root` if needed.
    pub async fn with_backend(root: impl Into<PathBuf>, fs: F) -> Result<Self, StorageError> {
        let root = std::path::absolute(root.into())?;

        if let Err(e) = fs.create_dir_all(&root).await {
            error!("Failed to prepare storage root {}: {}", root.display(), e);
            return Err(e.into());
        }

        info!("Storage root ready at {}", root.display());
        Ok(Self {
            root,
            fs,
            listing: ListingOptions::default(),
        })
    }

    pub fn with_listing_options(mut self, options: ListingOptions) -> Self {
        self.listing = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates `path` and any missing ancestors.
    ///
    /// Fails with `AlreadyExists` when anything, file or folder, is already there.
    pub async fn create_folder(
        &self,
        path: &RelativePath,
    ) -> Result<CreateFolderResult, StorageError> {
        if path.is_reserved() {
            warn!("Refused to create reserved folder {}", path);
            return Err(StorageError::InvalidName(path.as_string()));
        }

        let real_path = path.to_path(&self.root);

        if self.fs.stat(&real_path).await?.is_some() {
            warn!("Folder {} already exists", path);
            return Err(StorageError::AlreadyExists(path.as_string()));
        }

        if let Err(e) = self.fs.create_dir_all(&real_path).await {
            error!(
                "Failed to create folder {} (real: {}): {}",
                path,
                real_path.display(),
                e
            );
            return Err(e.into());
        }

        info!("Created folder {} (real: {})", path, real_path.display());
        Ok(CreateFolderResult {
            path: path.clone(),
            real_path,
        })
    }

    /// Streams `content` into `folder/name`, replacing any file of that name.
    ///
    /// `folder` and its ancestors are created when missing. Only the last
    /// segment of `name` is used. The content lands in a file under the
    /// staging directory first and is renamed into place once complete, so a
    /// failed write never clobbers an existing file.
    pub async fn write_file<R>(
        &self,
        folder: &RelativePath,
        name: &str,
        content: &mut R,
    ) -> Result<WriteResult, StorageError>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let Some(file_name) = sanitize_name(name) else {
            warn!("Rejected upload with unusable name {:?}", name);
            return Err(StorageError::InvalidName(name.to_string()));
        };

        let path = folder.join(&file_name);
        if path.is_reserved() {
            warn!("Refused upload into reserved path {}", path);
            return Err(StorageError::InvalidName(path.as_string()));
        }

        let dir = folder.to_path(&self.root);
        let staging = self.root.join(STAGING_DIR);
        for target in [&dir, &staging] {
            if let Err(e) = self.fs.create_dir_all(target).await {
                error!("Failed to prepare folder {}: {}", target.display(), e);
                return Err(e.into());
            }
        }

        let real_path = path.to_path(&self.root);
        let partial_path = staging.join(partial_name());

        let size = match self.fs.write(&partial_path, content).await {
            Ok(size) => size,
            Err(e) => {
                error!("Failed to write {} (real: {}): {}", path, partial_path.display(), e);
                self.discard_partial(&partial_path).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.fs.rename(&partial_path, &real_path).await {
            error!(
                "Failed to move {} into place at {}: {}",
                partial_path.display(),
                real_path.display(),
                e
            );
            self.discard_partial(&partial_path).await;
            return Err(e.into());
        }

        info!("Stored {} ({} bytes, real: {})", path, size, real_path.display());
        Ok(WriteResult {
            path,
            real_path,
            size,
        })
    }

    /// [`Store::write_file`] for content already in memory.
    pub async fn write_bytes(
        &self,
        folder: &RelativePath,
        name: &str,
        bytes: &[u8],
    ) -> Result<WriteResult, StorageError> {
        let mut reader = bytes;
        self.write_file(folder, name, &mut reader).await
    }

    /// Deletes the file or folder at `path`, a folder with its whole subtree.
    ///
    /// Removing the root empties it but keeps the root directory. A failure
    /// halfway through a subtree leaves whatever was already deleted deleted.
    pub async fn remove(&self, path: &RelativePath) -> Result<RemoveResult, StorageError> {
        let real_path = path.to_path(&self.root);

        let stat = if path.is_reserved() {
            None
        } else {
            self.fs.stat(&real_path).await?
        };
        let Some(stat) = stat else {
            warn!("Nothing to remove at {}", path);
            return Err(StorageError::NotFound(path.as_string()));
        };

        let outcome = if path.is_root() {
            self.clear_root().await
        } else {
            self.remove_entry(&real_path, Some(stat)).await
        };

        if let Err(e) = outcome {
            error!("Failed to remove {} (real: {}): {}", path, real_path.display(), e);
            return Err(not_found_or_io(path, e));
        }

        info!("Removed {} (real: {})", path, real_path.display());
        Ok(RemoveResult {
            path: path.clone(),
            was_folder: stat.is_dir(),
        })
    }

    /// Opens the file at `path` for streaming.
    ///
    /// Folders count as `NotFound`: only files can be read.
    pub async fn read_file(
        &self,
        path: &RelativePath,
    ) -> Result<ReadResult<F::Reader>, StorageError> {
        let real_path = path.to_path(&self.root);

        let stat = if path.is_reserved() {
            None
        } else {
            self.fs.stat(&real_path).await?
        };
        let size = match stat {
            Some(stat) if stat.is_file() => stat.len,
            _ => {
                warn!("No file to read at {}", path);
                return Err(StorageError::NotFound(path.as_string()));
            }
        };

        let reader = self
            .fs
            .open(&real_path)
            .await
            .map_err(|e| not_found_or_io(path, e))?;

        info!("Opened {} for reading ({} bytes)", path, size);
        Ok(ReadResult {
            path: path.clone(),
            size,
            reader,
        })
    }

    /// [`Store::read_file`], collected into memory.
    pub async fn read_to_vec(&self, path: &RelativePath) -> Result<Vec<u8>, StorageError> {
        let mut opened = self.read_file(path).await?;
        let mut content = Vec::new();
        opened
            .reader
            .read_to_end(&mut content)
            .await
            .map_err(|e| not_found_or_io(path, e))?;
        Ok(content)
    }

    /// Describes the whole tree under the root.
    pub async fn list_tree(&self) -> Result<Vec<Node>, StorageError> {
        let nodes =
            listing::serialize(&self.fs, self.root.clone(), String::new(), self.listing).await?;
        debug!("Listed {} top-level entries", nodes.len());
        Ok(nodes)
    }

    async fn clear_root(&self) -> io::Result<()> {
        for name in self.fs.read_dir(&self.root).await? {
            if name == STAGING_DIR {
                continue;
            }
            let child = self.root.join(&name);
            let stat = self.fs.stat(&child).await?;
            self.remove_entry(&child, stat).await?;
        }
        Ok(())
    }

    // A missing stat is a dangling link, which goes like a file.
    async fn remove_entry(&self, real_path: &Path, stat: Option<EntryStat>) -> io::Result<()> {
        match stat {
            Some(stat) if stat.is_dir() => self.fs.remove_dir_all(real_path).await,
            _ => self.fs.remove_file(real_path).await,
        }
    }

    async fn discard_partial(&self, partial_path: &Path) {
        if let Err(e) = self.fs.remove_file(partial_path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Could not clean up {}: {}", partial_path.display(), e);
            }
        }
    }
}

/// Name of the staging file an in-flight write goes to; unique per process and call.
fn partial_name() -> String {
    let n = PARTIAL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}{}", process::id(), n, PARTIAL_SUFFIX)
}

fn not_found_or_io(path: &RelativePath, e: io::Error) -> StorageError {
    if e.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(path.as_string())
    } else {
        StorageError::Io(e)
    }
}
