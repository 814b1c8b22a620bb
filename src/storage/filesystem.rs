//! File system backend
//!
//! Every disk access the store makes goes through [`FileSystem`], so a cached,
//! locking or in-memory backend can replace [`LocalFileSystem`] without touching
//! the store's callers.

use std::ffi::OsString;
use std::future::Future;
use std::io::{ErrorKind, Result};
use std::path::Path;

use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// What a path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Metadata the store needs about a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    pub kind: EntryKind,
    pub len: u64,
}

impl EntryStat {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Filesystem operations used by the store.
pub trait FileSystem: Send + Sync {
    type Reader: AsyncRead + Unpin + Send;

    /// Metadata for `path`, following symlinks. `Ok(None)` when nothing is there.
    fn stat(&self, path: &Path) -> impl Future<Output = Result<Option<EntryStat>>> + Send;

    /// Names of the entries directly under `path`, in enumeration order.
    fn read_dir(&self, path: &Path) -> impl Future<Output = Result<Vec<OsString>>> + Send;

    fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    /// Stream `content` into a new file at `path`, returning the bytes written.
    fn write<R>(&self, path: &Path, content: &mut R) -> impl Future<Output = Result<u64>> + Send
    where
        R: AsyncRead + Unpin + Send + ?Sized;

    fn rename(&self, from: &Path, to: &Path) -> impl Future<Output = Result<()>> + Send;

    fn open(&self, path: &Path) -> impl Future<Output = Result<Self::Reader>> + Send;

    fn remove_file(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;

    fn remove_dir_all(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// The local disk, through tokio's async file API
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    type Reader = fs::File;

    async fn stat(&self, path: &Path) -> Result<Option<EntryStat>> {
        match fs::metadata(path).await {
            Ok(metadata) => {
                let kind = if metadata.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                Ok(Some(EntryStat {
                    kind,
                    len: metadata.len(),
                }))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<OsString>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).await
    }

    async fn write<R>(&self, path: &Path, content: &mut R) -> Result<u64>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let mut file = fs::File::create(path).await?;
        let written = tokio::io::copy(content, &mut file).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).await
    }

    async fn open(&self, path: &Path) -> Result<fs::File> {
        fs::File::open(path).await
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).await
    }
}
