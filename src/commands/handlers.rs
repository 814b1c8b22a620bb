use crate::commands::parser::{Command, USAGE};
use crate::error::LiteboxError;
use crate::storage::{FileSystem, Store, sanitize};

use log::info;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

// Handle a single command against the store, writing any output to `out`
pub async fn handle_command<F, W>(
    store: &Store<F>,
    command: Command,
    out: &mut W,
) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    match command {
        Command::List => handle_cmd_list(store, out).await,
        Command::Mkdir(path) => handle_cmd_mkdir(store, &path, out).await,
        Command::Put { source, folder } => handle_cmd_put(store, &source, &folder, out).await,
        Command::Get { path, output } => handle_cmd_get(store, &path, output.as_deref(), out).await,
        Command::Remove(path) => handle_cmd_rm(store, &path, out).await,
        Command::Help => write_line(out, USAGE).await,
    }
}

// Command handler for LS
async fn handle_cmd_list<F, W>(store: &Store<F>, out: &mut W) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    let nodes = store.list_tree().await?;
    let json = serde_json::to_string_pretty(&nodes).map_err(io::Error::from)?;
    write_line(out, &json).await
}

// Command handler for MKDIR
async fn handle_cmd_mkdir<F, W>(store: &Store<F>, path: &str, out: &mut W) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    let created = store.create_folder(&sanitize(path)).await?;
    write_line(out, &format!("Created folder {}", created.path)).await
}

// Command handler for PUT
async fn handle_cmd_put<F, W>(
    store: &Store<F>,
    source: &str,
    folder: &str,
    out: &mut W,
) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    let name = Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| LiteboxError::Usage(format!("'{}' does not name a file", source)))?;

    let mut file = File::open(source).await?;
    let written = store.write_file(&sanitize(folder), &name, &mut file).await?;

    info!("Uploaded local file {} as {}", source, written.path);
    write_line(out, &format!("Stored {} ({} bytes)", written.path, written.size)).await
}

// Command handler for GET
async fn handle_cmd_get<F, W>(
    store: &Store<F>,
    path: &str,
    output: Option<&str>,
    out: &mut W,
) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    let mut opened = store.read_file(&sanitize(path)).await?;

    match output {
        Some(target) => {
            let mut file = File::create(target).await?;
            let copied = tokio::io::copy(&mut opened.reader, &mut file).await?;
            file.flush().await?;
            info!("Downloaded {} to {}", opened.path, target);
            write_line(out, &format!("Saved {} to {} ({} bytes)", opened.path, target, copied)).await
        }
        None => {
            tokio::io::copy(&mut opened.reader, out).await?;
            out.flush().await?;
            Ok(())
        }
    }
}

// Command handler for RM
async fn handle_cmd_rm<F, W>(store: &Store<F>, path: &str, out: &mut W) -> Result<(), LiteboxError>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    let removed = store.remove(&sanitize(path)).await?;
    let kind = if removed.was_folder { "folder" } else { "file" };
    write_line(out, &format!("Removed {} {}", kind, removed.path)).await
}

async fn write_line<W>(out: &mut W, line: &str) -> Result<(), LiteboxError>
where
    W: AsyncWrite + Unpin + Send,
{
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
