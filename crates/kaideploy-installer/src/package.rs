//! In-memory zip packaging of an app directory.
//!
//! - Entries are relative to the root, `/`-separated, in lexical order
//! - Directory entries end with `/`; file entries are deflated
//! - `.git` directories are skipped at any depth
//! - Symlinks are never descended: a link to a file is stored as a regular
//!   file with the target's contents; links to directories and dangling
//!   links are skipped

use std::fs::{self, File, Metadata};
use std::io::{self, Cursor, Seek, Write};
use std::path::Path;

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use kaideploy_core::error::{DeployError, Result};

const VCS_DIR: &str = ".git";

/// Pack `root` into a zip archive held in memory.
pub fn pack_dir(root: &Path) -> Result<Bytes> {
    let meta = fs::metadata(root).map_err(|e| io_err(root, e))?;
    if !meta.is_dir() {
        return Err(DeployError::Packaging(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    add_dir(&mut zip, root, root)?;
    let cursor = zip.finish().map_err(zip_err)?;

    let bytes = cursor.into_inner();
    tracing::debug!(root = %root.display(), bytes = bytes.len(), "app packaged");
    Ok(Bytes::from(bytes))
}

fn add_dir<W: Write + Seek>(zip: &mut ZipWriter<W>, root: &Path, dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .and_then(|rd| rd.collect::<io::Result<Vec<_>>>())
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        let meta = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) if target.is_file() => target,
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "skipping symlinked directory");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping dangling symlink");
                    continue;
                }
            }
        } else {
            fs::symlink_metadata(&path).map_err(|e| io_err(&path, e))?
        };

        if meta.is_dir() && entry.file_name() == VCS_DIR {
            tracing::debug!(path = %path.display(), "skipping vcs metadata");
            continue;
        }

        let name = entry_name(root, &path)?;
        let options = entry_options(&meta);

        if meta.is_dir() {
            tracing::debug!(entry = %name, "add dir");
            zip.add_directory(format!("{name}/"), options.compression_method(CompressionMethod::Stored))
                .map_err(zip_err)?;
            add_dir(zip, root, &path)?;
        } else {
            tracing::debug!(entry = %name, "add file");
            zip.start_file(name, options.compression_method(CompressionMethod::Deflated))
                .map_err(zip_err)?;
            let mut file = File::open(&path).map_err(|e| io_err(&path, e))?;
            io::copy(&mut file, &mut *zip).map_err(|e| io_err(&path, e))?;
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|e| DeployError::Packaging(format!("{}: {e}", path.display())))?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn entry_options(meta: &Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    SimpleFileOptions::default().unix_permissions(meta.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn entry_options(_meta: &Metadata) -> SimpleFileOptions {
    SimpleFileOptions::default()
}

fn io_err(path: &Path, e: io::Error) -> DeployError {
    DeployError::Packaging(format!("{}: {e}", path.display()))
}

fn zip_err(e: zip::result::ZipError) -> DeployError {
    DeployError::Packaging(format!("zip: {e}"))
}
