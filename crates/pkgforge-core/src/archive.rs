//! Zip export of a [`VirtualFileStore`]
//!
//! The archive holds one deflated entry per stored path, written in listing
//! order with fixed timestamps and permissions, so exporting the same store
//! twice produces the same bytes. Content is written as raw UTF-8 with no
//! line-ending translation.

use crate::store::VirtualFileStore;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Errors raised while building or decoding an archive
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid archive path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("Archive entry '{path}' is not valid UTF-8")]
    Encoding { path: String },

    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that a store path can be written as a regular archive entry
fn validate_path(path: &str) -> Result<(), ExportError> {
    let reason = if path.is_empty() {
        Some("path is empty")
    } else if path.starts_with('/') {
        Some("path must be relative")
    } else if path.contains('\\') {
        Some("path must use forward slashes")
    } else if path.contains('\0') {
        Some("path contains a NUL character")
    } else if path.ends_with('/') {
        Some("path names a directory")
    } else if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        Some("path contains an empty, '.' or '..' segment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ExportError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
}

/// Serialize every file in the store into an in-memory zip archive
///
/// All paths are validated before anything is written; on error no bytes
/// are returned and the store is untouched.
pub fn export_archive(store: &VirtualFileStore) -> Result<Vec<u8>, ExportError> {
    for (path, _) in store.iter() {
        validate_path(path)?;
    }

    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options = entry_options();

        for (path, content) in store.iter() {
            zip.start_file(path, options)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

/// Decode an archive back into a store
///
/// Directory entries are skipped. Any entry whose content is not UTF-8 fails
/// the whole decode.
pub fn read_archive(zip_bytes: &[u8]) -> Result<VirtualFileStore, ExportError> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;
    let mut store = VirtualFileStore::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let path = file.name().to_string();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;

        let text = String::from_utf8(contents).map_err(|_| ExportError::Encoding {
            path: path.clone(),
        })?;
        store.add_or_update(path, text);
    }

    Ok(store)
}

/// Export the store and write the archive to `dest`
///
/// The file is only created once the archive has been built successfully.
pub fn write_archive(store: &VirtualFileStore, dest: &Path) -> Result<PathBuf, ExportError> {
    let zip_bytes = export_archive(store)?;
    std::fs::write(dest, &zip_bytes)?;
    Ok(dest.to_path_buf())
}
