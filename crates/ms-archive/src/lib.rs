//! Zip packaging of generated project trees.
//!
//! [`pack`] walks a [`Directory`] depth-first, in entry order, and writes one
//! archive entry per directory (`path/`) and per file. The root directory
//! becomes the single top-level folder of the archive.
//!
//! # Determinism
//!
//! Every entry carries the fixed DOS epoch timestamp (1980-01-01 00:00) and
//! the same compression settings, so packing the same tree twice yields
//! byte-identical archives.
//!
//! # Path uniqueness
//!
//! The generator guarantees unique paths. The archiver checks anyway and fails
//! with [`ArchiveError::DuplicateEntry`] instead of writing an entry twice.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;

pub use error::ArchiveError;

use std::io::{Cursor, Write};

use ms_codegen::{Directory, Node};
use rustc_hash::FxHashSet;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Returns the download file name for a packed tree: `<root>.zip`.
#[must_use]
pub fn archive_name(root: &Directory) -> String {
    format!("{}.zip", root.name)
}

/// Packs a tree into an in-memory zip archive.
///
/// # Examples
///
/// ```
/// use ms_archive::pack;
/// use ms_codegen::{Directory, File};
///
/// let mut root = Directory::new("shop");
/// root.push_file(File::new("package.json", "{}\n"));
///
/// let bytes = pack(&root)?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), ms_archive::ArchiveError>(())
/// ```
pub fn pack(root: &Directory) -> Result<Vec<u8>, ArchiveError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut packer = Packer {
        writer: ZipWriter::new(Cursor::new(Vec::new())),
        options,
        seen: FxHashSet::default(),
        entries: 0,
    };
    packer.directory(root, "")?;

    let entries = packer.entries;
    let bytes = packer.writer.finish()?.into_inner();
    info!(root = %root.name, entries, bytes = bytes.len(), "Packed archive");
    Ok(bytes)
}

/// Packs a tree on Tokio's blocking pool.
///
/// Packing is CPU-bound; this keeps it off the async workers. The tree is
/// moved in, so the caller's registry is never observed mid-pack.
pub async fn pack_async(root: Directory) -> Result<Vec<u8>, ArchiveError> {
    tokio::task::spawn_blocking(move || pack(&root)).await?
}

struct Packer {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    seen: FxHashSet<String>,
    entries: usize,
}

impl Packer {
    fn directory(&mut self, dir: &Directory, parent: &str) -> Result<(), ArchiveError> {
        check_name(&dir.name, parent)?;
        let path = format!("{parent}{}/", dir.name);
        self.claim(&path)?;
        self.writer.add_directory(path.as_str(), self.options)?;
        self.entries += 1;
        debug!(path = %path, "Added directory");

        for node in &dir.entries {
            match node {
                Node::Dir(sub) => self.directory(sub, &path)?,
                Node::File(file) => {
                    check_name(&file.name, &path)?;
                    let file_path = format!("{path}{}", file.name);
                    self.claim(&file_path)?;
                    self.writer.start_file(file_path.as_str(), self.options)?;
                    self.writer.write_all(file.content.as_bytes())?;
                    self.entries += 1;
                    debug!(path = %file_path, bytes = file.content.len(), "Added file");
                }
            }
        }
        Ok(())
    }

    fn claim(&mut self, path: &str) -> Result<(), ArchiveError> {
        if self.seen.insert(path.to_owned()) {
            Ok(())
        } else {
            Err(ArchiveError::DuplicateEntry(path.to_owned()))
        }
    }
}

/// Entry names are single path segments.
fn check_name(name: &str, parent: &str) -> Result<(), ArchiveError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(ArchiveError::invalid_name(parent, name));
    }
    Ok(())
}
