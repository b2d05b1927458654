//! Error types for the ms-archive crate.

use std::io;

/// Errors that can occur while packing a tree.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Two entries resolved to the same archive path.
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),

    /// An entry name is not a single path segment.
    #[error("invalid entry name {name:?} under {parent:?}")]
    InvalidName {
        /// Path of the containing directory.
        parent: String,
        /// The rejected name.
        name: String,
    },

    /// The zip writer failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry content failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The blocking packing task panicked or was cancelled.
    #[error("packing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ArchiveError {
    /// Creates a new [`ArchiveError::InvalidName`] error.
    #[inline]
    pub fn invalid_name(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidName {
            parent: parent.into(),
            name: name.into(),
        }
    }

    /// Returns `true` if the tree itself is malformed.
    ///
    /// Retrying with the same tree fails the same way.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateEntry(_) | Self::InvalidName { .. })
    }
}
