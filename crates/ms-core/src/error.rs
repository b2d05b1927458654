//! Error types for the ms-core crate.
//!
//! This module provides the [`ConfigError`] type for failures around the
//! project file and user-supplied configuration values. Validation problems
//! are not errors; they are reported as [`ErrorSet`](crate::ErrorSet)s.

use camino::Utf8PathBuf;

/// Errors that can occur while reading, writing, or interpreting project
/// configuration.
///
/// # Examples
///
/// ```
/// use ms_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingFile(Utf8PathBuf::from("modelsmith.json"));
/// assert!(error.to_string().contains("modelsmith.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The project file does not exist.
    #[error("project file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// Refused to overwrite an existing project file.
    #[error("project file already exists: {0}")]
    AlreadyExists(Utf8PathBuf),

    /// A value does not name any known variant (dialect, data type, ...).
    #[error("unknown {kind} '{value}'")]
    UnknownValue {
        /// What kind of value was expected.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An I/O error occurred while accessing a file.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file being accessed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The project file is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file being parsed.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize project state.
    #[error("failed to serialize project state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::UnknownValue`] error.
    #[inline]
    pub fn unknown_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }

    /// Creates a new [`ConfigError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ConfigError::Parse`] error.
    #[inline]
    pub fn parse(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::MissingFile(path)
            | Self::AlreadyExists(path)
            | Self::Io { path, .. }
            | Self::Parse { path, .. } => Some(path),
            Self::UnknownValue { .. } | Self::Serialize(_) => None,
        }
    }
}
