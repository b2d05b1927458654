//! Error types for the ms-codegen crate.

/// Errors that can occur while rendering the project tree.
///
/// Templates are total over validated input; the only failure is JSON
/// serialization of the generated manifests.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A JSON file could not be serialized.
    #[error("failed to render {file}: {source}")]
    Json {
        /// The file being rendered.
        file: &'static str,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl GenerateError {
    /// Creates a new [`GenerateError::Json`] error.
    #[inline]
    pub fn json(file: &'static str, source: serde_json::Error) -> Self {
        Self::Json { file, source }
    }
}
