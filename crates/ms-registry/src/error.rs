//! Error types for the ms-registry crate.
//!
//! Validation verdicts travel as [`RegistryError::Rejected`], which carries
//! the model-level and per-field [`ErrorSet`]s so callers can render them
//! inline. The remaining variants are programmer errors.

use std::fmt;

use ms_core::{ErrorSet, FieldId, ModelId, Violation};
use serde::Serialize;

/// Errors of one field of a rejected commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRejection {
    /// The field, or `None` for the pending new field.
    pub field: Option<FieldId>,
    /// The violated rules.
    pub errors: ErrorSet,
}

/// Everything wrong with a draft that failed to commit.
///
/// # Examples
///
/// ```
/// use ms_core::{ErrorCode, ErrorSet};
/// use ms_registry::Rejection;
///
/// let rejection = Rejection {
///     model: [ErrorCode::UniqueName].into_iter().collect(),
///     fields: Vec::new(),
/// };
/// assert_eq!(rejection.to_string(), "validation failed: UNIQUE_NAME");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Model-level errors.
    pub model: ErrorSet,
    /// Fields with errors, in field order.
    pub fields: Vec<FieldRejection>,
}

impl Rejection {
    /// Returns `true` if nothing was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_empty() && self.fields.is_empty()
    }

    /// Returns every error code, model-level first.
    pub fn codes(&self) -> impl Iterator<Item = ms_core::ErrorCode> + '_ {
        self.model
            .iter()
            .chain(self.fields.iter().flat_map(|f| f.errors.iter()))
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed:")?;
        for code in &self.model {
            write!(f, " {}", code.code())?;
        }
        for field in &self.fields {
            match field.field {
                Some(id) => write!(f, " field {id}:")?,
                None => f.write_str(" new field:")?,
            }
            for code in &field.errors {
                write!(f, " {}", code.code())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The validator rejected the draft; nothing was committed.
    #[error("{0}")]
    Rejected(Rejection),

    /// No committed model has this id.
    #[error("unknown model id {0}")]
    UnknownModel(ModelId),

    /// The model under edit has no field with this id.
    #[error("unknown field id {0}")]
    UnknownField(FieldId),

    /// Update requested for a draft that was never committed.
    #[error("model draft has not been committed")]
    NotCommitted,

    /// Create requested for a draft of an already committed model.
    #[error("model {0} is already committed")]
    AlreadyCommitted(ModelId),

    /// Export refused because committed data fails validation.
    #[error("export blocked: {} invalid entities", violations.len())]
    ExportBlocked {
        /// Every offending model or field.
        violations: Vec<Violation>,
    },
}

impl RegistryError {
    /// Returns `true` if this error carries validation results.
    ///
    /// Validation errors are expected outcomes meant to be shown to the user.
    #[inline]
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::ExportBlocked { .. })
    }

    /// Returns `true` if this error indicates a caller bug.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_validation()
    }

    /// Returns the rejection, if this is a validation failure of a draft.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
