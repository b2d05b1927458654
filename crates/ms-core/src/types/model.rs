//! Model types: committed [`Model`]s and editable [`ModelInput`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{Field, FieldId};
use crate::naming;

/// Identifier of a model, unique within the registry.
///
/// Allocated from a monotonic counter starting at `1` and never reused.
///
/// # Examples
///
/// ```
/// use ms_core::ModelId;
///
/// assert_eq!(ModelId::new(1), ModelId::from(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u64);

impl ModelId {
    /// Creates a model ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for ModelId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed model and its ordered fields.
///
/// Field order is insertion order and drives generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Registry-assigned identifier.
    pub id: ModelId,

    /// Trimmed model name as entered by the user.
    pub name: String,

    /// Fields in insertion order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Model {
    /// Returns the field with the given id.
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Returns the field whose name normalizes to the same key as `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ms_core::{DataType, Field, FieldId, Model, ModelId};
    ///
    /// let model = Model {
    ///     id: ModelId::new(1),
    ///     name: "Post".to_owned(),
    ///     fields: vec![Field {
    ///         id: FieldId::new(1),
    ///         name: "publishedAt".to_owned(),
    ///         data_type: DataType::Date,
    ///         primary_key: false,
    ///         required: false,
    ///         unique: false,
    ///     }],
    /// };
    ///
    /// assert!(model.field_named("published-at").is_some());
    /// assert!(model.field_named("title").is_none());
    /// ```
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        let key = naming::normalize(name);
        self.fields
            .iter()
            .find(|f| naming::normalize(&f.name) == key)
    }

    /// Returns `true` if any field is flagged as primary key.
    #[must_use]
    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.primary_key)
    }
}

/// Editable model values, as held by a draft.
///
/// `id` is `None` until the model has been committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Identifier of the committed model this input edits, if any.
    pub id: Option<ModelId>,

    /// Raw name, possibly with surrounding whitespace.
    pub name: String,
}

impl ModelInput {
    /// Creates an uncommitted input.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Returns a copy whose name has surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_owned(),
        }
    }
}

impl From<&Model> for ModelInput {
    fn from(model: &Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name.clone(),
        }
    }
}
