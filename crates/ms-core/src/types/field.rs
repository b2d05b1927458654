//! Field types: committed [`Field`]s and editable [`FieldInput`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::data_type::DataType;

/// Identifier of a field, unique across the whole registry.
///
/// Allocated from a monotonic counter and never reused after deletion.
///
/// # Examples
///
/// ```
/// use ms_core::FieldId;
///
/// let id = FieldId::new(7);
/// assert_eq!(id.as_u64(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u64);

impl FieldId {
    /// Creates a field ID from a raw value.
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

impl From<u64> for FieldId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed, validated field of a model.
///
/// A committed field always has a data type; the "unset" state only exists on
/// [`FieldInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Registry-assigned identifier.
    pub id: FieldId,

    /// Trimmed field name as entered by the user.
    pub name: String,

    /// Column data type.
    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Whether the field is (part of) the primary key.
    pub primary_key: bool,

    /// Whether the column is `NOT NULL`.
    pub required: bool,

    /// Whether the column carries a unique constraint.
    pub unique: bool,
}

/// Editable field values, as held by a draft.
///
/// `id` is `None` for a field that has never been committed.
///
/// # Examples
///
/// ```
/// use ms_core::{DataType, FieldInput};
///
/// let input = FieldInput::new("  title ", Some(DataType::String)).required(true);
/// assert_eq!(input.trimmed().name, "title");
/// assert!(input.required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    /// Identifier of the committed field this input edits, if any.
    pub id: Option<FieldId>,

    /// Raw name, possibly with surrounding whitespace.
    pub name: String,

    /// Chosen data type; `None` is the unset sentinel.
    #[serde(rename = "type")]
    pub data_type: Option<DataType>,

    /// Primary key flag.
    pub primary_key: bool,

    /// Required (`NOT NULL`) flag.
    pub required: bool,

    /// Unique flag.
    pub unique: bool,
}

impl FieldInput {
    /// Creates an uncommitted input with all flags off.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: Option<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    /// Sets the primary key flag.
    #[must_use]
    pub fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }

    /// Sets the required flag.
    #[must_use]
    pub fn required(mut self, value: bool) -> Self {
        self.required = value;
        self
    }

    /// Sets the unique flag.
    #[must_use]
    pub fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Returns a copy whose name has surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            ..self.clone()
        }
    }

    /// Converts this input into a committed field with the given id.
    ///
    /// Returns `None` while the data type is unset.
    #[must_use]
    pub fn into_field(self, id: FieldId) -> Option<Field> {
        Some(Field {
            id,
            name: self.name,
            data_type: self.data_type?,
            primary_key: self.primary_key,
            required: self.required,
            unique: self.unique,
        })
    }
}

impl From<&Field> for FieldInput {
    fn from(field: &Field) -> Self {
        Self {
            id: Some(field.id),
            name: field.name.clone(),
            data_type: Some(field.data_type),
            primary_key: field.primary_key,
            required: field.required,
            unique: field.unique,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_field_requires_type() {
        let input = FieldInput::new("title", None);
        assert!(input.into_field(FieldId::new(1)).is_none());

        let input = FieldInput::new("title", Some(DataType::Text)).unique(true);
        let field = input.into_field(FieldId::new(3)).unwrap();
        assert_eq!(field.id, FieldId::new(3));
        assert_eq!(field.data_type, DataType::Text);
        assert!(field.unique);
        assert!(!field.primary_key);
    }

    #[test]
    fn test_input_from_field_keeps_id() {
        let field = Field {
            id: FieldId::new(9),
            name: "slug".to_owned(),
            data_type: DataType::String,
            primary_key: false,
            required: true,
            unique: true,
        };
        let input = FieldInput::from(&field);
        assert_eq!(input.id, Some(FieldId::new(9)));
        assert_eq!(input.data_type, Some(DataType::String));
        assert_eq!(input.into_field(FieldId::new(9)).unwrap(), field);
    }

    #[test]
    fn test_field_serializes_type_key() {
        let field = Field {
            id: FieldId::new(1),
            name: "title".to_owned(),
            data_type: DataType::String,
            primary_key: false,
            required: false,
            unique: false,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "STRING");
        assert_eq!(json["primaryKey"], false);
    }
}
