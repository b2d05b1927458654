//! The closed set of field data types.
//!
//! Every field carries one [`DataType`] once committed. While a field is still
//! a draft its type is an `Option<DataType>`, with `None` standing for the
//! explicit "unset" choice that is never legal for a committed field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A logical column type.
///
/// The generator maps each variant to a dialect-specific token; the validator
/// only cares whether a type has been chosen at all.
///
/// # Examples
///
/// ```
/// use ms_core::DataType;
///
/// let ty: DataType = "dateonly".parse()?;
/// assert_eq!(ty, DataType::DateOnly);
/// assert_eq!(ty.tag(), "DATEONLY");
/// assert_eq!(ty.label(), "Date (without time)");
/// # Ok::<(), ms_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Short variable-length string.
    String,
    /// Unbounded text.
    Text,
    /// Integer.
    Integer,
    /// Single-precision floating point.
    Float,
    /// Real (single precision on most dialects).
    Real,
    /// Double-precision floating point.
    Double,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Date with time.
    Date,
    /// Date without time.
    DateOnly,
    /// Boolean.
    Boolean,
    /// Array of values.
    Array,
    /// Structured JSON document.
    Json,
    /// Binary blob.
    Blob,
    /// Universally unique identifier.
    Uuid,
}

impl DataType {
    /// Every data type, in the order they are offered to users.
    pub const ALL: [Self; 14] = [
        Self::String,
        Self::Text,
        Self::Integer,
        Self::Float,
        Self::Real,
        Self::Double,
        Self::Decimal,
        Self::Date,
        Self::DateOnly,
        Self::Boolean,
        Self::Array,
        Self::Json,
        Self::Blob,
        Self::Uuid,
    ];

    /// Returns the upper-case tag used in project files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::DateOnly => "DATEONLY",
            Self::Boolean => "BOOLEAN",
            Self::Array => "ARRAY",
            Self::Json => "JSON",
            Self::Blob => "BLOB",
            Self::Uuid => "UUID",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Real => "Real",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::Date => "Date",
            Self::DateOnly => "Date (without time)",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Json => "JSON",
            Self::Blob => "BLOB",
            Self::Uuid => "UUID",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DataType {
    type Err = ConfigError;

    /// Parses a tag case-insensitively; `-` and `_` are ignored so that
    /// `date-only` and `DATE_ONLY` both resolve to [`DataType::DateOnly`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();

        Self::ALL
            .into_iter()
            .find(|ty| ty.tag() == wanted)
            .ok_or_else(|| ConfigError::unknown_value("data type", s))
    }
}
