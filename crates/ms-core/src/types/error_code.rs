//! Symbolic validation error codes.
//!
//! Validation never produces prose. It reports an ordered [`ErrorSet`] of
//! [`ErrorCode`]s and leaves wording to the presentation layer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A violated validation rule.
///
/// Variants are declared in rule evaluation order, which is also the order
/// they appear in an [`ErrorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The normalized name collides with a sibling.
    UniqueName,

    /// The raw name is not a valid identifier.
    NameFormat,

    /// The name is empty after trimming.
    RequiredName,

    /// The normalized (and for models, pluralized) name is too long.
    NameLength,

    /// A field has no data type.
    RequiredType,
}

impl ErrorCode {
    /// Returns a stable machine-readable identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use ms_core::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::UniqueName.code(), "UNIQUE_NAME");
    /// ```
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UniqueName => "UNIQUE_NAME",
            Self::NameFormat => "NAME_FORMAT",
            Self::RequiredName => "REQUIRED_NAME",
            Self::NameLength => "NAME_LENGTH",
            Self::RequiredType => "REQUIRED_TYPE",
        }
    }
}

/// An ordered, duplicate-free collection of [`ErrorCode`]s.
///
/// Five rules exist, so the codes live inline without heap allocation.
///
/// # Examples
///
/// ```
/// use ms_core::{ErrorCode, ErrorSet};
///
/// let errors: ErrorSet = [ErrorCode::RequiredName, ErrorCode::RequiredName]
///     .into_iter()
///     .collect();
///
/// assert_eq!(errors.len(), 1);
/// assert!(errors.contains(ErrorCode::RequiredName));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet(SmallVec<[ErrorCode; 5]>);

impl ErrorSet {
    /// Creates an empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a code unless it is already present.
    pub fn insert(&mut self, code: ErrorCode) {
        if !self.0.contains(&code) {
            self.0.push(code);
        }
    }

    /// Returns `true` if the set contains `code`.
    #[inline]
    #[must_use]
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.0.contains(&code)
    }

    /// Returns `true` if no rule was violated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of violated rules.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the codes in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.0.iter().copied()
    }

    /// Returns the codes as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[ErrorCode] {
        &self.0
    }

    /// Removes every code.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<ErrorCode> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = ErrorCode>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = ErrorCode;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ErrorCode>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_set_keeps_insertion_order() {
        let mut set = ErrorSet::new();
        set.insert(ErrorCode::NameLength);
        set.insert(ErrorCode::UniqueName);
        set.insert(ErrorCode::NameLength);

        assert_eq!(
            set.as_slice(),
            &[ErrorCode::NameLength, ErrorCode::UniqueName]
        );
    }

    #[test]
    fn test_error_set_serializes_as_list() {
        let set: ErrorSet = [ErrorCode::UniqueName, ErrorCode::RequiredType]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["unique_name","required_type"]"#
        );
    }

    #[test]
    fn test_error_set_clear() {
        let mut set: ErrorSet = std::iter::once(ErrorCode::RequiredName).collect();
        assert!(!set.is_empty());
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
