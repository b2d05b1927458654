//! Uncommitted, user-editable values.
//!
//! A [`Draft`] shadows a value that has not been committed yet and carries its
//! own [`ErrorSet`]. Drafts are validated lazily: an edit only re-runs
//! validation when the draft already shows errors, so a user who has not yet
//! attempted a save is not shown errors mid-edit. A commit path always calls
//! [`Draft::revalidate`] and is the only way a draft becomes committed data.

use serde::{Deserialize, Serialize};

use crate::types::ErrorSet;

/// An uncommitted value and its current validation errors.
///
/// # Examples
///
/// ```
/// use ms_core::{Draft, ErrorCode, ErrorSet, ModelInput};
///
/// let check = |input: &ModelInput| -> ErrorSet {
///     if input.name.trim().is_empty() {
///         [ErrorCode::RequiredName].into_iter().collect()
///     } else {
///         ErrorSet::new()
///     }
/// };
///
/// let mut draft = Draft::new(ModelInput::new(""));
///
/// // No save attempted yet: edits do not validate.
/// draft.edit(|input| input.name.clear(), check);
/// assert!(!draft.has_errors());
///
/// // The commit path validates unconditionally.
/// assert!(!draft.revalidate(check));
///
/// // Once errors are showing, every edit re-validates.
/// draft.edit(|input| input.name = "Post".to_owned(), check);
/// assert!(!draft.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft<T> {
    value: T,
    errors: ErrorSet,
}

impl<T> Draft<T> {
    /// Creates a draft with no errors.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: ErrorSet::new(),
        }
    }

    /// Returns the draft value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the errors found by the last validation.
    #[inline]
    #[must_use]
    pub const fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Returns `true` if the last validation found errors.
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Applies `mutate` to the value.
    ///
    /// Re-validates with `validate` only if the draft currently has errors.
    pub fn edit<M, V>(&mut self, mutate: M, validate: V)
    where
        M: FnOnce(&mut T),
        V: FnOnce(&T) -> ErrorSet,
    {
        mutate(&mut self.value);
        if self.has_errors() {
            self.errors = validate(&self.value);
        }
    }

    /// Validates the value unconditionally and stores the result.
    ///
    /// Returns `true` if the value is valid.
    pub fn revalidate<V>(&mut self, validate: V) -> bool
    where
        V: FnOnce(&T) -> ErrorSet,
    {
        self.errors = validate(&self.value);
        self.errors.is_empty()
    }

    /// Replaces the stored errors, e.g. with a verdict computed elsewhere.
    pub fn set_errors(&mut self, errors: ErrorSet) {
        self.errors = errors;
    }

    /// Consumes the draft, returning its value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> From<T> for Draft<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCode;
    use std::cell::Cell;

    #[allow(clippy::ptr_arg)]
    fn required(name: &String) -> ErrorSet {
        if name.is_empty() {
            [ErrorCode::RequiredName].into_iter().collect()
        } else {
            ErrorSet::new()
        }
    }

    #[test]
    fn test_edit_without_errors_skips_validation() {
        let calls = Cell::new(0);
        let mut draft = Draft::new(String::from("post"));

        draft.edit(String::clear, |v| {
            calls.set(calls.get() + 1);
            required(v)
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(draft.value(), "");
        assert!(!draft.has_errors());
    }

    #[test]
    fn test_edit_with_errors_revalidates() {
        let mut draft = Draft::new(String::new());
        assert!(!draft.revalidate(required));
        assert_eq!(draft.errors().as_slice(), &[ErrorCode::RequiredName]);

        draft.edit(|v| v.push('x'), required);
        assert!(!draft.has_errors());

        // Errors cleared, so the next bad edit is not flagged until commit.
        draft.edit(String::clear, required);
        assert!(!draft.has_errors());
    }

    #[test]
    fn test_revalidate_reports_validity() {
        let mut draft = Draft::from(String::from("tag"));
        assert!(draft.revalidate(required));
        assert_eq!(draft.into_value(), "tag");
    }

    #[test]
    fn test_set_errors() {
        let mut draft = Draft::new(String::from("tag"));
        draft.set_errors([ErrorCode::UniqueName].into_iter().collect());
        assert!(draft.has_errors());
    }
}
