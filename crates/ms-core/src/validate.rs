//! Model and field validation.
//!
//! Validation is a pure function of a candidate and its siblings. Each rule is
//! an `(ErrorCode, predicate)` pair; every rule is evaluated, in table order,
//! and the codes of the rules whose predicate holds form the result. The same
//! candidate against the same siblings always yields the same ordered
//! [`ErrorSet`].
//!
//! ```
//! use ms_core::validate::validate_model;
//! use ms_core::{ErrorCode, Model, ModelId, ModelInput};
//!
//! let existing = vec![Model {
//!     id: ModelId::new(1),
//!     name: "Post".to_owned(),
//!     fields: Vec::new(),
//! }];
//!
//! let errors = validate_model(&ModelInput::new("post"), &existing);
//! assert_eq!(errors.as_slice(), &[ErrorCode::UniqueName]);
//! ```

use serde::Serialize;

use crate::naming::{self, MAX_NAME_LENGTH};
use crate::types::{ErrorCode, ErrorSet, FieldId, FieldInput, Model, ModelId, ModelInput};

/// What a rule predicate sees: the trimmed name plus facts precomputed once.
struct Check<'a> {
    name: &'a str,
    key_is_empty: bool,
    key_is_identifier: bool,
    measured_len: usize,
    collides: bool,
    type_missing: bool,
}

type Rule = (ErrorCode, fn(&Check<'_>) -> bool);

fn collides(c: &Check<'_>) -> bool {
    c.collides
}

// The key is checked too: `_1st` is an identifier, its key `1st` is not.
fn bad_format(c: &Check<'_>) -> bool {
    !naming::is_identifier(c.name) || !c.key_is_identifier
}

// A name of separators only (`_`, `__`) normalizes to nothing.
fn missing_name(c: &Check<'_>) -> bool {
    c.name.is_empty() || c.key_is_empty
}

fn too_long(c: &Check<'_>) -> bool {
    c.measured_len > MAX_NAME_LENGTH
}

fn missing_type(c: &Check<'_>) -> bool {
    c.type_missing
}

const MODEL_RULES: &[Rule] = &[
    (ErrorCode::UniqueName, collides),
    (ErrorCode::NameFormat, bad_format),
    (ErrorCode::RequiredName, missing_name),
    (ErrorCode::NameLength, too_long),
];

const FIELD_RULES: &[Rule] = &[
    (ErrorCode::UniqueName, collides),
    (ErrorCode::NameFormat, bad_format),
    (ErrorCode::RequiredName, missing_name),
    (ErrorCode::NameLength, too_long),
    (ErrorCode::RequiredType, missing_type),
];

fn evaluate(rules: &[Rule], check: &Check<'_>) -> ErrorSet {
    rules
        .iter()
        .filter(|(_, holds)| holds(check))
        .map(|(code, _)| *code)
        .collect()
}

/// Validates a model candidate against the committed models.
///
/// Surrounding whitespace of the name is ignored. A committed model with the
/// same id as the candidate is skipped by the uniqueness rule, so a model can
/// be re-validated in place. Two models also collide when their pluralized
/// keys match (`new` and `news`), since both would own the same table. The
/// length rule measures the pluralized key, the eventual table name.
#[must_use]
pub fn validate_model(candidate: &ModelInput, existing: &[Model]) -> ErrorSet {
    let name = candidate.name.trim();
    let key = naming::normalize(name);
    let table = naming::pluralize(&key);

    let collides = existing.iter().any(|model| {
        if Some(model.id) == candidate.id {
            return false;
        }
        let other = naming::normalize(&model.name);
        other == key || naming::pluralize(&other) == table
    });

    let check = Check {
        name,
        key_is_empty: key.is_empty(),
        key_is_identifier: naming::is_identifier(&key),
        measured_len: table.chars().count(),
        collides,
        type_missing: false,
    };
    evaluate(MODEL_RULES, &check)
}

/// Validates a field candidate against the other fields of its model.
///
/// `siblings` is the current field set of the model being edited, which may
/// include the candidate itself; an entry with the candidate's id is skipped.
/// The length rule measures the singular key.
///
/// # Examples
///
/// ```
/// use ms_core::validate::validate_field;
/// use ms_core::{DataType, ErrorCode, FieldInput};
///
/// let siblings = vec![FieldInput::new("title", Some(DataType::String))];
/// let errors = validate_field(&FieldInput::new("Title", None), &siblings);
/// assert_eq!(
///     errors.as_slice(),
///     &[ErrorCode::UniqueName, ErrorCode::RequiredType]
/// );
/// ```
#[must_use]
pub fn validate_field(candidate: &FieldInput, siblings: &[FieldInput]) -> ErrorSet {
    let name = candidate.name.trim();
    let key = naming::normalize(name);

    let collides = siblings.iter().any(|field| {
        let same_entity = candidate.id.is_some() && field.id == candidate.id;
        !same_entity && naming::normalize(&field.name) == key
    });

    let check = Check {
        name,
        key_is_empty: key.is_empty(),
        key_is_identifier: naming::is_identifier(&key),
        measured_len: key.chars().count(),
        collides,
        type_missing: candidate.data_type.is_none(),
    };
    evaluate(FIELD_RULES, &check)
}

/// A committed entity that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The offending model, or the model owning the offending field.
    pub model: ModelId,
    /// The offending field, if the violation is field-level.
    pub field: Option<FieldId>,
    /// The violated rules.
    pub errors: ErrorSet,
}

/// Models that passed a full re-validation.
///
/// The only constructor is [`ValidatedModels::check`], so holding a value of
/// this type proves that no model or field carries errors. Generation takes
/// this type rather than a plain slice.
///
/// # Examples
///
/// ```
/// use ms_core::{Model, ModelId, ValidatedModels};
///
/// let models = vec![
///     Model { id: ModelId::new(1), name: "Post".to_owned(), fields: Vec::new() },
///     Model { id: ModelId::new(2), name: "post".to_owned(), fields: Vec::new() },
/// ];
///
/// let violations = ValidatedModels::check(&models).unwrap_err();
/// assert_eq!(violations.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedModels(Vec<Model>);

impl ValidatedModels {
    /// Re-validates every model against the others and every field against
    /// its siblings.
    ///
    /// # Errors
    ///
    /// Returns every [`Violation`], in model then field order, if any rule
    /// fires.
    pub fn check(models: &[Model]) -> Result<Self, Vec<Violation>> {
        let mut violations = Vec::new();

        for model in models {
            let errors = validate_model(&ModelInput::from(model), models);
            if !errors.is_empty() {
                violations.push(Violation {
                    model: model.id,
                    field: None,
                    errors,
                });
            }

            let siblings: Vec<FieldInput> = model.fields.iter().map(FieldInput::from).collect();
            for field in &siblings {
                let errors = validate_field(field, &siblings);
                if !errors.is_empty() {
                    violations.push(Violation {
                        model: model.id,
                        field: field.id,
                        errors,
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(Self(models.to_vec()))
        } else {
            Err(violations)
        }
    }

    /// Returns the models in registry order.
    #[inline]
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.0
    }

    /// Returns the number of models.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no models.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the models in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ValidatedModels {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
