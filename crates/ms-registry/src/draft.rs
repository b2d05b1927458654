//! The model under edit.
//!
//! A [`ModelDraft`] shadows a committed model (or a model being created) with
//! its own errors, its own field drafts, and a pending new field. Nothing in a
//! draft reaches the registry until [`Registry::create_model`] or
//! [`Registry::update_model`] accepts it.
//!
//! [`Registry::create_model`]: crate::Registry::create_model
//! [`Registry::update_model`]: crate::Registry::update_model

use ms_core::naming;
use ms_core::{
    Draft, ErrorSet, FieldId, FieldInput, Model, ModelId, ModelInput, validate_field,
    validate_model,
};
use serde::{Deserialize, Serialize};

use crate::error::{FieldRejection, Rejection, RegistryError};

/// Editing session for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDraft {
    pub(crate) model: Draft<ModelInput>,
    pub(crate) fields: Vec<Draft<FieldInput>>,
    pub(crate) new_field: Draft<FieldInput>,
}

impl ModelDraft {
    /// Opens an editing session on a committed model.
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        Self {
            model: Draft::new(ModelInput::from(model)),
            fields: model
                .fields
                .iter()
                .map(|f| Draft::new(FieldInput::from(f)))
                .collect(),
            new_field: Draft::default(),
        }
    }

    /// Returns the id of the model being edited, or `None` while creating.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<ModelId> {
        self.model.value().id
    }

    /// Returns the current (possibly untrimmed) name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.model.value().name
    }

    /// Returns the model-level draft.
    #[inline]
    #[must_use]
    pub const fn model(&self) -> &Draft<ModelInput> {
        &self.model
    }

    /// Returns the field drafts in order.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Draft<FieldInput>] {
        &self.fields
    }

    /// Returns the field draft with the given id.
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&Draft<FieldInput>> {
        self.fields.iter().find(|f| f.value().id == Some(id))
    }

    /// Returns the field draft whose name normalizes like `name`.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&Draft<FieldInput>> {
        let key = naming::normalize(name);
        self.fields
            .iter()
            .find(|f| naming::normalize(&f.value().name) == key)
    }

    /// Returns the pending new field.
    #[inline]
    #[must_use]
    pub const fn new_field(&self) -> &Draft<FieldInput> {
        &self.new_field
    }

    /// Returns `true` if the model, any field, or the new field shows errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.model.has_errors()
            || self.new_field.has_errors()
            || self.fields.iter().any(Draft::has_errors)
    }

    /// Sets the model name, capped at the maximum name length.
    ///
    /// Re-validates against `existing` only if the draft already shows errors.
    pub fn set_name(&mut self, name: &str, existing: &[Model]) {
        let name = naming::clamp_input(name);
        self.model.edit(
            |input| input.name = name,
            |input| validate_model(&input.trimmed(), existing),
        );
    }

    /// Edits the pending new field.
    ///
    /// The name is capped at the maximum name length. Re-validates against the
    /// current field drafts only if the new field already shows errors.
    pub fn edit_new_field<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut FieldInput),
    {
        let siblings = self.field_values();
        self.new_field.edit(
            |input| {
                mutate(input);
                input.name = naming::clamp_input(&input.name);
            },
            |input| validate_field(&input.trimmed(), &siblings),
        );
    }

    /// Resets the pending new field to its empty state.
    pub fn clear_new_field(&mut self) {
        self.new_field = Draft::default();
    }

    /// Edits a field draft in place, validating lazily.
    pub fn edit_field<F>(&mut self, id: FieldId, mutate: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut FieldInput),
    {
        let siblings = self.field_values();
        let draft = self.field_mut(id)?;
        draft.edit(
            |input| {
                mutate(input);
                input.name = naming::clamp_input(&input.name);
            },
            |input| validate_field(&input.trimmed(), &siblings),
        );
        Ok(())
    }

    /// Edits a field draft and validates the result immediately.
    ///
    /// The edited value is kept either way; on failure it carries the errors
    /// and the rejection is returned.
    pub fn update_field<F>(&mut self, id: FieldId, mutate: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut FieldInput),
    {
        let siblings = self.field_values();
        let draft = self.field_mut(id)?;

        let mut value = draft.value().clone();
        mutate(&mut value);
        value.name = naming::clamp_input(&value.name);

        let mut edited = Draft::new(value.trimmed());
        let valid = edited.revalidate(|input| validate_field(input, &siblings));
        let errors = edited.errors().clone();
        *draft = edited;

        if valid {
            Ok(())
        } else {
            Err(RegistryError::Rejected(Rejection {
                model: ErrorSet::new(),
                fields: vec![FieldRejection {
                    field: Some(id),
                    errors,
                }],
            }))
        }
    }

    /// Removes a field draft.
    pub fn delete_field(&mut self, id: FieldId) -> Result<(), RegistryError> {
        let before = self.fields.len();
        self.fields.retain(|f| f.value().id != Some(id));
        if self.fields.len() == before {
            return Err(RegistryError::UnknownField(id));
        }
        Ok(())
    }

    pub(crate) fn field_values(&self) -> Vec<FieldInput> {
        self.fields.iter().map(|f| f.value().clone()).collect()
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut Draft<FieldInput>, RegistryError> {
        self.fields
            .iter_mut()
            .find(|f| f.value().id == Some(id))
            .ok_or(RegistryError::UnknownField(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::naming::MAX_NAME_LENGTH;
    use ms_core::{DataType, ErrorCode, Field};

    fn post() -> Model {
        Model {
            id: ModelId::new(1),
            name: "Post".to_owned(),
            fields: vec![
                Field {
                    id: FieldId::new(1),
                    name: "title".to_owned(),
                    data_type: DataType::String,
                    primary_key: false,
                    required: true,
                    unique: false,
                },
                Field {
                    id: FieldId::new(2),
                    name: "body".to_owned(),
                    data_type: DataType::Text,
                    primary_key: false,
                    required: false,
                    unique: false,
                },
            ],
        }
    }

    #[test]
    fn test_from_model_copies_fields() {
        let draft = ModelDraft::from_model(&post());
        assert_eq!(draft.id(), Some(ModelId::new(1)));
        assert_eq!(draft.name(), "Post");
        assert_eq!(draft.fields().len(), 2);
        assert!(draft.field(FieldId::new(2)).is_some());
        assert!(draft.field_named("Body").is_some());
        assert!(!draft.has_errors());
    }

    #[test]
    fn test_set_name_is_clamped() {
        let mut draft = ModelDraft::default();
        draft.set_name(&"x".repeat(MAX_NAME_LENGTH * 2), &[]);
        assert_eq!(draft.name().chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_set_name_validates_only_after_errors() {
        let existing = vec![post()];
        let mut draft = ModelDraft::default();

        draft.set_name("post", &existing);
        assert!(!draft.has_errors());

        draft.model.set_errors([ErrorCode::UniqueName].into_iter().collect());
        draft.set_name("post ", &existing);
        assert_eq!(
            draft.model().errors().as_slice(),
            &[ErrorCode::UniqueName]
        );

        draft.set_name("Comment", &existing);
        assert!(!draft.has_errors());
    }

    #[test]
    fn test_edit_new_field_is_lazy() {
        let mut draft = ModelDraft::from_model(&post());
        draft.edit_new_field(|f| f.name = "Title".to_owned());
        assert!(!draft.new_field().has_errors());

        draft.new_field.set_errors([ErrorCode::RequiredType].into_iter().collect());
        draft.edit_new_field(|f| f.data_type = Some(DataType::Integer));
        assert_eq!(
            draft.new_field().errors().as_slice(),
            &[ErrorCode::UniqueName]
        );

        draft.clear_new_field();
        assert_eq!(draft.new_field().value(), &FieldInput::default());
        assert!(!draft.has_errors());
    }

    #[test]
    fn test_update_field_rejects_collision() {
        let mut draft = ModelDraft::from_model(&post());
        let err = draft
            .update_field(FieldId::new(2), |f| f.name = "TITLE".to_owned())
            .unwrap_err();

        assert!(err.is_validation());
        let rejection = err.rejection().unwrap();
        assert_eq!(rejection.fields[0].field, Some(FieldId::new(2)));
        assert_eq!(
            rejection.fields[0].errors.as_slice(),
            &[ErrorCode::UniqueName]
        );

        let field = draft.field(FieldId::new(2)).unwrap();
        assert_eq!(field.value().name, "TITLE");
        assert!(field.has_errors());
        assert!(draft.has_errors());
    }

    #[test]
    fn test_update_field_trims_and_accepts() {
        let mut draft = ModelDraft::from_model(&post());
        draft
            .update_field(FieldId::new(2), |f| {
                f.name = "  content ".to_owned();
                f.unique = true;
            })
            .unwrap();

        let field = draft.field(FieldId::new(2)).unwrap().value();
        assert_eq!(field.name, "content");
        assert!(field.unique);
    }

    #[test]
    fn test_edit_field_is_lazy() {
        let mut draft = ModelDraft::from_model(&post());
        draft
            .edit_field(FieldId::new(1), |f| f.data_type = None)
            .unwrap();
        assert!(!draft.has_errors());
        assert!(draft.field(FieldId::new(1)).unwrap().value().data_type.is_none());
    }

    #[test]
    fn test_unknown_field() {
        let mut draft = ModelDraft::from_model(&post());
        assert!(matches!(
            draft.delete_field(FieldId::new(9)),
            Err(RegistryError::UnknownField(id)) if id == FieldId::new(9)
        ));
        assert!(draft.edit_field(FieldId::new(9), |_| {}).is_err());

        draft.delete_field(FieldId::new(1)).unwrap();
        assert_eq!(draft.fields().len(), 1);
    }
}
