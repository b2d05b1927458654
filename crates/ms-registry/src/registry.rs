//! The authoritative model collection.
//!
//! [`Registry`] owns every committed [`Model`], the [`Configuration`], and the
//! id counters. All mutation goes through draft commits that either apply in
//! full or are rejected in full; a rejected draft gets the errors written back
//! so the caller can show them and let the user correct the input.
//!
//! # Example
//!
//! ```
//! use ms_core::{DataType, ErrorCode};
//! use ms_registry::Registry;
//!
//! let mut registry = Registry::default();
//!
//! let mut draft = registry.new_model_draft();
//! draft.set_name("Post", registry.models());
//! let post = registry.create_model(&mut draft)?;
//! assert_eq!(post.id.as_u64(), 1);
//!
//! let mut draft = registry.edit_model(post.id)?;
//! draft.edit_new_field(|f| {
//!     f.name = "title".to_owned();
//!     f.data_type = Some(DataType::String);
//! });
//! registry.create_field(&mut draft)?;
//! registry.update_model(&mut draft)?;
//!
//! assert_eq!(registry.models()[0].fields.len(), 1);
//! # Ok::<(), ms_registry::RegistryError>(())
//! ```

use ms_core::{
    Configuration, Draft, ErrorSet, FieldId, FieldInput, Model, ModelId, ValidatedModels,
    naming, validate_field, validate_model,
};
use tracing::{debug, info, warn};

use crate::draft::ModelDraft;
use crate::error::{FieldRejection, Rejection, RegistryError};
use crate::snapshot::Snapshot;

/// In-memory collection of models plus the project configuration.
///
/// Model ids and field ids come from two registry-wide counters that start
/// at `1` and are never reused, even after deletion or a rejected commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    config: Configuration,
    models: Vec<Model>,
    next_model_id: u64,
    next_field_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            models: Vec::new(),
            next_model_id: 1,
            next_field_id: 1,
        }
    }

    /// Rebuilds a registry from a snapshot, verbatim.
    ///
    /// The snapshot is not re-validated; [`Registry::export`] catches any
    /// invalid data it contains.
    #[must_use]
    pub fn restore(snapshot: Snapshot) -> Self {
        debug!(
            models = snapshot.models.len(),
            next_model_id = snapshot.next_model_id,
            next_field_id = snapshot.next_field_id,
            "Restored registry"
        );
        Self {
            config: snapshot.config,
            models: snapshot.models,
            next_model_id: snapshot.next_model_id,
            next_field_id: snapshot.next_field_id,
        }
    }

    /// Returns a plain serializable copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            models: self.models.clone(),
            next_model_id: self.next_model_id,
            next_field_id: self.next_field_id,
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Returns the configuration for editing.
    ///
    /// The configuration has no invalid states, so edits need no validation.
    #[inline]
    pub const fn config_mut(&mut self) -> &mut Configuration {
        &mut self.config
    }

    /// Committed models in insertion order.
    #[inline]
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Returns the number of committed models.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if no model is committed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Returns the model with the given id.
    #[must_use]
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Returns the model whose name normalizes like `name`.
    #[must_use]
    pub fn model_named(&self, name: &str) -> Option<&Model> {
        let key = naming::normalize(name);
        self.models
            .iter()
            .find(|m| naming::normalize(&m.name) == key)
    }

    /// Opens a creation draft.
    #[must_use]
    pub fn new_model_draft(&self) -> ModelDraft {
        ModelDraft::default()
    }

    /// Opens an editing draft on a committed model.
    pub fn edit_model(&self, id: ModelId) -> Result<ModelDraft, RegistryError> {
        self.model(id)
            .map(ModelDraft::from_model)
            .ok_or(RegistryError::UnknownModel(id))
    }

    /// Validates a creation draft and appends it as a new model.
    ///
    /// On success the model gets the next model id and the draft is reset.
    /// On rejection nothing is committed and the draft carries the errors.
    pub fn create_model(&mut self, draft: &mut ModelDraft) -> Result<Model, RegistryError> {
        if let Some(id) = draft.id() {
            return Err(RegistryError::AlreadyCommitted(id));
        }
        self.review(draft)?;

        let id = ModelId::new(self.next_model_id);
        let model = build_model(id, draft)?;
        self.next_model_id += 1;
        self.models.push(model.clone());
        *draft = ModelDraft::default();

        info!(id = %model.id, name = %model.name, "Created model");
        Ok(model)
    }

    /// Validates an editing draft and replaces the committed model.
    ///
    /// The model and every field are re-validated; if anything fails, the
    /// committed model is left untouched.
    pub fn update_model(&mut self, draft: &mut ModelDraft) -> Result<Model, RegistryError> {
        let id = draft.id().ok_or(RegistryError::NotCommitted)?;
        let index = self
            .models
            .iter()
            .position(|m| m.id == id)
            .ok_or(RegistryError::UnknownModel(id))?;
        self.review(draft)?;

        let model = build_model(id, draft)?;
        if let Some(slot) = self.models.get_mut(index) {
            *slot = model.clone();
        }

        info!(id = %model.id, name = %model.name, fields = model.fields.len(), "Updated model");
        Ok(model)
    }

    /// Removes a model and its fields. A missing id is a no-op.
    pub fn delete_model(&mut self, id: ModelId) -> Option<Model> {
        let index = self.models.iter().position(|m| m.id == id)?;
        let model = self.models.remove(index);
        info!(id = %model.id, name = %model.name, "Deleted model");
        Some(model)
    }

    /// Validates the draft's pending new field against its current fields and
    /// appends it.
    ///
    /// The field gets the next field id immediately; it reaches the committed
    /// model with the next [`Registry::update_model`] (or
    /// [`Registry::create_model`]) of the same draft.
    pub fn create_field(&mut self, draft: &mut ModelDraft) -> Result<FieldId, RegistryError> {
        let siblings = draft.field_values();
        let candidate = FieldInput {
            id: None,
            ..draft.new_field.value().trimmed()
        };

        let mut candidate = Draft::new(candidate);
        if !candidate.revalidate(|input| validate_field(input, &siblings)) {
            let errors = candidate.errors().clone();
            debug!(
                name = %candidate.value().name,
                errors = ?errors.as_slice(),
                "New field rejected"
            );
            draft.new_field = candidate;
            return Err(RegistryError::Rejected(Rejection {
                model: ErrorSet::new(),
                fields: vec![FieldRejection {
                    field: None,
                    errors,
                }],
            }));
        }

        let id = FieldId::new(self.next_field_id);
        self.next_field_id += 1;

        let mut value = candidate.into_value();
        value.id = Some(id);
        debug!(id = %id, name = %value.name, "Created field");
        draft.fields.push(Draft::new(value));
        draft.clear_new_field();
        Ok(id)
    }

    /// Re-validates every committed model and field.
    ///
    /// Committed data is valid by construction unless it came from a restored
    /// snapshot, so this is the gate in front of generation.
    pub fn export(&self) -> Result<ValidatedModels, RegistryError> {
        ValidatedModels::check(&self.models).map_err(|violations| {
            warn!(count = violations.len(), "Export blocked by invalid models");
            RegistryError::ExportBlocked { violations }
        })
    }

    /// Trims and validates a whole draft, writing the verdict back into it.
    fn review(&self, draft: &mut ModelDraft) -> Result<(), RegistryError> {
        draft.model = Draft::new(draft.model.value().trimmed());
        draft.model.revalidate(|input| validate_model(input, &self.models));

        for field in &mut draft.fields {
            *field = Draft::new(field.value().trimmed());
        }
        let siblings = draft.field_values();
        let mut fields = Vec::new();
        for field in &mut draft.fields {
            if !field.revalidate(|input| validate_field(input, &siblings)) {
                fields.push(FieldRejection {
                    field: field.value().id,
                    errors: field.errors().clone(),
                });
            }
        }

        let rejection = Rejection {
            model: draft.model.errors().clone(),
            fields,
        };
        if rejection.is_empty() {
            return Ok(());
        }

        debug!(name = %draft.name(), %rejection, "Model draft rejected");
        Err(RegistryError::Rejected(rejection))
    }
}

/// Builds the committed form of a reviewed draft.
fn build_model(id: ModelId, draft: &ModelDraft) -> Result<Model, RegistryError> {
    let fields = draft
        .fields
        .iter()
        .map(|field| {
            let input = field.value().clone();
            let field_id = input.id.ok_or(RegistryError::NotCommitted)?;
            input
                .into_field(field_id)
                .ok_or(RegistryError::NotCommitted)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Model {
        id,
        name: draft.name().to_owned(),
        fields,
    })
}
