//! Model registry for modelsmith.
//!
//! This crate holds the single source of truth that validation and generation
//! read from:
//!
//! - [`Registry`]: committed models, the configuration, and the id counters
//! - [`ModelDraft`]: the editing session for one model
//! - [`Snapshot`]: the flat, serializable form of the whole state
//! - [`RegistryError`]: rejections, export refusal, and caller errors
//!
//! # Commit discipline
//!
//! Every mutation is a commit of a draft. The validator runs on the complete
//! draft first; if any rule fires, nothing is committed and the draft keeps
//! the errors. Drafts with errors re-validate on every edit, drafts without
//! errors only when committed.
//!
//! # Export
//!
//! [`Registry::export`] re-validates the committed state and refuses with
//! [`RegistryError::ExportBlocked`] if anything is invalid. Only its result,
//! [`ms_core::ValidatedModels`], can be handed to the generator.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod draft;
mod error;
mod registry;
mod snapshot;

pub use draft::ModelDraft;
pub use error::{FieldRejection, Rejection, RegistryError};
pub use registry::Registry;
pub use snapshot::Snapshot;
