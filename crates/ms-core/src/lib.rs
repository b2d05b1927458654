//! Core types, naming rules, and validation for modelsmith.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - Domain types (`Model`, `Field`, `DataType`) and their editable inputs
//! - The project [`Configuration`] and target [`Dialect`]
//! - Name normalization and generation casings ([`naming`])
//! - The rule-table validator ([`validate`]) and [`ValidatedModels`]
//! - [`Draft`], the lazily validated editing wrapper
//! - [`ConfigError`] for project file handling
//!
//! Everything here is pure; persistence and logging live in the crates
//! built on top of it.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod draft;
pub mod error;
pub mod naming;
pub mod types;
pub mod validate;

pub use config::{Configuration, DEFAULT_PROJECT_NAME, Dialect};
pub use draft::Draft;
pub use error::ConfigError;
pub use types::{
    DataType, ErrorCode, ErrorSet, Field, FieldId, FieldInput, Model, ModelId, ModelInput,
};
pub use validate::{ValidatedModels, Violation, validate_field, validate_model};
