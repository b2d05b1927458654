//! Domain types for modelsmith.
//!
//! # Module Organization
//!
//! - [`data_type`] - The closed set of column data types
//! - [`error_code`] - Symbolic validation codes and ordered code sets
//! - [`field`] - Committed fields and editable field inputs
//! - [`model`] - Committed models and editable model inputs
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use ms_core::{DataType, ErrorCode, Field, FieldInput, Model, ModelInput};
//! ```

pub mod data_type;
pub mod error_code;
pub mod field;
pub mod model;

pub use data_type::DataType;
pub use error_code::{ErrorCode, ErrorSet};
pub use field::{Field, FieldId, FieldInput};
pub use model::{Model, ModelId, ModelInput};
