//! Project-wide generation settings.
//!
//! - [`Dialect`] - Target database dialect
//! - [`Configuration`] - Global flags applied uniformly to every model
//!
//! The configuration has no invalid states: every field is a boolean, a closed
//! enum, or free text. A blank project name is replaced by
//! [`DEFAULT_PROJECT_NAME`] when the name is resolved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Project name used when none has been set.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Target database dialect.
///
/// Selects the type-mapping table, the generated connection settings, and the
/// driver package of the generated project.
///
/// # Examples
///
/// ```
/// use ms_core::Dialect;
///
/// let dialect: Dialect = "Postgres".parse()?;
/// assert_eq!(dialect, Dialect::Postgres);
/// assert_eq!(dialect.as_str(), "postgres");
/// # Ok::<(), ms_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `SQLite`.
    #[default]
    Sqlite,
    /// `PostgreSQL`.
    Postgres,
    /// `MySQL`.
    Mysql,
    /// `MariaDB`.
    Mariadb,
    /// Microsoft SQL Server.
    Mssql,
}

impl Dialect {
    /// Every supported dialect.
    pub const ALL: [Self; 5] = [
        Self::Sqlite,
        Self::Postgres,
        Self::Mysql,
        Self::Mariadb,
        Self::Mssql,
    ];

    /// Returns the dialect identifier understood by Sequelize.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
            Self::Mssql => "mssql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "postgresql" | "pg" => return Ok(Self::Postgres),
            "sqlserver" => return Ok(Self::Mssql),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| ConfigError::unknown_value("dialect", s))
    }
}

/// Global generation settings.
///
/// These flags are not per-model toggles: each one changes the output of every
/// model in the same way.
///
/// # Examples
///
/// ```
/// use ms_core::{Configuration, Dialect};
///
/// let config = Configuration::default();
/// assert!(config.timestamps);
/// assert!(!config.singular_table_names);
/// assert_eq!(config.dialect, Dialect::Sqlite);
/// assert_eq!(config.project_name(), "my-project");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Add `createdAt`/`updatedAt` columns to every table.
    pub timestamps: bool,

    /// Use snake case column names (`underscored` models).
    pub snake: bool,

    /// Add a `deletedAt` column and mark models paranoid.
    pub soft_deletes: bool,

    /// Keep table names singular instead of pluralizing them.
    pub singular_table_names: bool,

    /// Target dialect.
    pub dialect: Dialect,

    /// Name of the generated project and of the archive's root directory.
    #[serde(rename = "projectName", alias = "name")]
    pub name: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            timestamps: true,
            snake: false,
            soft_deletes: false,
            singular_table_names: false,
            dialect: Dialect::Sqlite,
            name: DEFAULT_PROJECT_NAME.to_owned(),
        }
    }
}

impl Configuration {
    /// Returns the trimmed project name, or [`DEFAULT_PROJECT_NAME`] when blank.
    #[must_use]
    pub fn project_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            name
        }
    }
}
