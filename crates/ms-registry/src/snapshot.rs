//! Serializable registry state.
//!
//! A [`Snapshot`] is the flat record a persistence layer stores: the
//! configuration, every committed model, and both id counters. It is written
//! as pretty JSON and accepted back verbatim; there is no migration of older
//! shapes.

use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use ms_core::{ConfigError, Configuration, Model};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete registry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Project configuration.
    pub config: Configuration,
    /// Committed models in insertion order.
    pub models: Vec<Model>,
    /// Next model id to hand out.
    pub next_model_id: u64,
    /// Next field id to hand out.
    pub next_field_id: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            config: Configuration::default(),
            models: Vec::new(),
            next_model_id: 1,
            next_field_id: 1,
        }
    }
}

impl Snapshot {
    /// Reads a snapshot from a JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use ms_registry::{Registry, Snapshot};
    ///
    /// let snapshot = Snapshot::load(Utf8Path::new("modelsmith.json"))?;
    /// let registry = Registry::restore(snapshot);
    /// # Ok::<(), ms_core::ConfigError>(())
    /// ```
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConfigError::MissingFile(path.to_owned())
            } else {
                ConfigError::io(path, e)
            }
        })?;
        let snapshot: Self =
            serde_json::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        debug!(path = %path, models = snapshot.models.len(), "Loaded project");
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty JSON, replacing any existing file.
    pub fn save(&self, path: &Utf8Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))?;
        debug!(path = %path, models = self.models.len(), "Saved project");
        Ok(())
    }

    /// Writes the snapshot to a file that must not exist yet.
    pub fn save_new(&self, path: &Utf8Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    ConfigError::AlreadyExists(path.to_owned())
                } else {
                    ConfigError::io(path, e)
                }
            })?;
        file.write_all(json.as_bytes())
            .map_err(|e| ConfigError::io(path, e))?;
        debug!(path = %path, "Created project");
        Ok(())
    }

    fn to_json(&self) -> Result<String, ConfigError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
