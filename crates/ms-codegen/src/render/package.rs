//! Project scaffolding: `package.json` and `.gitignore`.

use std::collections::BTreeMap;

use ms_core::{Configuration, DEFAULT_PROJECT_NAME, Dialect, naming};
use serde::Serialize;

use crate::error::GenerateError;

const SEQUELIZE_VERSION: &str = "^5.22.5";
const SEQUELIZE_CLI_VERSION: &str = "^6.2.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Package<'a> {
    name: String,
    version: &'a str,
    private: bool,
    scripts: BTreeMap<&'a str, &'a str>,
    dependencies: BTreeMap<&'a str, &'a str>,
    dev_dependencies: BTreeMap<&'a str, &'a str>,
}

/// Driver packages Sequelize needs for `dialect`.
fn drivers(dialect: Dialect) -> &'static [(&'static str, &'static str)] {
    match dialect {
        Dialect::Sqlite => &[("sqlite3", "^5.0.2")],
        Dialect::Postgres => &[("pg", "^8.7.1"), ("pg-hstore", "^2.3.4")],
        Dialect::Mysql => &[("mysql2", "^2.3.3")],
        Dialect::Mariadb => &[("mariadb", "^2.5.5")],
        Dialect::Mssql => &[("tedious", "^11.8.0")],
    }
}

/// Snake case key of the project name, used for database names.
///
/// A name without identifier characters falls back to the key of
/// [`DEFAULT_PROJECT_NAME`].
pub(crate) fn project_key(config: &Configuration) -> String {
    let key = naming::normalize(config.project_name());
    if key.is_empty() {
        naming::normalize(DEFAULT_PROJECT_NAME)
    } else {
        key
    }
}

/// Kebab case project name, used for the package name and the root folder.
///
/// Always a single safe path segment: `acme/blog` becomes `acme-blog`.
pub(crate) fn project_slug(config: &Configuration) -> String {
    project_key(config).replace('_', "-")
}

/// Renders `package.json`.
pub fn render(config: &Configuration) -> Result<String, GenerateError> {
    let mut dependencies = BTreeMap::from([("sequelize", SEQUELIZE_VERSION)]);
    dependencies.extend(drivers(config.dialect).iter().copied());

    let package = Package {
        name: project_slug(config),
        version: "0.1.0",
        private: true,
        scripts: BTreeMap::from([
            ("db:migrate", "sequelize db:migrate"),
            ("db:migrate:undo", "sequelize db:migrate:undo"),
        ]),
        dependencies,
        dev_dependencies: BTreeMap::from([("sequelize-cli", SEQUELIZE_CLI_VERSION)]),
    };

    let mut json = serde_json::to_string_pretty(&package)
        .map_err(|e| GenerateError::json("package.json", e))?;
    json.push('\n');
    Ok(json)
}

/// Renders `.gitignore`.
#[must_use]
pub fn render_gitignore(config: &Configuration) -> String {
    let mut out = String::from("node_modules/\n.env\n");
    if config.dialect == Dialect::Sqlite {
        out.push_str("*.sqlite\n");
    }
    out
}
