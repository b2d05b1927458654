//! The model manifest (`models/index.js`).

use ms_core::{Configuration, Model};

use super::ModelNames;

/// Renders the manifest that connects Sequelize, loads every model in
/// registry order, and wires up `associate` hooks.
#[must_use]
pub fn render(models: &[Model], config: &Configuration) -> String {
    let imports: String = models
        .iter()
        .map(|model| {
            let names = ModelNames::new(model, config);
            format!(
                "db.{} = sequelize.import(path.join(__dirname, '{}'))\n",
                names.class,
                names.model_file()
            )
        })
        .collect();

    format!(
        "'use strict'

const path = require('path')
const Sequelize = require('sequelize')

const env = process.env.NODE_ENV || 'development'
const config = require(path.join(__dirname, '..', 'config', 'config.json'))[env]

const sequelize = config.use_env_variable
  ? new Sequelize(process.env[config.use_env_variable], config)
  : new Sequelize(config.database, config.username, config.password, config)

const db = {{}}

{imports}
Object.keys(db).forEach(modelName => {{
  if (db[modelName].associate) {{
    db[modelName].associate(db)
  }}
}})

db.sequelize = sequelize
db.Sequelize = Sequelize

module.exports = db
"
    )
}
