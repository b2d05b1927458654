//! Table creation migrations (`migrations/NNNN-create-<table>.js`).

use ms_core::{Configuration, DataType, Field, Model, naming};

use super::{ModelNames, Prop, defines, is_primary, needs_implicit_key, object, prop, quoted};
use crate::typemap::type_expr;

fn column_key(name: &str, config: &Configuration) -> String {
    if config.snake {
        naming::column_name(name)
    } else {
        naming::attribute_name(name)
    }
}

fn column(field: &Field, primary: bool, config: &Configuration) -> Prop {
    let mut props = vec![prop(
        "type",
        type_expr(field.data_type, config.dialect, "Sequelize"),
    )];
    if primary {
        props.push(prop("primaryKey", "true"));
    }
    if field.required || primary {
        props.push(prop("allowNull", "false"));
    }
    if field.unique {
        props.push(prop("unique", "true"));
    }
    prop(column_key(&field.name, config), object(&props, 6))
}

fn generated_column(name: &str, data_type: DataType, required: bool, config: &Configuration) -> Prop {
    let mut props = vec![prop("type", type_expr(data_type, config.dialect, "Sequelize"))];
    if required {
        props.push(prop("allowNull", "false"));
    }
    prop(column_key(name, config), object(&props, 6))
}

/// Renders the migration creating one model's table.
///
/// A model without a primary-key field gets an auto-increment integer `id`
/// column, matching the attribute Sequelize adds to such models. A generated
/// column (`id`, the timestamps, `deleted_at`) is left out when a user field
/// already has its name; the user field is rendered in its place.
#[must_use]
pub fn render(model: &Model, config: &Configuration) -> String {
    let names = ModelNames::new(model, config);
    let mut columns = Vec::with_capacity(model.fields.len() + 4);

    if needs_implicit_key(model) {
        let props = vec![
            prop("type", type_expr(DataType::Integer, config.dialect, "Sequelize")),
            prop("primaryKey", "true"),
            prop("autoIncrement", "true"),
            prop("allowNull", "false"),
        ];
        columns.push(prop("id", object(&props, 6)));
    }

    columns.extend(
        model
            .fields
            .iter()
            .map(|field| column(field, is_primary(field, model), config)),
    );

    let mut generated = Vec::new();
    if config.timestamps {
        generated.push(("created_at", true));
        generated.push(("updated_at", true));
    }
    if config.soft_deletes {
        generated.push(("deleted_at", false));
    }
    columns.extend(
        generated
            .into_iter()
            .filter(|(name, _)| !defines(model, name))
            .map(|(name, required)| generated_column(name, DataType::Date, required, config)),
    );

    let table = quoted(&names.table);
    format!(
        "'use strict'

module.exports = {{
  up: (queryInterface, Sequelize) => {{
    return queryInterface.createTable({table}, {columns})
  }},

  down: (queryInterface, Sequelize) => {{
    return queryInterface.dropTable({table})
  }}
}}
",
        columns = object(&columns, 4),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::{Dialect, FieldId, ModelId};

    fn field(id: u64, name: &str, data_type: DataType) -> Field {
        Field {
            id: FieldId::new(id),
            name: name.to_owned(),
            data_type,
            primary_key: false,
            required: false,
            unique: false,
        }
    }

    fn comment() -> Model {
        Model {
            id: ModelId::new(1),
            name: "Comment".to_owned(),
            fields: vec![Field {
                required: true,
                ..field(1, "authorName", DataType::String)
            }],
        }
    }

    #[test]
    fn test_render_default_config() {
        insta::assert_snapshot!(render(&comment(), &Configuration::default()), @r"
        'use strict'

        module.exports = {
          up: (queryInterface, Sequelize) => {
            return queryInterface.createTable('comments', {
              id: {
                type: Sequelize.INTEGER,
                primaryKey: true,
                autoIncrement: true,
                allowNull: false
              },
              authorName: {
                type: Sequelize.STRING,
                allowNull: false
              },
              createdAt: {
                type: Sequelize.DATE,
                allowNull: false
              },
              updatedAt: {
                type: Sequelize.DATE,
                allowNull: false
              }
            })
          },

          down: (queryInterface, Sequelize) => {
            return queryInterface.dropTable('comments')
          }
        }
        ");
    }

    #[test]
    fn test_snake_columns_and_soft_deletes() {
        let config = Configuration {
            snake: true,
            soft_deletes: true,
            ..Configuration::default()
        };
        let out = render(&comment(), &config);

        assert!(out.contains("author_name: {"));
        assert!(out.contains("created_at: {"));
        assert!(out.contains("updated_at: {"));
        assert!(out.contains("deleted_at: {\n        type: Sequelize.DATE\n      }"));
        assert!(!out.contains("authorName"));
    }

    #[test]
    fn test_timestamps_off() {
        let config = Configuration {
            timestamps: false,
            ..Configuration::default()
        };
        let out = render(&comment(), &config);
        assert!(!out.contains("createdAt"));
        assert!(!out.contains("updatedAt"));
    }

    #[test]
    fn test_explicit_primary_key_suppresses_id() {
        let model = Model {
            id: ModelId::new(1),
            name: "Country".to_owned(),
            fields: vec![Field {
                primary_key: true,
                ..field(1, "code", DataType::String)
            }],
        };
        let out = render(&model, &Configuration::default());
        assert!(!out.contains("autoIncrement"));
        assert!(out.contains("code: {\n        type: Sequelize.STRING,\n        primaryKey: true,\n        allowNull: false\n      }"));
        assert!(out.contains("createTable('countries'"));
    }

    #[test]
    fn test_user_fields_replace_generated_columns() {
        let model = Model {
            id: ModelId::new(1),
            name: "Post".to_owned(),
            fields: vec![
                field(1, "id", DataType::Uuid),
                field(2, "created_at", DataType::DateOnly),
                field(3, "deletedAt", DataType::Date),
            ],
        };
        let config = Configuration {
            soft_deletes: true,
            ..Configuration::default()
        };
        let out = render(&model, &config);

        for key in ["id: {", "createdAt: {", "updatedAt: {", "deletedAt: {"] {
            assert_eq!(out.matches(key).count(), 1, "{key}");
        }
        assert!(out.contains("id: {\n        type: Sequelize.UUID,\n        primaryKey: true,\n        allowNull: false\n      }"));
        assert!(out.contains("createdAt: {\n        type: Sequelize.DATEONLY\n      }"));
        assert!(!out.contains("autoIncrement"));
    }

    #[test]
    fn test_id_field_stays_plain_beside_explicit_key() {
        let model = Model {
            id: ModelId::new(1),
            name: "Country".to_owned(),
            fields: vec![
                Field {
                    primary_key: true,
                    ..field(1, "code", DataType::String)
                },
                field(2, "id", DataType::Integer),
            ],
        };
        let out = render(&model, &Configuration::default());
        assert_eq!(out.matches("primaryKey: true").count(), 1);
        assert!(out.contains("id: {\n        type: Sequelize.INTEGER\n      }"));
    }

    #[test]
    fn test_dialect_types() {
        let model = Model {
            id: ModelId::new(1),
            name: "Event".to_owned(),
            fields: vec![field(1, "tags", DataType::Array), field(2, "payload", DataType::Json)],
        };
        let config = Configuration {
            dialect: Dialect::Postgres,
            ..Configuration::default()
        };
        let out = render(&model, &config);
        assert!(out.contains("type: Sequelize.ARRAY(Sequelize.TEXT)"));
        assert!(out.contains("type: Sequelize.JSONB"));

        let out = render(&model, &Configuration::default());
        assert!(out.contains("type: Sequelize.JSON\n"));
        assert!(!out.contains("ARRAY"));
    }
}
