//! Model definition files (`models/<name>.model.js`).

use ms_core::{Configuration, Field, Model, naming};

use super::{ModelNames, Prop, is_primary, object, prop, quoted};
use crate::typemap::type_expr;

fn attribute(field: &Field, primary: bool, config: &Configuration) -> Prop {
    let mut props = vec![prop(
        "type",
        type_expr(field.data_type, config.dialect, "DataTypes"),
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
    if config.snake {
        props.push(prop("field", quoted(&naming::column_name(&field.name))));
    }
    prop(naming::attribute_name(&field.name), object(&props, 4))
}

/// Renders the `sequelize.define` module of one model.
///
/// The table name is always set explicitly so Sequelize never re-derives it.
#[must_use]
pub fn render(model: &Model, config: &Configuration) -> String {
    let names = ModelNames::new(model, config);

    let attributes: Vec<Prop> = model
        .fields
        .iter()
        .map(|field| attribute(field, is_primary(field, model), config))
        .collect();

    let mut options = vec![
        prop("tableName", quoted(&names.table)),
        prop("timestamps", config.timestamps.to_string()),
    ];
    if config.snake {
        options.push(prop("underscored", "true"));
    }
    if config.soft_deletes {
        options.push(prop("paranoid", "true"));
    }

    let class = &names.class;
    format!(
        "'use strict'

module.exports = (sequelize, DataTypes) => {{
  const {class} = sequelize.define({name}, {attributes}, {options})

  {class}.associate = function (models) {{
    // associations can be defined here
  }}

  return {class}
}}
",
        name = quoted(class),
        attributes = object(&attributes, 2),
        options = object(&options, 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::{DataType, Dialect, FieldId, ModelId};

    fn post() -> Model {
        Model {
            id: ModelId::new(1),
            name: "blog_post".to_owned(),
            fields: vec![
                Field {
                    id: FieldId::new(1),
                    name: "slug".to_owned(),
                    data_type: DataType::String,
                    primary_key: true,
                    required: false,
                    unique: true,
                },
                Field {
                    id: FieldId::new(2),
                    name: "published_at".to_owned(),
                    data_type: DataType::Date,
                    primary_key: false,
                    required: false,
                    unique: false,
                },
            ],
        }
    }

    #[test]
    fn test_render_default_config() {
        insta::assert_snapshot!(render(&post(), &Configuration::default()), @r"
        'use strict'

        module.exports = (sequelize, DataTypes) => {
          const BlogPost = sequelize.define('BlogPost', {
            slug: {
              type: DataTypes.STRING,
              primaryKey: true,
              allowNull: false,
              unique: true
            },
            publishedAt: {
              type: DataTypes.DATE
            }
          }, {
            tableName: 'blog_posts',
            timestamps: true
          })

          BlogPost.associate = function (models) {
            // associations can be defined here
          }

          return BlogPost
        }
        ");
    }

    #[test]
    fn test_render_snake_and_paranoid() {
        let config = Configuration {
            snake: true,
            soft_deletes: true,
            timestamps: false,
            dialect: Dialect::Postgres,
            ..Configuration::default()
        };
        let out = render(&post(), &config);

        assert!(out.contains("field: 'published_at'"));
        assert!(out.contains("field: 'slug'"));
        assert!(out.contains("underscored: true"));
        assert!(out.contains("paranoid: true"));
        assert!(out.contains("timestamps: false"));
    }

    #[test]
    fn test_render_without_fields() {
        let model = Model {
            id: ModelId::new(3),
            name: "Tag".to_owned(),
            fields: Vec::new(),
        };
        let out = render(&model, &Configuration::default());
        assert!(out.contains("const Tag = sequelize.define('Tag', {}, {"));
        assert!(out.contains("tableName: 'tags'"));
    }

    #[test]
    fn test_field_named_id_becomes_primary_key() {
        let mut model = post();
        model.fields[0].primary_key = false;
        model.fields[1].name = "Id".to_owned();
        let out = render(&model, &Configuration::default());
        assert!(out.contains("id: {\n      type: DataTypes.DATE,\n      primaryKey: true,\n      allowNull: false\n    }"));
        assert!(out.contains("slug: {\n      type: DataTypes.STRING,\n      unique: true\n    }"));
    }

    #[test]
    fn test_ids_do_not_leak() {
        let mut model = post();
        let before = render(&model, &Configuration::default());
        model.id = ModelId::new(99);
        model.fields[0].id = FieldId::new(42);
        assert_eq!(render(&model, &Configuration::default()), before);
    }
}
