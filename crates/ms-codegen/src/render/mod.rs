//! One render function per generated file kind.
//!
//! Every renderer is a pure function of its inputs and returns the file
//! content as a `String`. Shared JavaScript formatting lives here.

pub mod config;
pub mod index;
pub mod migration;
pub mod model;
pub mod package;

use ms_core::{Configuration, Field, Model, naming};

/// Every casing of one model's name used by the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNames {
    /// Class case: `BlogPost`.
    pub class: String,
    /// Table name, plural unless configured singular: `blog_posts`.
    pub table: String,
    /// Model file stem: `blog-post`.
    pub file_stem: String,
}

impl ModelNames {
    /// Derives all casings from the model's normalized key.
    #[must_use]
    pub fn new(model: &Model, config: &Configuration) -> Self {
        Self {
            class: naming::class_name(&model.name),
            table: naming::table_name(&model.name, config.singular_table_names),
            file_stem: naming::file_stem(&model.name),
        }
    }

    /// File name of the model definition.
    #[must_use]
    pub fn model_file(&self) -> String {
        format!("{}.model.js", self.file_stem)
    }

    /// File name of the migration at 1-based `position`.
    #[must_use]
    pub fn migration_file(&self, position: usize) -> String {
        format!("{position:04}-create-{}.js", self.table.replace('_', "-"))
    }
}

/// Key of the primary key Sequelize adds to a model that declares none.
const IMPLICIT_KEY: &str = "id";

/// Returns `true` if a user field of `model` normalizes to `key`.
///
/// Such a field takes the place of the generated column of the same name.
pub(crate) fn defines(model: &Model, key: &str) -> bool {
    model
        .fields
        .iter()
        .any(|field| naming::normalize(&field.name) == key)
}

/// Returns `true` if `field` is rendered as a primary key.
///
/// In a model without a primary-key field, a field named `id` becomes the key.
/// Sequelize rejects a non-key `id` attribute on such a model.
pub(crate) fn is_primary(field: &Field, model: &Model) -> bool {
    field.primary_key
        || (!model.has_primary_key() && naming::normalize(&field.name) == IMPLICIT_KEY)
}

/// Returns `true` if the migration needs the auto-increment `id` column.
pub(crate) fn needs_implicit_key(model: &Model) -> bool {
    !model.has_primary_key() && !defines(model, IMPLICIT_KEY)
}

/// A JavaScript object literal property.
pub(crate) type Prop = (String, String);

pub(crate) fn prop(key: impl Into<String>, value: impl Into<String>) -> Prop {
    (key.into(), value.into())
}

pub(crate) fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Renders an object literal whose closing brace sits at `indent` spaces.
///
/// Properties go one per line, two spaces deeper, without trailing comma.
pub(crate) fn object(props: &[Prop], indent: usize) -> String {
    if props.is_empty() {
        return "{}".to_owned();
    }

    let pad = " ".repeat(indent + 2);
    let lines: Vec<String> = props
        .iter()
        .map(|(key, value)| format!("{pad}{key}: {value}"))
        .collect();
    format!("{{\n{}\n{}}}", lines.join(",\n"), " ".repeat(indent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_core::{DataType, FieldId, ModelId};

    fn model(name: &str) -> Model {
        Model {
            id: ModelId::new(1),
            name: name.to_owned(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_model_names() {
        let names = ModelNames::new(&model("blogCategory"), &Configuration::default());
        assert_eq!(names.class, "BlogCategory");
        assert_eq!(names.table, "blog_categories");
        assert_eq!(names.model_file(), "blog-category.model.js");
        assert_eq!(names.migration_file(3), "0003-create-blog-categories.js");

        let config = Configuration {
            singular_table_names: true,
            ..Configuration::default()
        };
        let names = ModelNames::new(&model("blogCategory"), &config);
        assert_eq!(names.table, "blog_category");
        assert_eq!(names.migration_file(12), "0012-create-blog-category.js");
    }

    #[test]
    fn test_object_layout() {
        let props = vec![prop("type", "DataTypes.STRING"), prop("allowNull", "false")];
        insta::assert_snapshot!(object(&props, 4), @r"
        {
              type: DataTypes.STRING,
              allowNull: false
            }
        ");
        assert_eq!(object(&[], 2), "{}");
    }

    #[test]
    fn test_field_named_id_takes_implicit_key() {
        let mut post = model("post");
        let field = |id: u64, name: &str, data_type: DataType| Field {
            id: FieldId::new(id),
            name: name.to_owned(),
            data_type,
            primary_key: false,
            required: false,
            unique: false,
        };
        post.fields = vec![
            field(1, "ID", DataType::Uuid),
            field(2, "created_at", DataType::Date),
        ];
        assert!(is_primary(&post.fields[0], &post));
        assert!(!needs_implicit_key(&post));
        assert!(defines(&post, "created_at"));
        assert!(!defines(&post, "updated_at"));

        post.fields[1].primary_key = true;
        assert!(!is_primary(&post.fields[0], &post));
        assert!(!needs_implicit_key(&post));
        assert!(needs_implicit_key(&model("tag")));
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("posts"), "'posts'");
        assert_eq!(quoted("it's"), r"'it\'s'");
    }
}
