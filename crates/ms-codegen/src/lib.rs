//! Sequelize project generator for modelsmith.
//!
//! [`generate`] turns validated models plus the project [`Configuration`]
//! into a [`Directory`] tree of source files:
//!
//! ```text
//! <project>/
//!   config/config.json
//!   migrations/0001-create-<table>.js   one per model, registry order
//!   models/<model>.model.js             one per model, registry order
//!   models/index.js
//!   .gitignore
//!   package.json
//! ```
//!
//! Output is a pure function of its inputs: model and field ids, drafts, and
//! error state never reach a template, and ordering follows the registry, so
//! an unchanged registry regenerates byte-identical files. Every path segment
//! derives from a normalized key, and normalized keys are unique among
//! validated models, so paths never collide.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
pub mod render;
mod tree;
pub mod typemap;

pub use error::GenerateError;
pub use render::ModelNames;
pub use tree::{Directory, File, Node};

use ms_core::{Configuration, ValidatedModels};
use tracing::{debug, info};

/// Renders the complete project tree, rooted at a directory named after the
/// project in kebab case. Separators and dots in the name never reach the
/// root name, so it is always one path segment.
///
/// # Examples
///
/// ```
/// use ms_codegen::generate;
/// use ms_core::{Configuration, Model, ModelId, ValidatedModels};
///
/// let models = ValidatedModels::check(&[Model {
///     id: ModelId::new(1),
///     name: "Post".to_owned(),
///     fields: Vec::new(),
/// }])
/// .unwrap();
///
/// let root = generate(&models, &Configuration::default())?;
/// assert_eq!(root.name, "my-project");
/// assert!(root.file("models/post.model.js").is_some());
/// assert!(root.file("migrations/0001-create-posts.js").is_some());
/// # Ok::<(), ms_codegen::GenerateError>(())
/// ```
pub fn generate(
    models: &ValidatedModels,
    config: &Configuration,
) -> Result<Directory, GenerateError> {
    let mut root = Directory::new(render::package::project_slug(config));

    let mut config_dir = Directory::new("config");
    config_dir.push_file(File::new("config.json", render::config::render(config)?));
    root.push_dir(config_dir);

    let mut migrations = Directory::new("migrations");
    let mut model_dir = Directory::new("models");
    for (position, model) in models.iter().enumerate() {
        let names = ModelNames::new(model, config);

        let migration = names.migration_file(position + 1);
        debug!(model = %model.name, file = %migration, "Rendering migration");
        migrations.push_file(File::new(migration, render::migration::render(model, config)));

        let definition = names.model_file();
        debug!(model = %model.name, file = %definition, "Rendering model");
        model_dir.push_file(File::new(definition, render::model::render(model, config)));
    }
    model_dir.push_file(File::new(
        "index.js",
        render::index::render(models.models(), config),
    ));
    root.push_dir(migrations);
    root.push_dir(model_dir);

    root.push_file(File::new(".gitignore", render::package::render_gitignore(config)));
    root.push_file(File::new("package.json", render::package::render(config)?));

    info!(
        project = %root.name,
        models = models.len(),
        files = root.file_count(),
        dialect = %config.dialect,
        "Generated project"
    );
    Ok(root)
}
