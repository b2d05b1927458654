//! End-to-end tests: registry edits through generation to a packed archive.

use std::io::{Cursor, Read};

use camino::Utf8Path;
use ms_core::{Configuration, DataType, Dialect, ErrorCode, FieldInput, Model, ModelId};
use ms_registry::{Registry, RegistryError, Snapshot};
use zip::ZipArchive;

fn add_model(registry: &mut Registry, name: &str, fields: &[(&str, DataType)]) -> Model {
    let mut draft = registry.new_model_draft();
    draft.set_name(name, registry.models());
    for (field, data_type) in fields {
        draft.edit_new_field(|input| {
            *input = FieldInput::new(*field, Some(*data_type)).required(true);
        });
        registry.create_field(&mut draft).unwrap();
    }
    registry.create_model(&mut draft).unwrap()
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[tokio::test]
async fn test_registry_to_archive() {
    let mut registry = Registry::new(Configuration {
        name: "blog".to_owned(),
        dialect: Dialect::Postgres,
        ..Configuration::default()
    });
    add_model(
        &mut registry,
        "BlogPost",
        &[("title", DataType::String), ("body", DataType::Text)],
    );
    add_model(&mut registry, "tag", &[("label", DataType::String)]);

    let models = registry.export().unwrap();
    let root = ms_codegen::generate(&models, registry.config()).unwrap();
    assert_eq!(ms_archive::archive_name(&root), "blog.zip");

    let expected_files = root.file_count();
    let bytes = ms_archive::pack_async(root).await.unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    let files: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_owned())
        .filter(|name| !name.ends_with('/'))
        .collect();
    assert_eq!(files.len(), expected_files);
    assert_eq!(
        files,
        [
            "blog/config/config.json",
            "blog/migrations/0001-create-blog-posts.js",
            "blog/migrations/0002-create-tags.js",
            "blog/models/blog-post.model.js",
            "blog/models/tag.model.js",
            "blog/models/index.js",
            "blog/.gitignore",
            "blog/package.json",
        ]
    );

    let model = read_entry(&mut archive, "blog/models/blog-post.model.js");
    assert!(model.contains("'BlogPost'"));
    assert!(model.contains("tableName: 'blog_posts'"));

    let package = read_entry(&mut archive, "blog/package.json");
    assert!(package.contains("\"pg\""));
}

#[test]
fn test_project_name_with_path_separators_packs() {
    for (name, root_name) in [("acme/blog", "acme-blog"), ("../escape", "escape")] {
        let mut registry = Registry::new(Configuration {
            name: name.to_owned(),
            ..Configuration::default()
        });
        add_model(&mut registry, "Post", &[("title", DataType::String)]);

        let models = registry.export().unwrap();
        let root = ms_codegen::generate(&models, registry.config()).unwrap();
        assert_eq!(root.name, root_name);
        assert_eq!(ms_archive::archive_name(&root), format!("{root_name}.zip"));

        let bytes = ms_archive::pack(&root).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let prefix = format!("{root_name}/");
        for i in 0..archive.len() {
            assert!(archive.by_index(i).unwrap().name().starts_with(&prefix));
        }
    }
}

#[test]
fn test_export_is_byte_identical_for_unchanged_registry() {
    let mut registry = Registry::default();
    add_model(&mut registry, "User", &[("email", DataType::String)]);

    let pack = |registry: &Registry| {
        let models = registry.export().unwrap();
        let root = ms_codegen::generate(&models, registry.config()).unwrap();
        ms_archive::pack(&root).unwrap()
    };
    assert_eq!(pack(&registry), pack(&registry));
}

#[test]
fn test_restored_duplicates_block_export() {
    let snapshot = Snapshot {
        models: vec![
            Model {
                id: ModelId::new(1),
                name: "User".to_owned(),
                fields: Vec::new(),
            },
            Model {
                id: ModelId::new(2),
                name: "user".to_owned(),
                fields: Vec::new(),
            },
        ],
        next_model_id: 3,
        ..Snapshot::default()
    };

    let registry = Registry::restore(snapshot);
    match registry.export() {
        Err(RegistryError::ExportBlocked { violations }) => {
            assert_eq!(violations.len(), 2);
            assert!(
                violations
                    .iter()
                    .all(|v| v.errors.contains(ErrorCode::UniqueName))
            );
        }
        other => panic!("expected ExportBlocked, got {other:?}"),
    }
}

#[test]
fn test_project_file_round_trip_preserves_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8Path::from_path(dir.path()).unwrap().join("modelsmith.json");

    let mut registry = Registry::default();
    add_model(&mut registry, "OrderItem", &[("quantity", DataType::Integer)]);
    registry.snapshot().save_new(&path).unwrap();

    let restored = Registry::restore(Snapshot::load(&path).unwrap());
    let before = ms_codegen::generate(&registry.export().unwrap(), registry.config()).unwrap();
    let after = ms_codegen::generate(&restored.export().unwrap(), restored.config()).unwrap();
    assert_eq!(before, after);
}
