//! CLI entry point for modelsmith.
//!
//! This binary drives the model registry from the command line: it edits a
//! project file, previews the generated Sequelize project, and exports it as
//! a zip archive.
//!
//! # Usage
//!
//! ```bash
//! modelsmith [OPTIONS] <COMMAND>
//!
//! # Start a project and describe a model
//! modelsmith init --name blog --dialect postgres
//! modelsmith model add Post
//! modelsmith field add Post title string --required
//!
//! # Inspect and export
//! modelsmith preview --file models/post.model.js
//! modelsmith export --output dist
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use color_eyre::Section;
use color_eyre::eyre::{WrapErr, eyre};
use ms_codegen::{ModelNames, generate};
use ms_core::naming::MAX_NAME_LENGTH;
use ms_core::{
    ConfigError, Configuration, DataType, Dialect, ErrorCode, FieldId, FieldInput, Model, Violation,
};
use ms_registry::{ModelDraft, Registry, RegistryError, Rejection, Snapshot};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Describe database models and generate a Sequelize project from them.
#[derive(Parser)]
#[command(name = "modelsmith", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the project file.
    #[arg(
        short,
        long,
        global = true,
        env = "MODELSMITH_PROJECT",
        default_value = "modelsmith.json"
    )]
    project: Utf8PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create an empty project file.
    Init {
        /// Project name.
        #[arg(long)]
        name: Option<String>,

        /// Target database dialect.
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Overwrite an existing project file.
        #[arg(long)]
        force: bool,
    },

    /// Show or change the generation settings.
    Config(ConfigArgs),

    /// Manage models.
    #[command(subcommand)]
    Model(ModelCommand),

    /// Manage the fields of a model.
    #[command(subcommand)]
    Field(FieldCommand),

    /// Check that every model and field can be exported.
    Validate,

    /// Print the generated project files.
    Preview {
        /// Print only this file (path relative to the project root).
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Generate the project and write it as a zip archive.
    Export {
        /// Directory to write the archive into.
        #[arg(short, long, default_value = ".")]
        output: Utf8PathBuf,
    },
}

/// Generation settings; omitted options are left unchanged.
#[derive(Args)]
struct ConfigArgs {
    /// Add createdAt/updatedAt columns.
    #[arg(long)]
    timestamps: Option<bool>,

    /// Use snake case column names.
    #[arg(long)]
    snake: Option<bool>,

    /// Add a deletedAt column and mark models paranoid.
    #[arg(long)]
    soft_deletes: Option<bool>,

    /// Keep table names singular.
    #[arg(long)]
    singular_table_names: Option<bool>,

    /// Target database dialect.
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Project name.
    #[arg(long)]
    name: Option<String>,
}

/// Model subcommands.
#[derive(Subcommand)]
enum ModelCommand {
    /// Add a model.
    Add {
        /// Model name.
        name: String,
    },

    /// Rename a model.
    Rename {
        /// Current model name.
        model: String,
        /// New model name.
        new_name: String,
    },

    /// Delete a model and its fields.
    Rm {
        /// Model name.
        model: String,
    },

    /// List all models.
    List,

    /// Show a model and its fields.
    Show {
        /// Model name.
        model: String,
    },
}

/// Field subcommands.
#[derive(Subcommand)]
enum FieldCommand {
    /// Add a field to a model.
    Add {
        /// Model name.
        model: String,
        /// Field name.
        name: String,
        /// Data type (string, text, integer, date-only, json, ...).
        data_type: DataType,
        /// Mark the field as primary key.
        #[arg(long)]
        primary_key: bool,
        /// Disallow null values.
        #[arg(long)]
        required: bool,
        /// Add a unique constraint.
        #[arg(long)]
        unique: bool,
    },

    /// Change a field; omitted options are left unchanged.
    Update {
        /// Model name.
        model: String,
        /// Field name.
        field: String,
        /// New field name.
        #[arg(long)]
        name: Option<String>,
        /// New data type.
        #[arg(long = "type")]
        data_type: Option<DataType>,
        /// Primary key flag.
        #[arg(long)]
        primary_key: Option<bool>,
        /// Required flag.
        #[arg(long)]
        required: Option<bool>,
        /// Unique flag.
        #[arg(long)]
        unique: Option<bool>,
    },

    /// Remove a field from a model.
    Rm {
        /// Model name.
        model: String,
        /// Field name.
        field: String,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// =============================================================================
// PROJECT FILE
// =============================================================================

/// Loads the registry from the project file.
fn load(path: &Utf8Path) -> color_eyre::Result<Registry> {
    match Snapshot::load(path) {
        Ok(snapshot) => Ok(Registry::restore(snapshot)),
        Err(e @ ConfigError::MissingFile(_)) => {
            Err(e).suggestion("Run `modelsmith init` to create a project file")
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes the registry back to the project file.
fn save(registry: &Registry, path: &Utf8Path) -> color_eyre::Result<()> {
    registry.snapshot().save(path)?;
    Ok(())
}

/// Finds a committed model by name.
fn find_model<'a>(registry: &'a Registry, name: &str) -> color_eyre::Result<&'a Model> {
    registry
        .model_named(name)
        .ok_or_else(|| eyre!("No model named '{name}'"))
}

/// Opens an editing session on the model named `name`.
fn open_draft(registry: &Registry, name: &str) -> color_eyre::Result<ModelDraft> {
    let id = find_model(registry, name)?.id;
    Ok(registry.edit_model(id)?)
}

/// Finds a field of the model under edit by name.
fn find_field(draft: &ModelDraft, name: &str) -> color_eyre::Result<FieldId> {
    draft
        .field_named(name)
        .and_then(|field| field.value().id)
        .ok_or_else(|| eyre!("Model '{}' has no field named '{name}'", draft.name()))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Creates the project file.
fn run_init(
    path: &Utf8Path,
    name: Option<String>,
    dialect: Option<Dialect>,
    force: bool,
) -> color_eyre::Result<()> {
    let mut config = Configuration::default();
    if let Some(name) = name {
        config.name = name;
    }
    if let Some(dialect) = dialect {
        config.dialect = dialect;
    }

    let snapshot = Registry::new(config).snapshot();
    if force {
        snapshot.save(path)?;
    } else {
        snapshot.save_new(path)?;
    }
    info!(path = %path, "Initialized project");
    Ok(())
}

/// Applies configuration changes and prints the resulting settings.
fn run_config(path: &Utf8Path, args: ConfigArgs) -> color_eyre::Result<()> {
    let mut registry = load(path)?;
    let config = registry.config_mut();

    let mut changed = false;
    let mut set = |slot: &mut bool, value: Option<bool>| {
        if let Some(value) = value {
            *slot = value;
            changed = true;
        }
    };
    set(&mut config.timestamps, args.timestamps);
    set(&mut config.snake, args.snake);
    set(&mut config.soft_deletes, args.soft_deletes);
    set(&mut config.singular_table_names, args.singular_table_names);
    if let Some(dialect) = args.dialect {
        config.dialect = dialect;
        changed = true;
    }
    if let Some(name) = args.name {
        config.name = name;
        changed = true;
    }

    if changed {
        save(&registry, path)?;
        info!(path = %path, "Updated configuration");
    }

    let json = serde_json::to_string_pretty(registry.config())?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}")?;
    Ok(())
}

fn run_model(path: &Utf8Path, command: ModelCommand) -> color_eyre::Result<()> {
    let mut registry = load(path)?;

    match command {
        ModelCommand::Add { name } => {
            let mut draft = registry.new_model_draft();
            draft.set_name(&name, registry.models());
            let model = registry
                .create_model(&mut draft)
                .map_err(|e| report(e, &draft))?;
            save(&registry, path)?;
            print_line(&format!("Created model {}", model.name));
        }
        ModelCommand::Rename { model, new_name } => {
            let mut draft = open_draft(&registry, &model)?;
            draft.set_name(&new_name, registry.models());
            let renamed = registry
                .update_model(&mut draft)
                .map_err(|e| report(e, &draft))?;
            save(&registry, path)?;
            print_line(&format!("Renamed model {model} to {}", renamed.name));
        }
        ModelCommand::Rm { model } => {
            let id = find_model(&registry, &model)?.id;
            if let Some(removed) = registry.delete_model(id) {
                save(&registry, path)?;
                print_line(&format!(
                    "Deleted model {} ({} fields)",
                    removed.name,
                    removed.fields.len()
                ));
            }
        }
        ModelCommand::List => print_models(&registry),
        ModelCommand::Show { model } => {
            let model = find_model(&registry, &model)?;
            print_model(model, registry.config());
        }
    }
    Ok(())
}

fn run_field(path: &Utf8Path, command: FieldCommand) -> color_eyre::Result<()> {
    let mut registry = load(path)?;

    match command {
        FieldCommand::Add {
            model,
            name,
            data_type,
            primary_key,
            required,
            unique,
        } => {
            let mut draft = open_draft(&registry, &model)?;
            draft.edit_new_field(|field| {
                *field = FieldInput::new(name, Some(data_type))
                    .primary_key(primary_key)
                    .required(required)
                    .unique(unique);
            });
            registry
                .create_field(&mut draft)
                .map_err(|e| report(e, &draft))?;
            let committed = registry
                .update_model(&mut draft)
                .map_err(|e| report(e, &draft))?;
            save(&registry, path)?;
            if let Some(field) = committed.fields.last() {
                print_line(&format!(
                    "Added field {}.{} ({})",
                    committed.name, field.name, field.data_type
                ));
            }
        }
        FieldCommand::Update {
            model,
            field,
            name,
            data_type,
            primary_key,
            required,
            unique,
        } => {
            let mut draft = open_draft(&registry, &model)?;
            let id = find_field(&draft, &field)?;
            draft
                .update_field(id, |input| {
                    if let Some(name) = name {
                        input.name = name;
                    }
                    if data_type.is_some() {
                        input.data_type = data_type;
                    }
                    if let Some(value) = primary_key {
                        input.primary_key = value;
                    }
                    if let Some(value) = required {
                        input.required = value;
                    }
                    if let Some(value) = unique {
                        input.unique = value;
                    }
                })
                .map_err(|e| report(e, &draft))?;
            let committed = registry
                .update_model(&mut draft)
                .map_err(|e| report(e, &draft))?;
            save(&registry, path)?;
            if let Some(updated) = committed.field(id) {
                print_line(&format!("Updated field {}.{}", committed.name, updated.name));
            }
        }
        FieldCommand::Rm { model, field } => {
            let mut draft = open_draft(&registry, &model)?;
            let id = find_field(&draft, &field)?;
            draft.delete_field(id)?;
            let committed = registry
                .update_model(&mut draft)
                .map_err(|e| report(e, &draft))?;
            save(&registry, path)?;
            print_line(&format!("Removed field {}.{field}", committed.name));
        }
    }
    Ok(())
}

/// Runs the export check and lists everything that blocks it.
fn run_validate(path: &Utf8Path) -> color_eyre::Result<()> {
    let registry = load(path)?;
    let models = registry
        .export()
        .map_err(|e| report_blocked(e, &registry))?;
    print_line(&format!("{} models ready to export", models.len()));
    Ok(())
}

/// Prints every generated file, or a single one.
fn run_preview(path: &Utf8Path, file: Option<&str>) -> color_eyre::Result<()> {
    let registry = load(path)?;
    let models = registry
        .export()
        .map_err(|e| report_blocked(e, &registry))?;
    let root = generate(&models, registry.config())?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if let Some(wanted) = file {
        let file = root
            .file(wanted)
            .ok_or_else(|| eyre!("No generated file at '{wanted}'"))?;
        write!(handle, "{}", file.content)?;
        return Ok(());
    }

    for (path, file) in root.files() {
        writeln!(handle, "==> {}/{path} <==", root.name)?;
        write!(handle, "{}", file.content)?;
        writeln!(handle)?;
    }
    Ok(())
}

/// Generates the project, packs it off the async workers and writes the
/// archive.
async fn run_export(path: &Utf8Path, output: &Utf8Path) -> color_eyre::Result<()> {
    let registry = load(path)?;
    let models = registry
        .export()
        .map_err(|e| report_blocked(e, &registry))?;
    let root = generate(&models, registry.config())?;

    let target = output.join(ms_archive::archive_name(&root));
    let bytes = ms_archive::pack_async(root).await?;

    tokio::fs::create_dir_all(output)
        .await
        .wrap_err_with(|| format!("Failed to create {output}"))?;
    tokio::fs::write(&target, &bytes)
        .await
        .wrap_err_with(|| format!("Failed to write {target}"))?;

    info!(path = %target, bytes = bytes.len(), "Archive written");
    print_line(&format!("Wrote {target}"));
    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// What a validation message is about.
#[derive(Clone, Copy)]
enum Subject {
    Model,
    Field,
}

/// Human-readable text for a validation error.
fn message(code: ErrorCode, subject: Subject) -> String {
    match (code, subject) {
        (ErrorCode::UniqueName, Subject::Model) => "another model already uses this name".to_owned(),
        (ErrorCode::UniqueName, Subject::Field) => {
            "another field of this model already uses this name".to_owned()
        }
        (ErrorCode::NameFormat, _) => {
            "name must start with a letter or '_' and contain only letters, digits and '_'"
                .to_owned()
        }
        (ErrorCode::RequiredName, _) => "name is required".to_owned(),
        (ErrorCode::NameLength, Subject::Model) => {
            format!("table name must be at most {MAX_NAME_LENGTH} characters")
        }
        (ErrorCode::NameLength, Subject::Field) => {
            format!("column name must be at most {MAX_NAME_LENGTH} characters")
        }
        (ErrorCode::RequiredType, _) => "data type is required".to_owned(),
    }
}

/// Prints a rejected draft's errors and converts the error into a report.
fn report(err: RegistryError, draft: &ModelDraft) -> color_eyre::Report {
    if let Some(rejection) = err.rejection() {
        print_rejection(rejection, draft);
    }
    err.into()
}

/// Prints the violations blocking an export and converts the error into a
/// report.
fn report_blocked(err: RegistryError, registry: &Registry) -> color_eyre::Report {
    if let RegistryError::ExportBlocked { violations } = &err {
        print_violations(violations, registry);
    }
    err.into()
}

fn print_rejection(rejection: &Rejection, draft: &ModelDraft) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();

    for code in &rejection.model {
        let _ = writeln!(
            handle,
            "  model '{}': {}",
            draft.name(),
            message(code, Subject::Model)
        );
    }
    for rejected in &rejection.fields {
        let field = rejected
            .field
            .and_then(|id| draft.field(id))
            .unwrap_or_else(|| draft.new_field());
        for code in &rejected.errors {
            let _ = writeln!(
                handle,
                "  field '{}': {}",
                field.value().name,
                message(code, Subject::Field)
            );
        }
    }
}

fn print_violations(violations: &[Violation], registry: &Registry) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();

    for violation in violations {
        let model = registry.model(violation.model);
        let model_name = model.map_or("?", |m| m.name.as_str());
        match violation.field {
            None => {
                for code in &violation.errors {
                    let _ = writeln!(
                        handle,
                        "  model '{model_name}': {}",
                        message(code, Subject::Model)
                    );
                }
            }
            Some(id) => {
                let field_name = model
                    .and_then(|m| m.field(id))
                    .map_or("?", |f| f.name.as_str());
                for code in &violation.errors {
                    let _ = writeln!(
                        handle,
                        "  field '{model_name}.{field_name}': {}",
                        message(code, Subject::Field)
                    );
                }
            }
        }
    }
}

fn print_line(line: &str) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{line}");
}

/// Prints one line per model: name, table and field count.
fn print_models(registry: &Registry) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if registry.is_empty() {
        let _ = writeln!(handle, "No models");
        return;
    }
    for model in registry.models() {
        let names = ModelNames::new(model, registry.config());
        let _ = writeln!(
            handle,
            "{:<24} table {:<24} {} fields",
            model.name,
            names.table,
            model.fields.len()
        );
    }
}

fn print_model(model: &Model, config: &Configuration) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let names = ModelNames::new(model, config);

    let _ = writeln!(handle, "{}", model.name);
    let _ = writeln!(handle, "  class:  {}", names.class);
    let _ = writeln!(handle, "  table:  {}", names.table);
    let _ = writeln!(handle, "  file:   models/{}", names.model_file());
    let _ = writeln!(handle);

    if model.fields.is_empty() {
        let _ = writeln!(handle, "  (no fields)");
        return;
    }
    for field in &model.fields {
        let mut flags = Vec::new();
        if field.primary_key {
            flags.push("primary key");
        }
        if field.required {
            flags.push("required");
        }
        if field.unique {
            flags.push("unique");
        }
        let _ = writeln!(
            handle,
            "  {:<24} {:<10} {}",
            field.name,
            field.data_type.tag(),
            flags.join(", ")
        );
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);

    let path = cli.project.as_path();
    match cli.command {
        Commands::Init {
            name,
            dialect,
            force,
        } => run_init(path, name, dialect, force),
        Commands::Config(args) => run_config(path, args),
        Commands::Model(command) => run_model(path, command),
        Commands::Field(command) => run_field(path, command),
        Commands::Validate => run_validate(path),
        Commands::Preview { file } => run_preview(path, file.as_deref()),
        Commands::Export { output } => run_export(path, &output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_add() {
        let cli = Cli::try_parse_from([
            "modelsmith",
            "--project",
            "shop.json",
            "field",
            "add",
            "Order",
            "placed_on",
            "date-only",
            "--required",
        ])
        .unwrap();

        assert_eq!(cli.project, "shop.json");
        match cli.command {
            Commands::Field(FieldCommand::Add {
                data_type,
                required,
                unique,
                ..
            }) => {
                assert_eq!(data_type, DataType::DateOnly);
                assert!(required);
                assert!(!unique);
            }
            _ => panic!("expected field add"),
        }
    }

    #[test]
    fn test_parse_config_flags() {
        let cli = Cli::try_parse_from([
            "modelsmith",
            "config",
            "--snake",
            "true",
            "--dialect",
            "postgresql",
        ])
        .unwrap();

        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.snake, Some(true));
                assert_eq!(args.timestamps, None);
                assert_eq!(args.dialect, Some(Dialect::Postgres));
            }
            _ => panic!("expected config"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result =
            Cli::try_parse_from(["modelsmith", "field", "add", "Order", "total", "money"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_messages_mention_limit() {
        let text = message(ErrorCode::NameLength, Subject::Model);
        assert!(text.contains(&MAX_NAME_LENGTH.to_string()));
        assert_ne!(
            message(ErrorCode::UniqueName, Subject::Model),
            message(ErrorCode::UniqueName, Subject::Field)
        );
    }
}
