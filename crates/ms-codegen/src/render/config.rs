//! Database connection settings (`config/config.json`).
//!
//! One entry per environment, in the shape `sequelize-cli` reads. File-based
//! dialects get storage paths, server dialects get local connection defaults,
//! and production always reads its URL from `DATABASE_URL`.

use ms_core::{Configuration, Dialect};
use serde::Serialize;

use crate::error::GenerateError;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Environment<'a> {
    File {
        dialect: &'a str,
        storage: &'a str,
    },
    Server {
        username: &'a str,
        password: Option<&'a str>,
        database: String,
        host: &'a str,
        dialect: &'a str,
    },
    Url {
        use_env_variable: &'a str,
        dialect: &'a str,
    },
}

#[derive(Debug, Serialize)]
struct Environments<'a> {
    development: Environment<'a>,
    test: Environment<'a>,
    production: Environment<'a>,
}

fn default_username(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Postgres => "postgres",
        Dialect::Mssql => "sa",
        Dialect::Sqlite | Dialect::Mysql | Dialect::Mariadb => "root",
    }
}

/// Renders `config/config.json`.
pub fn render(config: &Configuration) -> Result<String, GenerateError> {
    let dialect = config.dialect.as_str();
    let key = super::package::project_key(config);

    let local = |env: &str, storage: &'static str| match config.dialect {
        Dialect::Sqlite => Environment::File { dialect, storage },
        _ => Environment::Server {
            username: default_username(config.dialect),
            password: None,
            database: format!("{key}_{env}"),
            host: "127.0.0.1",
            dialect,
        },
    };

    let environments = Environments {
        development: local("development", "db.development.sqlite"),
        test: local("test", ":memory:"),
        production: Environment::Url {
            use_env_variable: "DATABASE_URL",
            dialect,
        },
    };

    let mut json = serde_json::to_string_pretty(&environments)
        .map_err(|e| GenerateError::json("config/config.json", e))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_uses_storage() {
        let out = render(&Configuration::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["development"]["storage"], "db.development.sqlite");
        assert_eq!(json["test"]["storage"], ":memory:");
        assert_eq!(json["production"]["use_env_variable"], "DATABASE_URL");
        assert_eq!(json["production"]["dialect"], "sqlite");
    }

    #[test]
    fn test_server_dialect() {
        let config = Configuration {
            dialect: Dialect::Postgres,
            name: "Blog API".to_owned(),
            ..Configuration::default()
        };
        insta::assert_snapshot!(render(&config).unwrap(), @r#"
        {
          "development": {
            "username": "postgres",
            "password": null,
            "database": "blog_api_development",
            "host": "127.0.0.1",
            "dialect": "postgres"
          },
          "test": {
            "username": "postgres",
            "password": null,
            "database": "blog_api_test",
            "host": "127.0.0.1",
            "dialect": "postgres"
          },
          "production": {
            "use_env_variable": "DATABASE_URL",
            "dialect": "postgres"
          }
        }
        "#);
    }
}
