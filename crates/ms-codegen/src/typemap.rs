//! Per-dialect mapping of [`DataType`]s to Sequelize type expressions.

use ms_core::{DataType, Dialect};

/// A Sequelize type, before the namespace prefix is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Plain(&'static str),
    ArrayOf(&'static str),
}

fn token(data_type: DataType, dialect: Dialect) -> Token {
    use DataType as T;
    use Dialect as D;

    match (data_type, dialect) {
        (T::Array, D::Postgres) => Token::ArrayOf("TEXT"),
        (T::Array | T::Json, D::Sqlite | D::Mysql | D::Mariadb) => Token::Plain("JSON"),
        (T::Array | T::Json, D::Mssql) => Token::Plain("TEXT"),
        (T::Json, D::Postgres) => Token::Plain("JSONB"),
        (T::Real, D::Mysql | D::Mariadb) => Token::Plain("FLOAT"),
        (other, _) => Token::Plain(other.tag()),
    }
}

/// Renders the type expression of `data_type` for `dialect`.
///
/// `namespace` is the object the types hang off: `DataTypes` inside model
/// definitions, `Sequelize` inside migrations.
///
/// # Examples
///
/// ```
/// use ms_codegen::typemap::type_expr;
/// use ms_core::{DataType, Dialect};
///
/// assert_eq!(type_expr(DataType::String, Dialect::Sqlite, "DataTypes"), "DataTypes.STRING");
/// assert_eq!(
///     type_expr(DataType::Array, Dialect::Postgres, "Sequelize"),
///     "Sequelize.ARRAY(Sequelize.TEXT)"
/// );
/// assert_eq!(type_expr(DataType::Json, Dialect::Postgres, "DataTypes"), "DataTypes.JSONB");
/// ```
#[must_use]
pub fn type_expr(data_type: DataType, dialect: Dialect, namespace: &str) -> String {
    match token(data_type, dialect) {
        Token::Plain(name) => format!("{namespace}.{name}"),
        Token::ArrayOf(inner) => format!("{namespace}.ARRAY({namespace}.{inner})"),
    }
}
