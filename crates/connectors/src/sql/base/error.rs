use model::core::direction::UnknownDirection;
use std::fmt;
use thiserror::Error;

/// What a catalog lookup was asked to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKind {
    Parameters,
    Columns,
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataKind::Parameters => f.write_str("parameters"),
            MetadataKind::Columns => f.write_str("columns"),
        }
    }
}

/// All errors coming from the metadata and statement layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any driver error, passed through untouched.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The server reported a type that has no entry in the type table.
    #[error("Type {0} is not supported")]
    UnsupportedType(String),

    /// The server reported a parameter mode outside IN/OUT/INOUT.
    #[error("Direction {0} is not supported")]
    UnsupportedDirection(String),

    /// A dotted object name with no qualifiers or more than three.
    #[error("Cannot resolve '{name}': expected 1 to 3 dot-separated qualifiers, got {count}")]
    UnsupportedQualifierArity { name: String, count: usize },

    /// The catalog returned nothing for the object.
    #[error("Cannot read list of {kind} for {name} - check spelling and access privileges")]
    NotFound { kind: MetadataKind, name: String },

    /// A returned column holds a type that cannot be decoded into a `Value`.
    #[error("Cannot read value of column {column} with type {type_name}")]
    UnsupportedValue { column: String, type_name: String },

    /// A decimal that `NUMERIC` binding cannot carry without rounding.
    #[error("Decimal {0} cannot be bound as NUMERIC without losing precision")]
    NumericOutOfRange(String),

    /// No value was supplied for a bound parameter.
    #[error("No value supplied for parameter {0}")]
    MissingValue(String),

    /// An error occurred while building a SQL statement.
    #[error("Query build error: {0}")]
    QueryBuildError(String),

    /// Generated keys are read through RETURNING instead.
    #[error("{0} supports return on insert")]
    IdentityNotSupported(String),
}

impl From<UnknownDirection> for DbError {
    fn from(err: UnknownDirection) -> Self {
        DbError::UnsupportedDirection(err.0)
    }
}

impl DbError {
    /// Numeric SQLSTATE of a server error, or 0 when there is none
    /// (client-side failures, or class codes containing letters like `42P01`).
    pub fn code(&self) -> i32 {
        match self {
            DbError::Postgres(err) => err
                .code()
                .and_then(|state| state.code().parse::<i32>().ok())
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("PostgreSQL connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_object_and_kind() {
        let err = DbError::NotFound {
            kind: MetadataKind::Columns,
            name: "no_such_table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read list of columns for no_such_table - check spelling and access privileges"
        );
    }

    #[test]
    fn non_driver_errors_have_neutral_code() {
        assert_eq!(DbError::UnsupportedType("line".into()).code(), 0);
        assert_eq!(DbError::MissingValue("id".into()).code(), 0);
    }

    #[test]
    fn unknown_direction_converts() {
        let err: DbError = UnknownDirection("VARIADIC".into()).into();
        assert!(matches!(err, DbError::UnsupportedDirection(ref d) if d == "VARIADIC"));
    }
}
