use connectors::{
    settings::SettingsError,
    sql::base::error::{ConnectorError, DbError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to connect: {0}")]
    Connector(#[from] ConnectorError),

    #[error("{0}")]
    Db(#[from] DbError),

    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Table {table} has no column {column}")]
    UnknownColumn { table: String, column: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
