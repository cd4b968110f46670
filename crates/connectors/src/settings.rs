use crate::sql::postgres::{accessors::DEFAULT_OUTPUT_SIZE, connection::ConnectionString};
use model::core::identifiers::IdentifierCase;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const ENV_PREFIX: &str = "PGFIT_";

pub const VAR_DATA_SOURCE: &str = "PGFIT_DATA_SOURCE";
pub const VAR_USER: &str = "PGFIT_USER";
pub const VAR_PASSWORD: &str = "PGFIT_PASSWORD";
pub const VAR_DATABASE: &str = "PGFIT_DATABASE";
pub const VAR_IDENTIFIER_CASE: &str = "PGFIT_IDENTIFIER_CASE";
pub const VAR_OUTPUT_SIZE: &str = "PGFIT_OUTPUT_SIZE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing configuration variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Where and how to reach the fixture database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// `host` or `host:port`.
    pub data_source: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub identifier_case: IdentifierCase,
    #[serde(default = "default_output_size")]
    pub output_size: usize,
}

fn default_output_size() -> usize {
    DEFAULT_OUTPUT_SIZE
}

impl EnvironmentSettings {
    pub fn new(data_source: &str, username: &str, password: &str) -> Self {
        Self {
            data_source: data_source.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            database: None,
            identifier_case: IdentifierCase::default(),
            output_size: DEFAULT_OUTPUT_SIZE,
        }
    }

    /// Reads the `PGFIT_*` variables from `vars`. Data source and user are
    /// required; an empty value counts as missing.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let data_source = get(VAR_DATA_SOURCE).ok_or(SettingsError::Missing(VAR_DATA_SOURCE))?;
        let username = get(VAR_USER).ok_or(SettingsError::Missing(VAR_USER))?;
        let password = vars.get(VAR_PASSWORD).cloned().unwrap_or_default();

        let identifier_case = match get(VAR_IDENTIFIER_CASE) {
            Some(raw) => raw.parse().map_err(|reason| SettingsError::Invalid {
                name: VAR_IDENTIFIER_CASE,
                reason,
            })?,
            None => IdentifierCase::default(),
        };

        let output_size = match get(VAR_OUTPUT_SIZE) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(SettingsError::Invalid {
                        name: VAR_OUTPUT_SIZE,
                        reason: format!("expected a positive integer, got '{raw}'"),
                    });
                }
            },
            None => DEFAULT_OUTPUT_SIZE,
        };

        Ok(Self {
            data_source: data_source.to_string(),
            username: username.to_string(),
            password,
            database: get(VAR_DATABASE).map(str::to_string),
            identifier_case,
            output_size,
        })
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = Some(database.to_string());
        self
    }

    pub fn connection_string(&self) -> ConnectionString {
        match &self.database {
            Some(database) => ConnectionString::build_with_database(
                &self.data_source,
                &self.username,
                &self.password,
                database,
            ),
            None => ConnectionString::build(&self.data_source, &self.username, &self.password),
        }
    }
}
