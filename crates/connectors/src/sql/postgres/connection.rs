use crate::sql::base::error::ConnectorError;
use std::{fmt, str::FromStr};
use tokio_postgres::Config;

pub const DEFAULT_PORT: u16 = 5432;

/// `Server=..;Port=..;User Id=..;Password=..;[Database=..;]`
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub server: String,
    /// Kept as written; only checked when converted to a driver config.
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
}

impl ConnectionString {
    /// `data_source` is `host` or `host:port`. A colon at the very start is
    /// not treated as a separator.
    pub fn build(data_source: &str, user: &str, password: &str) -> Self {
        let (server, port) = match data_source.find(':') {
            Some(idx) if idx > 0 => (&data_source[..idx], data_source[idx + 1..].to_string()),
            _ => (data_source, DEFAULT_PORT.to_string()),
        };

        ConnectionString {
            server: server.to_string(),
            port,
            user: user.to_string(),
            password: password.to_string(),
            database: None,
        }
    }

    pub fn build_with_database(
        data_source: &str,
        user: &str,
        password: &str,
        database: &str,
    ) -> Self {
        ConnectionString {
            database: Some(database.to_string()),
            ..Self::build(data_source, user, password)
        }
    }

    pub fn to_config(&self) -> Result<Config, ConnectorError> {
        let port = self.port.trim().parse::<u16>().map_err(|_| {
            ConnectorError::InvalidConnectionString(format!("invalid port '{}'", self.port))
        })?;

        let mut config = Config::new();
        config
            .host(&self.server)
            .port(port)
            .user(&self.user)
            .password(&self.password);
        if let Some(database) = &self.database {
            config.dbname(database);
        }
        Ok(config)
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Server={};Port={};User Id={};Password={};",
            self.server, self.port, self.user, self.password
        )?;
        if let Some(database) = &self.database {
            write!(f, "Database={database};")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl FromStr for ConnectionString {
    type Err = ConnectorError;

    /// Parses the `key=value;` form produced by `Display`. Keys are
    /// case-insensitive and a missing port falls back to [`DEFAULT_PORT`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut server = None;
        let mut port = None;
        let mut user = None;
        let mut password = None;
        let mut database = None;

        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                ConnectorError::InvalidConnectionString(format!("expected key=value, got '{pair}'"))
            })?;
            let value = value.trim().to_string();
            match key.trim().to_lowercase().as_str() {
                "server" | "host" => server = Some(value),
                "port" => port = Some(value),
                "user id" | "userid" | "user" | "username" => user = Some(value),
                "password" => password = Some(value),
                "database" => database = Some(value),
                other => {
                    return Err(ConnectorError::InvalidConnectionString(format!(
                        "unknown key '{other}'"
                    )));
                }
            }
        }

        Ok(ConnectionString {
            server: server
                .ok_or_else(|| ConnectorError::InvalidConnectionString("missing Server".into()))?,
            port: port.unwrap_or_else(|| DEFAULT_PORT.to_string()),
            user: user.unwrap_or_default(),
            password: password.unwrap_or_default(),
            database,
        })
    }
}
