use crate::error::CliError;
use async_trait::async_trait;
use connectors::sql::postgres::{connection::ConnectionString, utils::connect};
use tracing::{error, info};

/// Trait for "pinging" a data source
#[async_trait]
pub trait ConnectionPinger {
    /// Attempts to ping; returns Err if unreachable
    async fn ping(&self) -> Result<(), CliError>;
}

pub struct PostgresConnectionPinger {
    pub conn: ConnectionString,
}

#[async_trait]
impl ConnectionPinger for PostgresConnectionPinger {
    async fn ping(&self) -> Result<(), CliError> {
        let server = format!("{}:{}", self.conn.server, self.conn.port);
        info!("Pinging Postgres at '{}'", server);

        let client = connect(&self.conn).await.map_err(|e| {
            error!("Postgres connection to '{}' failed: {}", server, e);
            CliError::Connector(e)
        })?;

        let row = client.query_one("select 1", &[]).await.map_err(|e| {
            error!("Postgres ping query on '{}' failed: {}", server, e);
            CliError::Postgres(e)
        })?;

        let val: i32 = row.try_get(0)?;
        if val != 1 {
            let msg = format!("Postgres ping to '{server}' returned unexpected result: {val}");
            error!("{}", msg);
            return Err(CliError::Unexpected(msg));
        }

        info!("Postgres ping to '{}' succeeded", server);
        Ok(())
    }
}
