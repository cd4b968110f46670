use crate::sql::{base::error::ConnectorError, postgres::connection::ConnectionString};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, config::SslMode};
use tracing::{error, info, warn};

/// Opens a client for `conn`. TLS is tried first and the plain protocol is
/// used when the server refuses it.
pub async fn connect(conn: &ConnectionString) -> Result<Client, ConnectorError> {
    let config = conn.to_config()?;
    let client = connect_client(config).await?;
    info!(server = %conn.server, port = %conn.port, "Connected to PostgreSQL");
    Ok(client)
}

pub async fn connect_client(config: Config) -> Result<Client, ConnectorError> {
    match config.get_ssl_mode() {
        SslMode::Disable => connect_without_tls(config).await,
        SslMode::Prefer => match connect_with_tls(config.clone()).await {
            Ok(client) => Ok(client),
            Err(error) => {
                warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                connect_without_tls(config).await
            }
        },
        _ => connect_with_tls(config).await,
    }
}

async fn connect_with_tls(config: Config) -> Result<Client, ConnectorError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

async fn connect_without_tls(config: Config) -> Result<Client, ConnectorError> {
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}
