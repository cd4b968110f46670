use crate::{
    conn::{ConnectionPinger, PostgresConnectionPinger},
    env::EnvManager,
    error::CliError,
};
use clap::Parser;
use commands::Commands;
use connectors::{
    settings::EnvironmentSettings,
    sql::{
        base::{accessor::ParameterAccessors, environment::SqlEnvironment, error::MetadataKind},
        postgres::{environment::PgEnvironment, utils::connect},
    },
};
use model::core::identifiers::normalise_name;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "pgfit",
    version = "0.1.0",
    about = "Inspect PostgreSQL routines and tables the way fixture tables bind them"
)]
struct Cli {
    #[arg(long, global = true, help = "Extra env file, applied after ~/.pgfit/env")]
    env_file: Option<String>,

    #[arg(long, global = true, help = "Database name, overrides PGFIT_DATABASE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut env = EnvManager::new();
    env.load_default_file()?;
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    if let Commands::Env = cli.command {
        for (key, value) in env.masked_settings() {
            println!("{key}={value}");
        }
        return Ok(());
    }

    let mut settings = EnvironmentSettings::from_vars(env.all())?;
    if let Some(database) = &cli.database {
        settings = settings.with_database(database);
    }
    let environment = PgEnvironment::from_settings(&settings);

    match cli.command {
        Commands::TestConn => {
            PostgresConnectionPinger {
                conn: settings.connection_string(),
            }
            .ping()
            .await?;
        }
        Commands::Env => {}
        Commands::Params { name, json } => {
            let accessors =
                describe(&settings, &environment, MetadataKind::Parameters, &name).await?;
            output::print_accessors(&format!("Parameters of {name}"), &accessors, json)?;
        }
        Commands::Columns { name, json } => {
            let accessors = describe(&settings, &environment, MetadataKind::Columns, &name).await?;
            output::print_accessors(&format!("Columns of {name}"), &accessors, json)?;
        }
        Commands::InsertSql { table, returning } => {
            let mut accessors =
                describe(&settings, &environment, MetadataKind::Columns, &table).await?;
            for column in &returning {
                accessors
                    .get_mut(&normalise_name(column))
                    .ok_or_else(|| CliError::UnknownColumn {
                        table: table.clone(),
                        column: column.clone(),
                    })?
                    .set_return_binding(true);
            }
            println!("{}", environment.build_insert_command(&table, &accessors)?);
        }
    }

    Ok(())
}

/// Runs one catalog lookup in its own transaction, which is always rolled back.
async fn describe(
    settings: &EnvironmentSettings,
    environment: &PgEnvironment,
    kind: MetadataKind,
    name: &str,
) -> Result<ParameterAccessors, CliError> {
    let mut client = connect(&settings.connection_string()).await?;
    let tx = client.transaction().await?;

    let result = match kind {
        MetadataKind::Parameters => environment.procedure_parameters(&tx, name).await,
        MetadataKind::Columns => environment.table_columns(&tx, name).await,
    };
    tx.rollback().await?;

    let accessors = result?;
    info!(%kind, name, count = accessors.len(), "Lookup finished");
    Ok(accessors)
}
