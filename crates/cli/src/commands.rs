use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to the configured database and run `select 1`
    TestConn,

    /// Print the effective PGFIT_* configuration, with secrets masked
    Env,

    /// Describe the parameters of a procedure or function
    Params {
        /// Routine name: `name`, `schema.name` or `catalog.schema.name`
        name: String,

        #[arg(long, help = "Print the accessors as JSON instead of a table")]
        json: bool,
    },

    /// Describe the columns of a table or view
    Columns {
        /// Table name: `name`, `schema.name` or `catalog.schema.name`
        name: String,

        #[arg(long, help = "Print the accessors as JSON instead of a table")]
        json: bool,
    },

    /// Print the insert statement generated for a table
    InsertSql {
        table: String,

        #[arg(
            long = "returning",
            help = "Column read back with RETURNING instead of being bound; repeatable"
        )]
        returning: Vec<String>,
    },
}
