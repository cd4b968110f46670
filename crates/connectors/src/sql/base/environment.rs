use crate::sql::base::{
    accessor::ParameterAccessors, error::DbError, metadata::row::MetadataSource,
};
use async_trait::async_trait;

/// What a fixture runner needs from a database: routine and table
/// descriptions, and the SQL to insert rows into a table.
///
/// Lookups run on a connection or transaction the caller already holds; an
/// environment never commits, rolls back or closes it.
#[async_trait]
pub trait SqlEnvironment: Send + Sync {
    // Introspection
    async fn procedure_parameters(
        &self,
        source: &dyn MetadataSource,
        name: &str,
    ) -> Result<ParameterAccessors, DbError>;

    async fn table_columns(
        &self,
        source: &dyn MetadataSource,
        name: &str,
    ) -> Result<ParameterAccessors, DbError>;

    // Statements
    fn build_insert_command(
        &self,
        table: &str,
        accessors: &ParameterAccessors,
    ) -> Result<String, DbError>;

    /// Statement reading back the key generated by the last insert.
    fn identity_select_statement(&self, table: &str) -> Result<String, DbError>;

    // Dialect
    fn parameter_prefix(&self) -> &'static str;
    fn supports_return_on_insert(&self) -> bool;

    // Connection
    fn connection_string(&self, data_source: &str, username: &str, password: &str) -> String;
    fn connection_string_with_database(
        &self,
        data_source: &str,
        username: &str,
        password: &str,
        database: &str,
    ) -> String;
}
