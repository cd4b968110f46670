use crate::{
    settings::EnvironmentSettings,
    sql::{
        base::{
            accessor::ParameterAccessors,
            environment::SqlEnvironment,
            error::DbError,
            metadata::{qualifier::QualifiedName, row::MetadataSource},
        },
        postgres::{
            accessors::{AccessorBuilder, DEFAULT_OUTPUT_SIZE},
            coercion::coerce_value,
            connection::ConnectionString,
            metadata::MetadataQuery,
            params::{NamedQuery, PgParamStore},
            row::row_values,
        },
    },
};
use async_trait::async_trait;
use model::core::{
    identifiers::{DefaultNormaliser, IdentifierCase, NameNormaliser},
    value::Value,
};
use planner::query::{
    ast::insert::Insert,
    builder::insert::InsertBuilder,
    dialect::{self, Dialect},
    renderer::{Render, Renderer},
};
use std::{collections::HashMap, sync::Arc};
use tokio_postgres::{GenericClient, types::Type};
use tracing::debug;

#[derive(Clone)]
pub struct PgEnvironment {
    dialect: dialect::Postgres,
    normaliser: Arc<dyn NameNormaliser>,
    identifier_case: IdentifierCase,
    output_size: usize,
}

impl Default for PgEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl PgEnvironment {
    pub fn new() -> Self {
        Self {
            dialect: dialect::Postgres,
            normaliser: Arc::new(DefaultNormaliser),
            identifier_case: IdentifierCase::default(),
            output_size: DEFAULT_OUTPUT_SIZE,
        }
    }

    pub fn from_settings(settings: &EnvironmentSettings) -> Self {
        Self::new()
            .with_identifier_case(settings.identifier_case)
            .with_output_size(settings.output_size)
    }

    pub fn with_identifier_case(mut self, identifier_case: IdentifierCase) -> Self {
        self.identifier_case = identifier_case;
        self
    }

    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = output_size;
        self
    }

    fn qualified_name(&self, name: &str) -> Result<QualifiedName, DbError> {
        QualifiedName::parse(name.trim(), self.identifier_case)
    }

    async fn read_accessors(
        &self,
        source: &dyn MetadataSource,
        query: MetadataQuery,
    ) -> Result<ParameterAccessors, DbError> {
        let rows = query.fetch(source).await?;
        AccessorBuilder::new(self.normaliser.as_ref())
            .with_output_size(self.output_size)
            .build(&rows)
    }

    fn insert_ast(&self, table: &str, accessors: &ParameterAccessors) -> Result<Insert, DbError> {
        let mut builder = InsertBuilder::new(table);
        for accessor in accessors {
            let column = accessor.source_column().ok_or_else(|| {
                DbError::QueryBuildError(format!(
                    "Accessor at position {} of {table} has no column name",
                    accessor.position()
                ))
            })?;

            builder = if accessor.is_return_binding() {
                builder.returning(column)
            } else {
                builder.value(column, column)
            };
        }
        Ok(builder.build())
    }

    /// Runs the synthesized insert and returns the `returning` columns of
    /// the inserted row, keyed by normalized column name.
    ///
    /// `values` are keyed by normalized column name; every accessor that is
    /// not return-bound needs one. Values are coerced to the declared column
    /// types before binding.
    pub async fn execute_insert<C: GenericClient + Sync>(
        &self,
        client: &C,
        table: &str,
        accessors: &ParameterAccessors,
        values: &HashMap<String, Value>,
    ) -> Result<HashMap<String, Value>, DbError> {
        let insert = self.insert_ast(table, accessors)?;
        let mut renderer = Renderer::new(&self.dialect);
        insert.render(&mut renderer);
        let (sql, param_names) = renderer.finish();

        let query = NamedQuery::parse(&sql, &self.dialect);
        if query.names != param_names {
            return Err(DbError::QueryBuildError(format!(
                "Columns of {table} cannot all be bound by name: {}",
                param_names.join(",")
            )));
        }

        let bound: Vec<_> = accessors
            .iter()
            .filter(|accessor| !accessor.is_return_binding())
            .collect();

        let mut wire_types: Vec<Type> = Vec::with_capacity(bound.len());
        let mut bind_values: Vec<Value> = Vec::with_capacity(bound.len());
        for accessor in bound {
            let column = accessor.source_column().unwrap_or_default();
            let key = self.normaliser.normalise(column);
            let value = values
                .get(&key)
                .cloned()
                .ok_or_else(|| DbError::MissingValue(column.to_string()))?;

            bind_values.push(coerce_value(column, accessor.wire_type(), value)?);
            wire_types.push(accessor.wire_type().clone());
        }

        debug!(sql = %query.sql, "Executing insert");
        let statement = client.prepare_typed(query.sql.as_str(), &wire_types).await?;
        let bindings = PgParamStore::from_values(bind_values)?;
        let rows = client.query(&statement, &bindings.as_refs()).await?;

        match rows.first() {
            Some(row) => row_values(row, self.normaliser.as_ref()),
            None => Ok(HashMap::new()),
        }
    }
}

#[async_trait]
impl SqlEnvironment for PgEnvironment {
    async fn procedure_parameters(
        &self,
        source: &dyn MetadataSource,
        name: &str,
    ) -> Result<ParameterAccessors, DbError> {
        let qualified = self.qualified_name(name)?;
        let query = MetadataQuery::procedure_parameters(name, &qualified);
        self.read_accessors(source, query).await
    }

    async fn table_columns(
        &self,
        source: &dyn MetadataSource,
        name: &str,
    ) -> Result<ParameterAccessors, DbError> {
        let qualified = self.qualified_name(name)?;
        let query = MetadataQuery::table_columns(name, &qualified);
        self.read_accessors(source, query).await
    }

    fn build_insert_command(
        &self,
        table: &str,
        accessors: &ParameterAccessors,
    ) -> Result<String, DbError> {
        let insert = self.insert_ast(table, accessors)?;
        let mut renderer = Renderer::new(&self.dialect);
        insert.render(&mut renderer);
        let (sql, _) = renderer.finish();
        debug!(%sql, "Built insert command");
        Ok(sql)
    }

    fn identity_select_statement(&self, _table: &str) -> Result<String, DbError> {
        Err(DbError::IdentityNotSupported(self.dialect.name()))
    }

    fn parameter_prefix(&self) -> &'static str {
        self.dialect.parameter_prefix()
    }

    fn supports_return_on_insert(&self) -> bool {
        self.dialect.supports_return_on_insert()
    }

    fn connection_string(&self, data_source: &str, username: &str, password: &str) -> String {
        ConnectionString::build(data_source, username, password).to_string()
    }

    fn connection_string_with_database(
        &self,
        data_source: &str,
        username: &str,
        password: &str,
        database: &str,
    ) -> String {
        ConnectionString::build_with_database(data_source, username, password, database)
            .to_string()
    }
}
