use crate::sql::{
    base::{
        error::{DbError, MetadataKind},
        metadata::{
            qualifier::{CatalogColumns, QualifiedName, ROUTINE_COLUMNS, TABLE_COLUMNS},
            row::{MetadataRow, MetadataSource},
        },
    },
    postgres::params::NamedQuery,
};
use async_trait::async_trait;
use planner::query::{
    dialect,
    renderer::{Render, Renderer},
};
use tokio_postgres::{Client, GenericClient, Row, Transaction, types::ToSql};
use tracing::debug;

const QUERY_PROCEDURE_PARAMETERS_SQL: &str = include_str!("sql/procedure_parameters.sql");
const QUERY_TABLE_COLUMNS_SQL: &str = include_str!("sql/table_columns.sql");

/// A catalog query with its qualifier values, ready to run on a [`MetadataSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataQuery {
    pub kind: MetadataKind,
    /// Object name as the caller wrote it; used in the not-found message.
    pub object: String,
    pub sql: String,
    /// Bound to `:0`, `:1`, ... in order.
    pub params: Vec<String>,
}

impl MetadataQuery {
    /// Declared parameters of a routine plus one row for its return slot,
    /// ordered by server ordinal so the return slot (ordinal 0) comes first.
    pub fn procedure_parameters(object: &str, name: &QualifiedName) -> Self {
        Self::build(
            MetadataKind::Parameters,
            object,
            name,
            QUERY_PROCEDURE_PARAMETERS_SQL,
            &ROUTINE_COLUMNS,
        )
    }

    /// One `IN` row per column of a table or view, in ordinal order.
    pub fn table_columns(object: &str, name: &QualifiedName) -> Self {
        Self::build(
            MetadataKind::Columns,
            object,
            name,
            QUERY_TABLE_COLUMNS_SQL,
            &TABLE_COLUMNS,
        )
    }

    fn build(
        kind: MetadataKind,
        object: &str,
        name: &QualifiedName,
        template: &str,
        columns: &CatalogColumns,
    ) -> Self {
        let dialect = dialect::Postgres;
        let mut renderer = Renderer::new(&dialect);
        name.filter(columns).render(&mut renderer);
        let (predicate, _) = renderer.finish();

        MetadataQuery {
            kind,
            object: object.to_string(),
            sql: template.trim_end().replace("{filter}", &predicate),
            params: name.qualifiers(),
        }
    }

    /// Runs the query; an empty result is an error, never an empty list,
    /// since even a routine without arguments yields its return slot.
    pub async fn fetch(&self, source: &dyn MetadataSource) -> Result<Vec<MetadataRow>, DbError> {
        let rows = source.query_metadata(&self.sql, &self.params).await?;
        debug!(
            kind = %self.kind,
            object = %self.object,
            rows = rows.len(),
            "Read catalog metadata"
        );

        if rows.is_empty() {
            return Err(DbError::NotFound {
                kind: self.kind,
                name: self.object.clone(),
            });
        }
        Ok(rows)
    }
}

fn metadata_row(row: &Row) -> Result<MetadataRow, DbError> {
    Ok(MetadataRow {
        name: row.try_get(0)?,
        data_type: row.try_get(1)?,
        direction: row.try_get(2)?,
        ordinal: row.try_get(3)?,
    })
}

async fn query_metadata_rows<C: GenericClient + Sync>(
    client: &C,
    sql: &str,
    params: &[String],
) -> Result<Vec<MetadataRow>, DbError> {
    let query = NamedQuery::parse(sql, &dialect::Postgres);
    if query.names.len() != params.len() {
        return Err(DbError::QueryBuildError(format!(
            "Query expects {} parameters, {} supplied",
            query.names.len(),
            params.len()
        )));
    }
    debug!(sql = %query.sql, params = ?params, "Executing metadata query");

    let refs: Vec<&(dyn ToSql + Sync)> = params
        .iter()
        .map(|param| param as &(dyn ToSql + Sync))
        .collect();
    let rows = client.query(query.sql.as_str(), &refs).await?;
    rows.iter().map(metadata_row).collect()
}

#[async_trait]
impl MetadataSource for Client {
    async fn query_metadata(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<MetadataRow>, DbError> {
        query_metadata_rows(self, sql, params).await
    }
}

#[async_trait]
impl MetadataSource for Transaction<'_> {
    async fn query_metadata(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<MetadataRow>, DbError> {
        query_metadata_rows(self, sql, params).await
    }
}
