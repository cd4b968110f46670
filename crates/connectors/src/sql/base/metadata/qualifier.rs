use crate::sql::base::error::DbError;
use model::core::identifiers::IdentifierCase;
use planner::query::{ast::filter::Filter, builder::filter::FilterBuilder};

/// Names of the catalog, schema and object columns of one catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogColumns {
    pub catalog: &'static str,
    pub schema: &'static str,
    pub name: &'static str,
}

/// `information_schema.routines`, aliased `r`. Parameters are joined to it on
/// the specific name, which the server suffixes with the routine's oid.
pub const ROUTINE_COLUMNS: CatalogColumns = CatalogColumns {
    catalog: "r.routine_catalog",
    schema: "r.routine_schema",
    name: "r.routine_name",
};

/// `information_schema.columns`.
pub const TABLE_COLUMNS: CatalogColumns = CatalogColumns {
    catalog: "table_catalog",
    schema: "table_schema",
    name: "table_name",
};

/// A dotted object reference split into its positional qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifiedName {
    Name(String),
    Schema {
        schema: String,
        name: String,
    },
    Catalog {
        catalog: String,
        schema: String,
        name: String,
    },
}

impl QualifiedName {
    /// Splits `raw` on `.` and folds every part with `case`.
    pub fn parse(raw: &str, case: IdentifierCase) -> Result<Self, DbError> {
        let parts: Vec<String> = raw.split('.').map(|part| case.apply(part)).collect();
        match parts.as_slice() {
            [name] => Ok(QualifiedName::Name(name.clone())),
            [schema, name] => Ok(QualifiedName::Schema {
                schema: schema.clone(),
                name: name.clone(),
            }),
            [catalog, schema, name] => Ok(QualifiedName::Catalog {
                catalog: catalog.clone(),
                schema: schema.clone(),
                name: name.clone(),
            }),
            _ => Err(DbError::UnsupportedQualifierArity {
                name: raw.to_string(),
                count: parts.len(),
            }),
        }
    }

    /// Qualifier values in bind order: catalog, schema, name, each only if present.
    pub fn qualifiers(&self) -> Vec<String> {
        match self {
            QualifiedName::Name(name) => vec![name.clone()],
            QualifiedName::Schema { schema, name } => vec![schema.clone(), name.clone()],
            QualifiedName::Catalog {
                catalog,
                schema,
                name,
            } => vec![catalog.clone(), schema.clone(), name.clone()],
        }
    }

    /// Equality filter binding each qualifier to `:0`, `:1`, ... in order.
    pub fn filter(&self, columns: &CatalogColumns) -> Filter {
        let targets: &[&str] = match self {
            QualifiedName::Name(_) => &[columns.name],
            QualifiedName::Schema { .. } => &[columns.schema, columns.name],
            QualifiedName::Catalog { .. } => &[columns.catalog, columns.schema, columns.name],
        };

        targets
            .iter()
            .enumerate()
            .fold(FilterBuilder::new(), |builder, (i, column)| {
                builder.eq_param(column, &i.to_string())
            })
            .build()
    }
}
