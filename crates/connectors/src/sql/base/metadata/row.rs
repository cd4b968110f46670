use crate::sql::base::error::DbError;
use async_trait::async_trait;

/// One raw catalog row describing a parameter or column, in the shape every
/// metadata query selects: name, type, mode, ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    /// `None` for a routine's return slot.
    pub name: Option<String>,
    /// Type name as reported; `None` when the catalog has no return type.
    pub data_type: Option<String>,
    /// `IN`, `OUT`, `INOUT`; `None` for the return slot.
    pub direction: Option<String>,
    /// Server ordinal: 0 for the return slot, 1-based otherwise.
    pub ordinal: i32,
}

impl MetadataRow {
    pub fn parameter(name: &str, data_type: &str, direction: &str, ordinal: i32) -> Self {
        Self {
            name: Some(name.to_string()),
            data_type: Some(data_type.to_string()),
            direction: Some(direction.to_string()),
            ordinal,
        }
    }

    pub fn return_slot(data_type: &str) -> Self {
        Self {
            name: None,
            data_type: Some(data_type.to_string()),
            direction: None,
            ordinal: 0,
        }
    }

    pub fn is_return_slot(&self) -> bool {
        self.name.is_none() && self.ordinal == 0
    }
}

/// An open connection or transaction that can answer catalog queries.
///
/// `params` bind positionally to the distinct `:name` bind variables of
/// `sql` in order of first appearance. The source is only borrowed: it is
/// never committed, rolled back or closed here.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn query_metadata(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<MetadataRow>, DbError>;
}
