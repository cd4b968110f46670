use crate::sql::{
    base::{
        accessor::{ParameterAccessor, ParameterAccessors},
        error::DbError,
        metadata::row::MetadataRow,
    },
    postgres::data_type::resolve_type,
};
use model::core::{direction::Direction, identifiers::NameNormaliser};
use std::str::FromStr;
use tracing::debug;

/// Capacity given to outputs and text inputs, whose real size the catalog does not report.
pub const DEFAULT_OUTPUT_SIZE: usize = 4000;

/// Reported for procedures, which have no return type.
const NO_RETURN_TYPE: &str = "void";

/// Turns catalog rows into typed, directioned accessors.
pub struct AccessorBuilder<'a> {
    normaliser: &'a dyn NameNormaliser,
    output_size: usize,
}

impl<'a> AccessorBuilder<'a> {
    pub fn new(normaliser: &'a dyn NameNormaliser) -> Self {
        Self {
            normaliser,
            output_size: DEFAULT_OUTPUT_SIZE,
        }
    }

    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = output_size;
        self
    }

    /// Materializes `rows` in ordinal order. Any unmapped type or unknown
    /// mode aborts the whole lookup.
    pub fn build(&self, rows: &[MetadataRow]) -> Result<ParameterAccessors, DbError> {
        let mut ordered: Vec<&MetadataRow> = rows.iter().collect();
        ordered.sort_by_key(|row| row.ordinal);

        let mut accessors = ParameterAccessors::new();
        for row in ordered {
            let (key, accessor) = self.accessor(row)?;
            accessors.push(key, accessor);
        }

        debug!(count = accessors.len(), "Built parameter accessors");
        Ok(accessors)
    }

    fn accessor(&self, row: &MetadataRow) -> Result<(Option<String>, ParameterAccessor), DbError> {
        let data_type = row.data_type.as_deref().unwrap_or(NO_RETURN_TYPE);
        let mapping = resolve_type(data_type)?;

        let direction = if row.is_return_slot() {
            Direction::Return
        } else {
            match row.direction.as_deref() {
                Some(mode) => Direction::from_str(mode.trim())?,
                None => Direction::In,
            }
        };

        let size = (direction.is_output() || mapping.host_type.is_text())
            .then_some(self.output_size);

        let key = match (&row.name, direction) {
            (_, Direction::Return) => None,
            (Some(name), _) => Some(self.normaliser.normalise(name)),
            (None, _) => Some(format!("${}", row.ordinal)),
        };

        let accessor = ParameterAccessor::new(
            row.name.clone(),
            direction,
            mapping.host_type,
            mapping.wire_type().clone(),
            data_type.to_string(),
            row.ordinal,
            size,
        );
        Ok((key, accessor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::{host_type::HostType, identifiers::DefaultNormaliser};
    use tokio_postgres::types::Type;

    fn build(rows: &[MetadataRow]) -> Result<ParameterAccessors, DbError> {
        AccessorBuilder::new(&DefaultNormaliser).build(rows)
    }

    #[test]
    fn return_slot_comes_first() {
        let rows = vec![
            MetadataRow::return_slot("integer"),
            MetadataRow::parameter("a", "integer", "IN", 1),
            MetadataRow::parameter("b", "text", "OUT", 2),
            MetadataRow::parameter("c", "numeric", "INOUT", 3),
        ];
        let accessors = build(&rows).unwrap();

        assert_eq!(accessors.len(), 4);
        let ret = accessors.return_value().unwrap();
        assert_eq!(ret.position(), 0);
        assert_eq!(ret.ordinal(), 0);
        assert_eq!(ret.direction(), Direction::Return);
        assert!(ret.name().is_none());

        assert_eq!(accessors.keys(), vec!["a", "b", "c"]);
        assert_eq!(accessors.get("a").unwrap().position(), 1);
        assert_eq!(accessors.get("b").unwrap().direction(), Direction::Out);
        assert_eq!(accessors.get("c").unwrap().direction(), Direction::InOut);
    }

    #[test]
    fn rows_out_of_order_are_sorted_by_ordinal() {
        let rows = vec![
            MetadataRow::parameter("second", "integer", "IN", 2),
            MetadataRow::parameter("first", "integer", "IN", 1),
            MetadataRow::return_slot("void"),
        ];
        let accessors = build(&rows).unwrap();

        let positions: Vec<(Option<&str>, usize)> =
            accessors.iter().map(|a| (a.name(), a.position())).collect();
        assert_eq!(
            positions,
            vec![(None, 0), (Some("first"), 1), (Some("second"), 2)]
        );
    }

    #[test]
    fn size_is_forced_for_outputs_and_text_inputs() {
        let rows = vec![
            MetadataRow::return_slot("bigint"),
            MetadataRow::parameter("label", "character varying", "IN", 1),
            MetadataRow::parameter("qty", "integer", "IN", 2),
            MetadataRow::parameter("total", "numeric", "OUT", 3),
            MetadataRow::parameter("flag", "boolean", "INOUT", 4),
        ];
        let accessors = build(&rows).unwrap();

        assert_eq!(accessors.return_value().unwrap().size(), Some(4000));
        assert_eq!(accessors.get("label").unwrap().size(), Some(4000));
        assert_eq!(accessors.get("qty").unwrap().size(), None);
        assert_eq!(accessors.get("total").unwrap().size(), Some(4000));
        assert_eq!(accessors.get("flag").unwrap().size(), Some(4000));
    }

    #[test]
    fn output_size_is_configurable() {
        let rows = vec![MetadataRow::parameter("note", "text", "IN", 1)];
        let accessors = AccessorBuilder::new(&DefaultNormaliser)
            .with_output_size(255)
            .build(&rows)
            .unwrap();
        assert_eq!(accessors.get("note").unwrap().size(), Some(255));
    }

    #[test]
    fn keys_are_normalised_and_columns_keep_case() {
        let rows = vec![MetadataRow::parameter("Order Id", "integer", "IN", 1)];
        let accessors = build(&rows).unwrap();

        let accessor = accessors.get("orderid").unwrap();
        assert_eq!(accessor.source_column(), Some("Order Id"));
        assert_eq!(accessor.host_type(), HostType::Int32);
        assert_eq!(accessor.wire_type(), &Type::INT4);
    }

    #[test]
    fn procedure_without_return_type_maps_to_void() {
        let rows = vec![
            MetadataRow {
                name: None,
                data_type: None,
                direction: None,
                ordinal: 0,
            },
            MetadataRow::parameter("id", "bigint", "IN", 1),
        ];
        let accessors = build(&rows).unwrap();
        let ret = accessors.return_value().unwrap();
        assert_eq!(ret.host_type(), HostType::Void);
        assert_eq!(ret.data_type(), "void");
    }

    #[test]
    fn unnamed_declared_parameter_is_keyed_by_ordinal() {
        let rows = vec![
            MetadataRow::return_slot("integer"),
            MetadataRow {
                name: None,
                data_type: Some("integer".into()),
                direction: Some("IN".into()),
                ordinal: 1,
            },
        ];
        let accessors = build(&rows).unwrap();

        let unnamed = accessors.get("$1").unwrap();
        assert_eq!(unnamed.direction(), Direction::In);
        assert_eq!(unnamed.position(), 1);
        assert_eq!(accessors.return_value().unwrap().position(), 0);
    }

    #[test]
    fn same_table_in_two_schemas_keeps_running_positions() {
        let rows = vec![
            MetadataRow::parameter("id", "integer", "IN", 1),
            MetadataRow::parameter("id", "bigint", "IN", 1),
            MetadataRow::parameter("name", "text", "IN", 2),
            MetadataRow::parameter("name", "text", "IN", 2),
        ];
        let accessors = build(&rows).unwrap();

        assert_eq!(accessors.len(), 2);
        let positions: Vec<usize> = accessors.iter().map(|a| a.position()).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(accessors.get("id").unwrap().host_type(), HostType::Int64);
    }

    #[test]
    fn unmapped_type_aborts_lookup() {
        let rows = vec![
            MetadataRow::parameter("ok", "integer", "IN", 1),
            MetadataRow::parameter("tags", "ARRAY", "IN", 2),
        ];
        let err = build(&rows).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedType(ref t) if t == "array"));
    }

    #[test]
    fn unknown_mode_aborts_lookup() {
        let rows = vec![MetadataRow::parameter("rest", "integer", "VARIADIC", 1)];
        let err = build(&rows).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedDirection(ref d) if d == "VARIADIC"));
    }
}
