use model::core::{direction::Direction, host_type::HostType};
use serde::Serialize;
use std::collections::HashMap;
use tokio_postgres::types::Type;

/// One bound value of a routine call or table operation.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterAccessor {
    name: Option<String>,
    source_column: Option<String>,
    direction: Direction,
    host_type: HostType,
    #[serde(skip)]
    wire_type: Type,
    data_type: String,
    position: usize,
    ordinal: i32,
    size: Option<usize>,
    is_return_binding: bool,
}

impl ParameterAccessor {
    /// The position is assigned when the accessor is pushed into a
    /// [`ParameterAccessors`].
    pub(crate) fn new(
        name: Option<String>,
        direction: Direction,
        host_type: HostType,
        wire_type: Type,
        data_type: String,
        ordinal: i32,
        size: Option<usize>,
    ) -> Self {
        Self {
            source_column: name.clone(),
            name,
            direction,
            host_type,
            wire_type,
            data_type,
            position: 0,
            ordinal,
            size,
            is_return_binding: false,
        }
    }

    /// Parameter or column name as the server reports it; `None` for the return
    /// slot and for unnamed routine arguments.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Case-sensitive column name used in generated SQL.
    pub fn source_column(&self) -> Option<&str> {
        self.source_column.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub(crate) fn wire_type(&self) -> &Type {
        &self.wire_type
    }

    /// Type name as reported by the catalog, before normalization.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Zero-based position in the materialized sequence; this is the binding order.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Ordinal as numbered by the server: 0 for a return slot, 1-based otherwise.
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn is_return_binding(&self) -> bool {
        self.is_return_binding
    }

    /// Marks the column as server-generated: it is read back through
    /// RETURNING instead of being supplied on insert.
    pub fn set_return_binding(&mut self, is_return_binding: bool) {
        self.is_return_binding = is_return_binding;
    }
}

/// Accessors of one lookup, keyed by normalized name and iterated in
/// materialization order (which is the server's ordinal order).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterAccessors {
    accessors: Vec<ParameterAccessor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ParameterAccessors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an accessor at the next position. Return slots carry no key and
    /// are reached through [`ParameterAccessors::return_value`]. A repeated key
    /// replaces the earlier accessor in place and takes over its position, so
    /// positions always run 0..len.
    pub(crate) fn push(&mut self, key: Option<String>, mut accessor: ParameterAccessor) {
        let existing = key.as_ref().and_then(|key| self.index.get(key).copied());
        match existing {
            Some(slot) => {
                accessor.position = slot;
                self.accessors[slot] = accessor;
            }
            None => {
                accessor.position = self.accessors.len();
                if let Some(key) = key {
                    self.index.insert(key, self.accessors.len());
                }
                self.accessors.push(accessor);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParameterAccessor> {
        self.index.get(key).map(|&i| &self.accessors[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ParameterAccessor> {
        self.index.get(key).map(|&i| &mut self.accessors[i])
    }

    /// The routine's own return slot, if this lookup described a routine.
    pub fn return_value(&self) -> Option<&ParameterAccessor> {
        self.accessors
            .iter()
            .find(|accessor| accessor.direction == Direction::Return)
    }

    /// Normalized keys in iteration order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keyed: Vec<(&str, usize)> = self
            .index
            .iter()
            .map(|(key, &i)| (key.as_str(), i))
            .collect();
        keyed.sort_by_key(|(_, i)| *i);
        keyed.into_iter().map(|(key, _)| key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterAccessor> {
        self.accessors.iter()
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterAccessors {
    type Item = &'a ParameterAccessor;
    type IntoIter = std::slice::Iter<'a, ParameterAccessor>;

    fn into_iter(self) -> Self::IntoIter {
        self.accessors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, ordinal: i32, host_type: HostType) -> ParameterAccessor {
        ParameterAccessor::new(
            Some(name.to_string()),
            Direction::In,
            host_type,
            Type::TEXT,
            "text".to_string(),
            ordinal,
            None,
        )
    }

    #[test]
    fn keeps_insertion_order_and_key_lookup() {
        let mut accessors = ParameterAccessors::new();
        accessors.push(Some("b".into()), column("B", 1, HostType::Int32));
        accessors.push(Some("a".into()), column("A", 2, HostType::String));

        let names: Vec<_> = accessors.iter().filter_map(|a| a.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(accessors.keys(), vec!["b", "a"]);
        assert_eq!(accessors.get("a").map(|a| a.position()), Some(1));
        assert!(accessors.get("A").is_none());
    }

    #[test]
    fn return_slot_is_positional_only() {
        let mut accessors = ParameterAccessors::new();
        let ret = ParameterAccessor::new(
            None,
            Direction::Return,
            HostType::Int32,
            Type::INT4,
            "integer".to_string(),
            0,
            Some(4000),
        );
        accessors.push(None, ret);
        accessors.push(Some("x".into()), column("x", 1, HostType::Int32));

        assert_eq!(accessors.len(), 2);
        assert_eq!(accessors.keys(), vec!["x"]);
        let ret = accessors.return_value().expect("return slot present");
        assert_eq!(ret.position(), 0);
        assert!(ret.name().is_none());
        assert!(ret.source_column().is_none());
    }

    #[test]
    fn return_binding_flag_is_mutable() {
        let mut accessors = ParameterAccessors::new();
        accessors.push(Some("id".into()), column("id", 1, HostType::Int32));

        accessors
            .get_mut("id")
            .expect("id present")
            .set_return_binding(true);
        assert!(accessors.get("id").unwrap().is_return_binding());
    }

    #[test]
    fn repeated_key_keeps_positions_contiguous() {
        // Same column name reported by two schemas for a one-part table name.
        let mut accessors = ParameterAccessors::new();
        accessors.push(Some("id".into()), column("id", 1, HostType::Int32));
        accessors.push(Some("name".into()), column("name", 2, HostType::String));
        accessors.push(Some("id".into()), column("id", 1, HostType::Int64));
        accessors.push(Some("total".into()), column("total", 3, HostType::Decimal));

        assert_eq!(accessors.keys(), vec!["id", "name", "total"]);
        let positions: Vec<_> = accessors.iter().map(|a| a.position()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(accessors.get("id").unwrap().host_type(), HostType::Int64);
        assert_eq!(accessors.get("total").unwrap().position(), 2);
    }
}
