use crate::sql::base::error::DbError;
use lazy_static::lazy_static;
use model::core::host_type::HostType;
use std::collections::HashMap;
use tokio_postgres::types::{Kind, Type};

/// How one server type name is bound on the wire and read on the host.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    pub source_type: &'static str,
    pub host_type: HostType,
    wire_type: Type,
}

impl TypeMapping {
    pub(crate) fn wire_type(&self) -> &Type {
        &self.wire_type
    }
}

lazy_static! {
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, TypeMapping> = build_postgres_type_map();
}

/// Lower-cases, trims and drops any length/precision suffix:
/// `NUMERIC(10,2)` becomes `numeric`.
pub fn normalize_type_name(type_name: &str) -> String {
    let lowered = type_name.trim().to_lowercase();
    match lowered.find('(') {
        Some(idx) => lowered[..idx].trim_end().to_string(),
        None => lowered,
    }
}

/// Looks up an already normalized type name.
pub fn lookup_type(normalized: &str) -> Result<&'static TypeMapping, DbError> {
    POSTGRES_TYPE_MAP
        .get(normalized)
        .ok_or_else(|| DbError::UnsupportedType(normalized.to_string()))
}

/// Normalizes a type name as reported by the catalog and looks it up.
pub fn resolve_type(type_name: &str) -> Result<&'static TypeMapping, DbError> {
    lookup_type(&normalize_type_name(type_name))
}

/// Types dropped from current servers that the driver no longer ships a tag for.
fn legacy_type(name: &str, oid: u32) -> Type {
    Type::new(name.to_string(), oid, Kind::Simple, "pg_catalog".to_string())
}

fn build_postgres_type_map() -> HashMap<&'static str, TypeMapping> {
    use HostType::*;

    let entries = [
        ("abstime", legacy_type("abstime", 702), AbsoluteTime),
        ("tinterval", legacy_type("tinterval", 704), AbsoluteTime),
        ("bit", Type::BIT, BitString),
        ("bit varying", Type::VARBIT, BitString),
        ("bytea", Type::BYTEA, Bytes),
        ("boolean", Type::BOOL, Boolean),
        ("money", Type::MONEY, Decimal),
        ("numeric", Type::NUMERIC, Decimal),
        ("double precision", Type::FLOAT8, Double),
        ("real", Type::FLOAT4, Single),
        ("uuid", Type::UUID, Uuid),
        ("smallint", Type::INT2, Int16),
        ("smallserial", Type::INT2, Int16),
        ("integer", Type::INT4, Int32),
        ("serial", Type::INT4, Int32),
        ("bigint", Type::INT8, Int64),
        ("bigserial", Type::INT8, Int64),
        ("cid", Type::CID, Int32),
        ("oid", Type::OID, Int32),
        ("xid", Type::XID, Int32),
        ("regclass", Type::REGCLASS, Int32),
        ("regconfig", Type::REGCONFIG, Int32),
        ("regdictionary", Type::REGDICTIONARY, Int32),
        ("regoper", Type::REGOPER, Int32),
        ("regoperator", Type::REGOPERATOR, Int32),
        ("regproc", Type::REGPROC, Int32),
        ("regprocedure", Type::REGPROCEDURE, Int32),
        ("regtype", Type::REGTYPE, Int32),
        ("box", Type::BOX, Box),
        ("circle", Type::CIRCLE, Circle),
        ("lseg", Type::LSEG, LineSegment),
        ("path", Type::PATH, Path),
        ("point", Type::POINT, Point),
        ("polygon", Type::POLYGON, Polygon),
        ("date", Type::DATE, Date),
        ("interval", Type::INTERVAL, Interval),
        ("time with time zone", Type::TIMETZ, Time),
        ("time without time zone", Type::TIME, Time),
        ("timestamp with time zone", Type::TIMESTAMPTZ, TimestampTz),
        ("timestamp without time zone", Type::TIMESTAMP, Timestamp),
        ("cidr", Type::CIDR, Inet),
        ("inet", Type::INET, Inet),
        ("macaddr", Type::MACADDR, MacAddress),
        ("\"char\"", Type::CHAR, String),
        ("character", Type::BPCHAR, String),
        ("character varying", Type::VARCHAR, String),
        ("text", Type::TEXT, String),
        ("name", Type::NAME, String),
        ("refcursor", Type::REFCURSOR, String),
        ("json", Type::JSON, String),
        ("jsonb", Type::JSONB, String),
        ("xml", Type::XML, String),
        ("record", Type::RECORD, Record),
        ("void", Type::VOID, Void),
    ];

    let mut map = HashMap::new();
    for (name, wire_type, host_type) in entries {
        map.insert(
            name,
            TypeMapping {
                source_type: name,
                host_type,
                wire_type,
            },
        );
    }
    map
}
