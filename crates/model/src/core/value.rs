use crate::core::host_type::HostType;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A value supplied for, or read back from, a bound parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    SmallInt(i16),
    Int32(i32),
    Int(i64),
    Real(f32),
    Float(f64),
    Decimal(BigDecimal),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    TimestampNaive(NaiveDateTime),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::SmallInt(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int(v) => Some(*v),
            Value::String(v) => v.parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::SmallInt(v) => Some(v.to_string()),
            Value::Int32(v) => Some(v.to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::Real(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Decimal(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Json(v) => Some(v.to_string()),
            Value::Uuid(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.to_string()),
            Value::Time(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(v.to_rfc3339()),
            Value::TimestampNaive(v) => Some(v.to_string()),
            Value::Bytes(_) | Value::Null => None,
        }
    }

    /// Host type this value naturally binds to, `None` for NULL.
    pub fn host_type(&self) -> Option<HostType> {
        match self {
            Value::SmallInt(_) => Some(HostType::Int16),
            Value::Int32(_) => Some(HostType::Int32),
            Value::Int(_) => Some(HostType::Int64),
            Value::Real(_) => Some(HostType::Single),
            Value::Float(_) => Some(HostType::Double),
            Value::Decimal(_) => Some(HostType::Decimal),
            Value::String(_) | Value::Json(_) => Some(HostType::String),
            Value::Boolean(_) => Some(HostType::Boolean),
            Value::Uuid(_) => Some(HostType::Uuid),
            Value::Bytes(_) => Some(HostType::Bytes),
            Value::Date(_) => Some(HostType::Date),
            Value::Time(_) => Some(HostType::Time),
            Value::Timestamp(_) => Some(HostType::TimestampTz),
            Value::TimestampNaive(_) => Some(HostType::Timestamp),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("{byte:02x}"));
                write!(f, "\\x{hex}")
            }
            Value::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.as_string().unwrap_or_default()),
        }
    }
}
