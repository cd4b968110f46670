use crate::sql::{base::error::DbError, postgres::params::exact_numeric};
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use model::core::value::Value;
use std::str::FromStr;
use tokio_postgres::types::Type;

/// Converts a caller-supplied value into the variant the driver binds for
/// `ty`. Fixture cells usually arrive as text or as 64-bit integers; the
/// server will not accept an `int8` where an `int4` is declared.
pub(crate) fn coerce_value(column: &str, ty: &Type, value: Value) -> Result<Value, DbError> {
    if value.is_null() {
        return Ok(value);
    }

    let unsupported = |value: &Value| DbError::UnsupportedValue {
        column: column.to_string(),
        type_name: match value.host_type() {
            Some(host_type) => format!("{} (from {host_type})", ty.name()),
            None => ty.name().to_string(),
        },
    };

    let coerced = match *ty {
        Type::INT2 => value
            .as_i64()
            .and_then(|v| i16::try_from(v).ok())
            .map(Value::SmallInt),
        Type::INT4 => value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        Type::INT8 => value.as_i64().map(Value::Int),
        Type::FLOAT4 => as_f64(&value).map(|v| Value::Real(v as f32)),
        Type::FLOAT8 => as_f64(&value).map(Value::Float),
        Type::NUMERIC => as_decimal(&value)
            .filter(|v| exact_numeric(v).is_some())
            .map(Value::Decimal),
        Type::BOOL => match &value {
            Value::Boolean(v) => Some(Value::Boolean(*v)),
            Value::String(s) => parse_bool(s).map(Value::Boolean),
            other => other.as_i64().map(|v| Value::Boolean(v != 0)),
        },
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            Some(coerce_text_value(value.clone()))
        }
        Type::JSON | Type::JSONB => match &value {
            Value::Json(_) => Some(value.clone()),
            Value::String(s) => Some(Value::Json(
                serde_json::from_str(s).unwrap_or_else(|_| serde_json::Value::String(s.clone())),
            )),
            _ => None,
        },
        Type::UUID => match &value {
            Value::Uuid(_) => Some(value.clone()),
            Value::String(s) => uuid::Uuid::parse_str(s.trim()).ok().map(Value::Uuid),
            _ => None,
        },
        Type::DATE => match &value {
            Value::Date(_) => Some(value.clone()),
            Value::String(s) => NaiveDate::from_str(s.trim()).ok().map(Value::Date),
            _ => None,
        },
        Type::TIME => match &value {
            Value::Time(_) => Some(value.clone()),
            Value::TimestampNaive(v) => Some(Value::Time(v.time())),
            Value::String(s) => NaiveTime::from_str(s.trim()).ok().map(Value::Time),
            _ => None,
        },
        Type::TIMESTAMP => match &value {
            Value::TimestampNaive(_) => Some(value.clone()),
            Value::Timestamp(v) => Some(Value::TimestampNaive(v.naive_utc())),
            Value::String(s) => parse_naive_timestamp(s).map(Value::TimestampNaive),
            _ => None,
        },
        Type::TIMESTAMPTZ => match &value {
            Value::Timestamp(_) => Some(value.clone()),
            Value::TimestampNaive(v) => Some(Value::Timestamp(v.and_utc())),
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|v| v.with_timezone(&Utc))
                .ok()
                .or_else(|| parse_naive_timestamp(s).map(|v| v.and_utc()))
                .map(Value::Timestamp),
            _ => None,
        },
        _ => Some(value.clone()),
    };

    coerced.ok_or_else(|| unsupported(&value))
}

/// Bytes headed for a text column are read as UTF-8, lossily.
pub(crate) fn coerce_text_value(value: Value) -> Value {
    match value {
        Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Value::String(text),
            Err(err) => {
                let bytes = err.into_bytes();
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            }
        },
        Value::String(_) => value,
        other => other.as_string().map_or(other, Value::String),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Real(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::Decimal(v) => v.to_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_i64().map(|v| v as f64),
    }
}

fn as_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Decimal(v) => Some(v.clone()),
        Value::Real(v) => BigDecimal::from_f32(*v),
        Value::Float(v) => BigDecimal::from_f64(*v),
        Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
        other => other.as_i64().map(BigDecimal::from),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_naive_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::from_str(raw)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_integers_to_declared_width() {
        assert_eq!(
            coerce_value("id", &Type::INT4, Value::Int(42)).unwrap(),
            Value::Int32(42)
        );
        assert_eq!(
            coerce_value("id", &Type::INT2, Value::String("7".into())).unwrap(),
            Value::SmallInt(7)
        );
        assert_eq!(
            coerce_value("id", &Type::INT8, Value::Int32(5)).unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn out_of_range_integer_is_rejected() {
        let err = coerce_value("qty", &Type::INT2, Value::Int(70_000)).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedValue { ref column, .. } if column == "qty"));
    }

    #[test]
    fn text_cells_become_typed_values() {
        assert_eq!(
            coerce_value("price", &Type::NUMERIC, Value::String("12.50".into())).unwrap(),
            Value::Decimal(BigDecimal::from_str("12.50").unwrap())
        );
        assert_eq!(
            coerce_value("active", &Type::BOOL, Value::String("yes".into())).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            coerce_value("day", &Type::DATE, Value::String("2024-02-29".into())).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(matches!(
            coerce_value("at", &Type::TIMESTAMP, Value::String("2024-02-29 10:15:00".into())),
            Ok(Value::TimestampNaive(_))
        ));
    }

    #[test]
    fn decimal_beyond_numeric_precision_is_rejected() {
        let huge = Value::Decimal(BigDecimal::from_str("1e30").unwrap());
        let err = coerce_value("total", &Type::NUMERIC, huge).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedValue { ref column, .. } if column == "total"));

        assert!(
            coerce_value(
                "total",
                &Type::NUMERIC,
                Value::String("0.12345678901234567890123456789012".into())
            )
            .is_err()
        );
        assert!(coerce_value("total", &Type::NUMERIC, Value::Int(i64::MAX)).is_ok());
    }

    #[test]
    fn text_cells_bind_to_time_columns() {
        assert_eq!(
            coerce_value("opens", &Type::TIME, Value::String("08:30:00".into())).unwrap(),
            Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
        );
        assert_eq!(
            coerce_value("opens", &Type::TIME, Value::String("17:45:10.250".into())).unwrap(),
            Value::Time(NaiveTime::from_hms_milli_opt(17, 45, 10, 250).unwrap())
        );
        assert!(coerce_value("opens", &Type::TIME, Value::String("late".into())).is_err());
    }

    #[test]
    fn numbers_bound_to_text_become_strings() {
        assert_eq!(
            coerce_value("code", &Type::VARCHAR, Value::Int(12)).unwrap(),
            Value::String("12".into())
        );
        assert_eq!(
            coerce_value("code", &Type::TEXT, Value::Bytes(b"abc".to_vec())).unwrap(),
            Value::String("abc".into())
        );
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(
            coerce_value("id", &Type::INT4, Value::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn unparsable_text_is_rejected() {
        assert!(coerce_value("id", &Type::UUID, Value::String("nope".into())).is_err());
        assert!(coerce_value("n", &Type::INT4, Value::String("x".into())).is_err());
    }
}
