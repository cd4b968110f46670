use crate::sql::base::error::DbError;
use bigdecimal::BigDecimal;
use model::core::{identifiers::NameNormaliser, value::Value};
use rust_decimal::Decimal as RustDecimal;
use std::{collections::HashMap, str::FromStr};
use tokio_postgres::{
    Row,
    types::{FromSql, Type},
};

/// Reads every column of `row`, keyed by normalized column name.
pub fn row_values(
    row: &Row,
    normaliser: &dyn NameNormaliser,
) -> Result<HashMap<String, Value>, DbError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = column_value(row, idx, column.name(), column.type_())?;
            Ok((normaliser.normalise(column.name()), value))
        })
        .collect()
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Result<Option<T>, DbError> {
    Ok(row.try_get::<_, Option<T>>(idx)?)
}

pub fn column_value(row: &Row, idx: usize, name: &str, ty: &Type) -> Result<Value, DbError> {
    let value = match *ty {
        Type::INT2 => get::<i16>(row, idx)?.map_or(Value::Null, Value::SmallInt),
        Type::INT4 => get::<i32>(row, idx)?.map_or(Value::Null, Value::Int32),
        Type::INT8 => get::<i64>(row, idx)?.map_or(Value::Null, Value::Int),
        Type::OID => get::<u32>(row, idx)?.map_or(Value::Null, |v| Value::Int(v as i64)),
        Type::FLOAT4 => get::<f32>(row, idx)?.map_or(Value::Null, Value::Real),
        Type::FLOAT8 => get::<f64>(row, idx)?.map_or(Value::Null, Value::Float),
        Type::NUMERIC => match get::<RustDecimal>(row, idx)? {
            Some(decimal) => BigDecimal::from_str(&decimal.to_string())
                .map(Value::Decimal)
                .map_err(|_| DbError::UnsupportedValue {
                    column: name.to_string(),
                    type_name: ty.name().to_string(),
                })?,
            None => Value::Null,
        },
        Type::BOOL => get::<bool>(row, idx)?.map_or(Value::Null, Value::Boolean),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::XML => {
            get::<String>(row, idx)?.map_or(Value::Null, Value::String)
        }
        Type::CHAR => get::<i8>(row, idx)?
            .map_or(Value::Null, |v| Value::String((v as u8 as char).to_string())),
        Type::JSON | Type::JSONB => {
            get::<serde_json::Value>(row, idx)?.map_or(Value::Null, Value::Json)
        }
        Type::UUID => get::<uuid::Uuid>(row, idx)?.map_or(Value::Null, Value::Uuid),
        Type::BYTEA => get::<Vec<u8>>(row, idx)?.map_or(Value::Null, Value::Bytes),
        Type::DATE => get::<chrono::NaiveDate>(row, idx)?.map_or(Value::Null, Value::Date),
        Type::TIME => get::<chrono::NaiveTime>(row, idx)?.map_or(Value::Null, Value::Time),
        Type::TIMESTAMP => get::<chrono::NaiveDateTime>(row, idx)?
            .map_or(Value::Null, Value::TimestampNaive),
        Type::TIMESTAMPTZ => get::<chrono::DateTime<chrono::Utc>>(row, idx)?
            .map_or(Value::Null, Value::Timestamp),
        _ => {
            return Err(DbError::UnsupportedValue {
                column: name.to_string(),
                type_name: ty.name().to_string(),
            });
        }
    };
    Ok(value)
}
