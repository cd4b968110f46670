use crate::sql::base::error::DbError;
use bigdecimal::BigDecimal;
use bytes::BytesMut;
use lazy_static::lazy_static;
use model::core::value::Value;
use planner::query::dialect::Dialect;
use regex::{Captures, Regex};
use rust_decimal::Decimal as RustDecimal;
use std::{error::Error, str::FromStr};
use tokio_postgres::types::{IsNull, Json as PgJson, ToSql, Type, to_sql_checked};

lazy_static! {
    // A leading `::` is a cast, not a bind variable; it is matched so it can be skipped.
    static ref PARAM_NAME: Regex =
        Regex::new(r":{1,2}([A-Za-z0-9_]+)").expect("parameter name pattern is valid");
}

/// SQL text written with named bind variables (`:name`), rewritten to the
/// driver's positional placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    pub sql: String,
    /// Distinct parameter names; the name at index `i` binds to placeholder `i`.
    pub names: Vec<String>,
}

impl NamedQuery {
    pub fn parse(sql: &str, dialect: &dyn Dialect) -> Self {
        let mut names: Vec<String> = Vec::new();
        let rewritten = PARAM_NAME.replace_all(sql, |caps: &Captures| {
            let whole = &caps[0];
            if whole.starts_with("::") {
                return whole.to_string();
            }

            let name = &caps[1];
            let index = match names.iter().position(|n| n == name) {
                Some(index) => index,
                None => {
                    names.push(name.to_string());
                    names.len() - 1
                }
            };
            dialect.positional_placeholder(index)
        });

        NamedQuery {
            sql: rewritten.into_owned(),
            names,
        }
    }
}

/// SQL NULL for a parameter of any declared type.
#[derive(Debug)]
struct PgNull;

impl ToSql for PgNull {
    fn to_sql(
        &self,
        _ty: &Type,
        _out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        Ok(IsNull::Yes)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// `value` as a driver `NUMERIC`, or `None` when it cannot be represented
/// without rounding (more than 28 digits of scale or 96 bits of mantissa).
pub(crate) fn exact_numeric(value: &BigDecimal) -> Option<RustDecimal> {
    let text = value.to_string();
    let decimal = RustDecimal::from_str_exact(&text)
        .or_else(|_| RustDecimal::from_scientific(&text))
        .ok()?;
    let round_trip = BigDecimal::from_str(&decimal.to_string()).ok()?;
    (round_trip == *value).then_some(decimal)
}

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_value(value: Value) -> Result<Self, DbError> {
        let param = match value {
            Value::SmallInt(v) => PgParam(Box::new(v)),
            Value::Int32(v) => PgParam(Box::new(v)),
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Real(v) => PgParam(Box::new(v)),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::Decimal(v) => match exact_numeric(&v) {
                Some(decimal) => PgParam(Box::new(decimal)),
                None => return Err(DbError::NumericOutOfRange(v.to_string())),
            },
            Value::String(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Json(v) => PgParam(Box::new(PgJson(v))),
            Value::Uuid(v) => PgParam(Box::new(v)),
            Value::Bytes(v) => PgParam(Box::new(v)),
            Value::Date(v) => PgParam(Box::new(v)),
            Value::Time(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::TimestampNaive(v) => PgParam(Box::new(v)),
            Value::Null => PgParam(Box::new(PgNull)),
        };
        Ok(param)
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: Vec<Value>) -> Result<Self, DbError> {
        let params = values
            .into_iter()
            .map(PgParam::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { params })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::query::dialect::Postgres;

    #[test]
    fn rewrites_named_parameters_to_positional() {
        let query = NamedQuery::parse(
            "insert into T(a,b) values (:a,:b) returning c",
            &Postgres,
        );
        assert_eq!(query.sql, "insert into T(a,b) values ($1,$2) returning c");
        assert_eq!(query.names, vec!["a", "b"]);
    }

    #[test]
    fn repeated_names_share_a_placeholder() {
        let query = NamedQuery::parse(
            "select 1 from a where x=:0 and y=:1 union all select 2 from b where x=:0 and y=:1",
            &Postgres,
        );
        assert_eq!(
            query.sql,
            "select 1 from a where x=$1 and y=$2 union all select 2 from b where x=$1 and y=$2"
        );
        assert_eq!(query.names, vec!["0", "1"]);
    }

    #[test]
    fn casts_are_not_parameters() {
        let query = NamedQuery::parse("select :value::text, now()::date", &Postgres);
        assert_eq!(query.sql, "select $1::text, now()::date");
        assert_eq!(query.names, vec!["value"]);
    }

    #[test]
    fn names_keep_first_appearance_order() {
        let query = NamedQuery::parse("update t set b=:b_1 where a=:A and b=:b_1", &Postgres);
        assert_eq!(query.names, vec!["b_1", "A"]);
        assert!(NamedQuery::parse("select now()::date", &Postgres).names.is_empty());
    }

    #[test]
    fn param_store_keeps_value_order() {
        let store = PgParamStore::from_values(vec![
            Value::Int(1),
            Value::String("x".into()),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(store.as_refs().len(), 3);
    }

    #[test]
    fn decimals_bind_exactly_or_not_at_all() {
        let price = BigDecimal::from_str("12345.6789").unwrap();
        assert_eq!(
            exact_numeric(&price),
            Some(RustDecimal::from_str("12345.6789").unwrap())
        );

        let huge = BigDecimal::from_str("1e30").unwrap();
        assert_eq!(exact_numeric(&huge), None);
        let precise = BigDecimal::from_str("0.12345678901234567890123456789012").unwrap();
        assert_eq!(exact_numeric(&precise), None);

        let err = PgParamStore::from_values(vec![Value::Decimal(huge)])
            .err()
            .unwrap();
        assert!(matches!(err, DbError::NumericOutOfRange(_)));
    }
}
