//! Bound parameter values and the named parameter bag.
//!
//! [`Value`] is a closed set of the representations the filter layer binds. It implements
//! [`ToSql`] by delegating to the wrapped value, so a [`Params`] bag can be handed straight
//! to `tokio-postgres` once the statement has been converted to positional placeholders.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// Semantic type of a bound value, used to pick a cast for JSON-path columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal,
    Text,
    Date,
    Timestamp,
    TimestampTz,
    Uuid,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "bool",
            ValueType::SmallInt => "i16",
            ValueType::Integer => "i32",
            ValueType::BigInt => "i64",
            ValueType::Real => "f32",
            ValueType::Double => "f64",
            ValueType::Decimal => "Decimal",
            ValueType::Text => "String",
            ValueType::Date => "NaiveDate",
            ValueType::Timestamp => "NaiveDateTime",
            ValueType::TimestampTz => "DateTime<Utc>",
            ValueType::Uuid => "Uuid",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    BoolArray(Vec<bool>),
    SmallIntArray(Vec<i16>),
    IntArray(Vec<i32>),
    BigIntArray(Vec<i64>),
    RealArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    DecimalArray(Vec<Decimal>),
    TextArray(Vec<String>),
    DateArray(Vec<NaiveDate>),
    TimestampArray(Vec<NaiveDateTime>),
    TimestampTzArray(Vec<DateTime<Utc>>),
    UuidArray(Vec<Uuid>),
}

impl Value {
    /// Collect scalar values of one type into the matching array variant.
    ///
    /// Returns `None` if the values are not all scalars of the same type.
    pub fn array(values: Vec<Value>) -> Option<Value> {
        macro_rules! collect_as {
            ($values:expr, $scalar:ident, $array:ident) => {{
                let mut out = Vec::with_capacity($values.len());
                for v in $values {
                    match v {
                        Value::$scalar(inner) => out.push(inner),
                        _ => return None,
                    }
                }
                Some(Value::$array(out))
            }};
        }

        let first = values.first()?;
        if first.is_array() {
            return None;
        }
        match first.value_type() {
            ValueType::Boolean => collect_as!(values, Bool, BoolArray),
            ValueType::SmallInt => collect_as!(values, SmallInt, SmallIntArray),
            ValueType::Integer => collect_as!(values, Int, IntArray),
            ValueType::BigInt => collect_as!(values, BigInt, BigIntArray),
            ValueType::Real => collect_as!(values, Real, RealArray),
            ValueType::Double => collect_as!(values, Double, DoubleArray),
            ValueType::Decimal => collect_as!(values, Decimal, DecimalArray),
            ValueType::Text => collect_as!(values, Text, TextArray),
            ValueType::Date => collect_as!(values, Date, DateArray),
            ValueType::Timestamp => collect_as!(values, Timestamp, TimestampArray),
            ValueType::TimestampTz => collect_as!(values, TimestampTz, TimestampTzArray),
            ValueType::Uuid => collect_as!(values, Uuid, UuidArray),
        }
    }

    /// Semantic type of the value (element type for arrays).
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) | Value::BoolArray(_) => ValueType::Boolean,
            Value::SmallInt(_) | Value::SmallIntArray(_) => ValueType::SmallInt,
            Value::Int(_) | Value::IntArray(_) => ValueType::Integer,
            Value::BigInt(_) | Value::BigIntArray(_) => ValueType::BigInt,
            Value::Real(_) | Value::RealArray(_) => ValueType::Real,
            Value::Double(_) | Value::DoubleArray(_) => ValueType::Double,
            Value::Decimal(_) | Value::DecimalArray(_) => ValueType::Decimal,
            Value::Text(_) | Value::TextArray(_) => ValueType::Text,
            Value::Date(_) | Value::DateArray(_) => ValueType::Date,
            Value::Timestamp(_) | Value::TimestampArray(_) => ValueType::Timestamp,
            Value::TimestampTz(_) | Value::TimestampTzArray(_) => ValueType::TimestampTz,
            Value::Uuid(_) | Value::UuidArray(_) => ValueType::Uuid,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::BoolArray(_)
                | Value::SmallIntArray(_)
                | Value::IntArray(_)
                | Value::BigIntArray(_)
                | Value::RealArray(_)
                | Value::DoubleArray(_)
                | Value::DecimalArray(_)
                | Value::TextArray(_)
                | Value::DateArray(_)
                | Value::TimestampArray(_)
                | Value::TimestampTzArray(_)
                | Value::UuidArray(_)
        )
    }

    fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            Value::Bool(v) => v,
            Value::SmallInt(v) => v,
            Value::Int(v) => v,
            Value::BigInt(v) => v,
            Value::Real(v) => v,
            Value::Double(v) => v,
            Value::Decimal(v) => v,
            Value::Text(v) => v,
            Value::Date(v) => v,
            Value::Timestamp(v) => v,
            Value::TimestampTz(v) => v,
            Value::Uuid(v) => v,
            Value::BoolArray(v) => v,
            Value::SmallIntArray(v) => v,
            Value::IntArray(v) => v,
            Value::BigIntArray(v) => v,
            Value::RealArray(v) => v,
            Value::DoubleArray(v) => v,
            Value::DecimalArray(v) => v,
            Value::TextArray(v) => v,
            Value::DateArray(v) => v,
            Value::TimestampArray(v) => v,
            Value::TimestampTzArray(v) => v,
            Value::UuidArray(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        // The wrapped value performs its own type check.
        self.as_to_sql().to_sql_checked(ty, out)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    f32 => Real,
    f64 => Double,
    Decimal => Decimal,
    String => Text,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// Ordered mapping from unique parameter name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter, keeping the original position on replace.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The bag as a JSON object, for logging and debugging.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(n, v)| {
                let json = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
                (n.clone(), json)
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_collects_matching_scalars() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(arr, Value::IntArray(vec![1, 2]));
        assert!(arr.is_array());
        assert_eq!(arr.value_type(), ValueType::Integer);
    }

    #[test]
    fn array_rejects_mixed_or_empty() {
        assert!(Value::array(vec![Value::Int(1), Value::BigInt(2)]).is_none());
        assert!(Value::array(Vec::new()).is_none());
    }

    #[test]
    fn params_replace_keeps_position() {
        let mut params = Params::new();
        params.set("a", Value::Int(1));
        params.set("b", Value::Int(2));
        params.set("a", Value::Int(3));
        assert_eq!(params.len(), 2);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn params_to_json() {
        let mut params = Params::new();
        params.set("users_is_active_eq_0", Value::Bool(true));
        params.set("users_name_in_1", Value::TextArray(vec!["a".into(), "b".into()]));
        assert_eq!(
            params.to_json(),
            serde_json::json!({
                "users_is_active_eq_0": true,
                "users_name_in_1": ["a", "b"],
            })
        );
    }

    #[test]
    fn value_binds_through_wrapped_type() {
        let mut buf = BytesMut::new();
        Value::BigInt(42).to_sql_checked(&Type::INT8, &mut buf).unwrap();
        assert_eq!(&buf[..], &42i64.to_be_bytes());

        let mut buf = BytesMut::new();
        assert!(Value::BigInt(42).to_sql_checked(&Type::TEXT, &mut buf).is_err());
    }
}
