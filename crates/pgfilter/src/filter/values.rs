//! Value-type bounds for generic filter descriptors.

use crate::value::{Value, ValueType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::fmt::Debug;

/// Value types a numeric filter can be bound to.
///
/// Bindable representations are i16, i32, i64, f32, f64 and [`Decimal`]. The remaining
/// primitive widths implement the trait so descriptors over them can still be built and
/// validated, but binding them fails with an unsupported-type error.
pub trait NumericValue: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Rust type name reported in unsupported-type errors.
    const TYPE_NAME: &'static str;

    /// Semantic type, or `None` when the representation cannot be bound.
    fn value_type() -> Option<ValueType>;

    /// Convert into a bound value, or `None` when the representation cannot be bound.
    fn to_value(self) -> Option<Value>;
}

macro_rules! impl_numeric {
    ($($ty:ty => $value_type:ident),* $(,)?) => {
        $(
            impl NumericValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn value_type() -> Option<ValueType> {
                    Some(ValueType::$value_type)
                }

                fn to_value(self) -> Option<Value> {
                    Some(Value::from(self))
                }
            }
        )*
    };
}

macro_rules! impl_numeric_unbindable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NumericValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn value_type() -> Option<ValueType> {
                    None
                }

                fn to_value(self) -> Option<Value> {
                    None
                }
            }
        )*
    };
}

impl_numeric! {
    i16 => SmallInt,
    i32 => Integer,
    i64 => BigInt,
    f32 => Real,
    f64 => Double,
    Decimal => Decimal,
}

impl_numeric_unbindable!(i8, u8, u16, u32, u64);

/// Value types a date/time filter can be bound to.
pub trait DateValue: Copy + PartialOrd + Debug + Send + Sync + 'static {
    fn value_type() -> ValueType;
    fn to_value(self) -> Value;
}

impl DateValue for NaiveDate {
    fn value_type() -> ValueType {
        ValueType::Date
    }

    fn to_value(self) -> Value {
        Value::Date(self)
    }
}

impl DateValue for NaiveDateTime {
    fn value_type() -> ValueType {
        ValueType::Timestamp
    }

    fn to_value(self) -> Value {
        Value::Timestamp(self)
    }
}

impl DateValue for DateTime<Utc> {
    fn value_type() -> ValueType {
        ValueType::TimestampTz
    }

    fn to_value(self) -> Value {
        Value::TimestampTz(self)
    }
}

/// A discrete-valued type usable in an enumeration filter.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Status { Active = 1, Banned = 2 }
///
/// impl FilterEnum for Status {
///     fn name(&self) -> &'static str {
///         match self { Status::Active => "Active", Status::Banned => "Banned" }
///     }
///     fn discriminant(&self) -> i32 { *self as i32 }
/// }
/// ```
pub trait FilterEnum: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Name stored when the column holds the variant name.
    fn name(&self) -> &'static str;

    /// Numeric value stored when the column holds the discriminant.
    fn discriminant(&self) -> i32;
}

/// A bit-flag type usable in a flags filter.
///
/// Flags are always bound as a 64-bit integer regardless of the underlying width.
pub trait FlagEnum: Copy + PartialEq + Debug + Send + Sync + 'static {
    fn bits(&self) -> i64;
}
