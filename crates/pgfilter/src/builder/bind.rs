use super::{FilterQuery, Step};
use crate::column::ColumnRef;
use crate::dialect::{CompareOp, EqualityOp, FlagOp, MembershipOp, PatternOp};
use crate::error::{FilterError, FilterResult};
use crate::filter::{
    BooleanFilter, DateFilter, DateValue, EnumFilter, EnumFilterMode, FilterEnum, FlagEnum,
    FlagsFilter, IdFilter, NumericFilter, NumericValue, Sort, StringFilter,
};
use crate::validate::{StringRules, ValueRules};
use crate::value::{Value, ValueType};

/// The fields shared by range-capable descriptors, borrowed.
struct RangeFields<'f, T> {
    scalars: [(CompareOp, Option<T>); 6],
    in_list: Option<&'f [Option<T>]>,
    not_in: Option<&'f [Option<T>]>,
    is_null: Option<bool>,
    sort: Option<Sort>,
}

macro_rules! range_fields {
    ($filter:expr) => {{
        let f = $filter;
        RangeFields {
            scalars: [
                (CompareOp::Eq, f.eq),
                (CompareOp::NotEq, f.neq),
                (CompareOp::Gt, f.gt),
                (CompareOp::Gte, f.gte),
                (CompareOp::Lt, f.lt),
                (CompareOp::Lte, f.lte),
            ],
            in_list: f.in_list.as_deref(),
            not_in: f.not_in.as_deref(),
            is_null: f.is_null,
            sort: f.sort,
        }
    }};
}

/// Convert every value up front so that a conversion failure leaves no trace.
fn range_steps<T: Copy>(
    fields: &RangeFields<'_, T>,
    convert: impl Fn(T) -> FilterResult<Value>,
    column: &str,
) -> FilterResult<Vec<Step>> {
    let mut steps = Vec::new();
    for (op, value) in &fields.scalars {
        if let Some(value) = value {
            steps.push(Step::Compare(*op, convert(*value)?));
        }
    }
    for (op, values) in [
        (MembershipOp::In, fields.in_list),
        (MembershipOp::NotIn, fields.not_in),
    ] {
        if let Some(values) = values {
            let converted = values
                .iter()
                .flatten()
                .map(|v| convert(*v))
                .collect::<FilterResult<Vec<_>>>()?;
            steps.push(Step::Member(op, array_value(converted, column)?));
        }
    }
    if let Some(is_null) = fields.is_null {
        steps.push(Step::Null(is_null));
    }
    Ok(steps)
}

fn array_value(values: Vec<Value>, column: &str) -> FilterResult<Value> {
    let type_name = values
        .first()
        .map(|v| v.value_type().as_str())
        .unwrap_or("empty array");
    Value::array(values).ok_or_else(|| FilterError::unsupported_type(type_name, column))
}

fn enum_value<E: FilterEnum>(value: E, mode: EnumFilterMode) -> Value {
    match mode {
        EnumFilterMode::ByValue => Value::Int(value.discriminant()),
        EnumFilterMode::ByName => Value::Text(value.name().to_string()),
        EnumFilterMode::ByValueAsString => Value::Text(value.discriminant().to_string()),
    }
}

fn present<T: Clone>(values: &Option<Vec<Option<T>>>) -> Option<Vec<T>> {
    values
        .as_ref()
        .map(|values| values.iter().flatten().cloned().collect())
}

impl FilterQuery {
    /// Resolve `column` to SQL for values of type `ty`.
    fn resolve(&self, column: &str, ty: ValueType) -> FilterResult<String> {
        ColumnRef::new(&self.table, column).to_sql(self.dialect.as_ref(), ty)
    }

    pub fn bind_boolean(
        &mut self,
        column: &str,
        filter: Option<&BooleanFilter>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, &())? else {
            return Ok(self);
        };
        let sql = self.resolve(column, ValueType::Boolean)?;

        let mut steps = Vec::new();
        if let Some(v) = filter.eq {
            steps.push(Step::Equal(EqualityOp::Eq, Value::Bool(v)));
        }
        if let Some(v) = filter.neq {
            steps.push(Step::Equal(EqualityOp::NotEq, Value::Bool(v)));
        }
        if let Some(is_null) = filter.is_null {
            steps.push(Step::Null(is_null));
        }
        self.apply(column, sql, steps, filter.sort)?;
        Ok(self)
    }

    pub fn bind_date<T: DateValue>(
        &mut self,
        column: &str,
        filter: Option<&DateFilter<T>>,
    ) -> FilterResult<&mut Self> {
        self.bind_date_with(column, filter, &ValueRules::default())
    }

    pub fn bind_date_with<T: DateValue>(
        &mut self,
        column: &str,
        filter: Option<&DateFilter<T>>,
        rules: &ValueRules<T>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let sql = self.resolve(column, T::value_type())?;
        let fields = range_fields!(filter);
        let steps = range_steps(&fields, |v: T| Ok(v.to_value()), column)?;
        self.apply(column, sql, steps, fields.sort)?;
        Ok(self)
    }

    pub fn bind_numeric<T: NumericValue>(
        &mut self,
        column: &str,
        filter: Option<&NumericFilter<T>>,
    ) -> FilterResult<&mut Self> {
        self.bind_numeric_with(column, filter, &ValueRules::default())
    }

    /// Bind a numeric filter.
    ///
    /// Only i16, i32, i64, f32, f64 and `Decimal` can be bound; any other representation
    /// fails with [`FilterError::UnsupportedType`] once the descriptor has validated.
    pub fn bind_numeric_with<T: NumericValue>(
        &mut self,
        column: &str,
        filter: Option<&NumericFilter<T>>,
        rules: &ValueRules<T>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let ty = T::value_type().ok_or_else(|| FilterError::unsupported_type(T::TYPE_NAME, column))?;
        let sql = self.resolve(column, ty)?;
        let fields = range_fields!(filter);
        let steps = range_steps(
            &fields,
            |v: T| {
                v.to_value()
                    .ok_or_else(|| FilterError::unsupported_type(T::TYPE_NAME, column))
            },
            column,
        )?;
        self.apply(column, sql, steps, fields.sort)?;
        Ok(self)
    }

    pub fn bind_enum<E: FilterEnum>(
        &mut self,
        column: &str,
        filter: Option<&EnumFilter<E>>,
    ) -> FilterResult<&mut Self> {
        self.bind_enum_with(column, filter, &ValueRules::default())
    }

    /// Bind an enumeration filter; the descriptor's mode decides how values are stored.
    pub fn bind_enum_with<E: FilterEnum>(
        &mut self,
        column: &str,
        filter: Option<&EnumFilter<E>>,
        rules: &ValueRules<E>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let mode = filter.mode;
        let sql = ColumnRef::new(&self.table, column).to_sql_for_enum(self.dialect.as_ref(), mode)?;

        let mut steps = Vec::new();
        if let Some(v) = filter.eq {
            steps.push(Step::Equal(EqualityOp::Eq, enum_value(v, mode)));
        }
        if let Some(v) = filter.neq {
            steps.push(Step::Equal(EqualityOp::NotEq, enum_value(v, mode)));
        }
        for (op, values) in [
            (MembershipOp::In, present(&filter.in_list)),
            (MembershipOp::NotIn, present(&filter.not_in)),
        ] {
            if let Some(values) = values {
                let values = values.into_iter().map(|v| enum_value(v, mode)).collect();
                steps.push(Step::Member(op, array_value(values, column)?));
            }
        }
        if let Some(is_null) = filter.is_null {
            steps.push(Step::Null(is_null));
        }
        self.apply(column, sql, steps, filter.sort)?;
        Ok(self)
    }

    pub fn bind_flags<E: FlagEnum>(
        &mut self,
        column: &str,
        filter: Option<&FlagsFilter<E>>,
    ) -> FilterResult<&mut Self> {
        self.bind_flags_with(column, filter, &ValueRules::default())
    }

    pub fn bind_flags_with<E: FlagEnum>(
        &mut self,
        column: &str,
        filter: Option<&FlagsFilter<E>>,
        rules: &ValueRules<E>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let sql = self.resolve(column, ValueType::BigInt)?;

        let mut steps = Vec::new();
        if let Some(flag) = filter.has_flag {
            steps.push(Step::Flag(FlagOp::Has, flag.bits()));
        }
        if let Some(flag) = filter.not_has_flag {
            steps.push(Step::Flag(FlagOp::NotHas, flag.bits()));
        }
        if let Some(is_null) = filter.is_null {
            steps.push(Step::Null(is_null));
        }
        self.apply(column, sql, steps, filter.sort)?;
        Ok(self)
    }

    pub fn bind_id(&mut self, column: &str, filter: Option<&IdFilter>) -> FilterResult<&mut Self> {
        self.bind_id_with(column, filter, &ValueRules::default())
    }

    pub fn bind_id_with(
        &mut self,
        column: &str,
        filter: Option<&IdFilter>,
        rules: &ValueRules<uuid::Uuid>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let sql = self.resolve(column, ValueType::Uuid)?;

        let mut steps = Vec::new();
        if let Some(v) = filter.eq {
            steps.push(Step::Compare(CompareOp::Eq, Value::Uuid(v)));
        }
        if let Some(v) = filter.neq {
            steps.push(Step::Compare(CompareOp::NotEq, Value::Uuid(v)));
        }
        for (op, values) in [
            (MembershipOp::In, present(&filter.in_list)),
            (MembershipOp::NotIn, present(&filter.not_in)),
        ] {
            if let Some(values) = values {
                steps.push(Step::Member(op, Value::UuidArray(values)));
            }
        }
        if let Some(is_null) = filter.is_null {
            steps.push(Step::Null(is_null));
        }
        self.apply(column, sql, steps, filter.sort)?;
        Ok(self)
    }

    pub fn bind_string(
        &mut self,
        column: &str,
        filter: Option<&StringFilter>,
    ) -> FilterResult<&mut Self> {
        self.bind_string_with(column, filter, &StringRules::default())
    }

    /// Bind a text filter. Unless `case_sensitive` is set, both sides are compared
    /// lower-cased and pattern terms have their `LIKE` metacharacters escaped.
    pub fn bind_string_with(
        &mut self,
        column: &str,
        filter: Option<&StringFilter>,
        rules: &StringRules,
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare(column, filter, rules)? else {
            return Ok(self);
        };
        let sql = self.resolve(column, ValueType::Text)?;
        let cs = filter.case_sensitive;

        let mut steps = Vec::new();
        if let Some(v) = &filter.eq {
            steps.push(Step::TextEqual(EqualityOp::Eq, v.clone(), cs));
        }
        if let Some(v) = &filter.neq {
            steps.push(Step::TextEqual(EqualityOp::NotEq, v.clone(), cs));
        }
        for (op, value) in [
            (PatternOp::Contains, &filter.contains),
            (PatternOp::StartsWith, &filter.starts_with),
            (PatternOp::EndsWith, &filter.ends_with),
        ] {
            if let Some(v) = value {
                steps.push(Step::Pattern(op, v.clone(), cs));
            }
        }
        for (op, values) in [
            (MembershipOp::In, present(&filter.in_list)),
            (MembershipOp::NotIn, present(&filter.not_in)),
        ] {
            if let Some(values) = values {
                steps.push(Step::TextMember(op, values, cs));
            }
        }
        if let Some(is_null) = filter.is_null {
            steps.push(Step::Null(is_null));
        }
        self.apply(column, sql, steps, filter.sort)?;
        Ok(self)
    }
}
