//! Per-kind validators.

use super::FilterValidator;
use super::common::Findings;
use super::ident::is_identifier;
use super::rules::{PaginationRules, StringRules, ValueRules};
use crate::error::{FieldError, FilterKind};
use crate::filter::{
    BooleanFilter, DateFilter, DateValue, EnumFilter, FilterEnum, FlagEnum, FlagsFilter,
    FullTextSearchFilter, IdFilter, NumericFilter, NumericValue, PaginationFilter, SearchFilter,
    StringFilter,
};
use uuid::Uuid;

impl FilterValidator for BooleanFilter {
    type Rules = ();
    const KIND: FilterKind = FilterKind::Boolean;

    fn validate_with(&self, _rules: &()) -> Vec<FieldError> {
        let mut f = Findings::new();
        f.exclusive("eq", self.eq.is_some(), "neq", self.neq.is_some());
        f.into_errors()
    }
}

/// Shared body of the date and numeric validators, which have the same shape.
macro_rules! validate_ranged {
    ($self:ident, $rules:ident) => {{
        let mut f = Findings::new();
        f.exclusive("eq", $self.eq.is_some(), "neq", $self.neq.is_some());
        f.range(
            $self.gt.as_ref(),
            $self.gte.as_ref(),
            $self.lt.as_ref(),
            $self.lte.as_ref(),
        );
        f.array("in", $self.in_list.as_deref());
        f.array("not_in", $self.not_in.as_deref());
        for (field, value) in [
            ("eq", &$self.eq),
            ("neq", &$self.neq),
            ("gt", &$self.gt),
            ("gte", &$self.gte),
            ("lt", &$self.lt),
            ("lte", &$self.lte),
        ] {
            f.custom(field, value.as_ref(), &$rules.value);
        }
        f.into_errors()
    }};
}

impl<T: DateValue> FilterValidator for DateFilter<T> {
    type Rules = ValueRules<T>;
    const KIND: FilterKind = FilterKind::Date;

    fn validate_with(&self, rules: &ValueRules<T>) -> Vec<FieldError> {
        validate_ranged!(self, rules)
    }
}

impl<T: NumericValue> FilterValidator for NumericFilter<T> {
    type Rules = ValueRules<T>;
    const KIND: FilterKind = FilterKind::Numeric;

    fn validate_with(&self, rules: &ValueRules<T>) -> Vec<FieldError> {
        validate_ranged!(self, rules)
    }
}

impl<E: FilterEnum> FilterValidator for EnumFilter<E> {
    type Rules = ValueRules<E>;
    const KIND: FilterKind = FilterKind::Enum;

    fn validate_with(&self, rules: &ValueRules<E>) -> Vec<FieldError> {
        let mut f = Findings::new();
        f.exclusive("eq", self.eq.is_some(), "neq", self.neq.is_some());
        f.array("in", self.in_list.as_deref());
        f.array("not_in", self.not_in.as_deref());
        f.custom("eq", self.eq.as_ref(), &rules.value);
        f.custom("neq", self.neq.as_ref(), &rules.value);
        f.into_errors()
    }
}

impl<E: FlagEnum> FilterValidator for FlagsFilter<E> {
    type Rules = ValueRules<E>;
    const KIND: FilterKind = FilterKind::Flags;

    fn validate_with(&self, rules: &ValueRules<E>) -> Vec<FieldError> {
        let mut f = Findings::new();
        for (field, flag) in [("has_flag", &self.has_flag), ("not_has_flag", &self.not_has_flag)] {
            if let Some(flag) = flag
                && flag.bits() == 0
            {
                f.push(field, "flag must have at least one bit set");
            }
            f.custom(field, flag.as_ref(), &rules.value);
        }
        if let (Some(has), Some(not_has)) = (&self.has_flag, &self.not_has_flag)
            && has.bits() & !not_has.bits() == 0
        {
            f.push(
                "has_flag/not_has_flag",
                "every has_flag bit is excluded by not_has_flag",
            );
        }
        f.into_errors()
    }
}

impl FilterValidator for IdFilter {
    type Rules = ValueRules<Uuid>;
    const KIND: FilterKind = FilterKind::Id;

    fn validate_with(&self, rules: &ValueRules<Uuid>) -> Vec<FieldError> {
        let mut f = Findings::new();
        f.exclusive("eq", self.eq.is_some(), "neq", self.neq.is_some());
        f.array("in", self.in_list.as_deref());
        f.array("not_in", self.not_in.as_deref());
        f.custom("eq", self.eq.as_ref(), &rules.value);
        f.custom("neq", self.neq.as_ref(), &rules.value);
        f.into_errors()
    }
}

impl FilterValidator for StringFilter {
    type Rules = StringRules;
    const KIND: FilterKind = FilterKind::String;

    fn validate_with(&self, rules: &StringRules) -> Vec<FieldError> {
        let mut f = Findings::new();
        f.exclusive("eq", self.eq.is_some(), "neq", self.neq.is_some());
        f.array("in", self.in_list.as_deref());
        f.array("not_in", self.not_in.as_deref());
        for (field, value) in [
            ("eq", &self.eq),
            ("neq", &self.neq),
            ("contains", &self.contains),
            ("starts_with", &self.starts_with),
            ("ends_with", &self.ends_with),
        ] {
            f.custom(field, value.as_deref(), &rules.value);
        }
        for (field, values) in [("in", &self.in_list), ("not_in", &self.not_in)] {
            let Some(values) = values else {
                continue;
            };
            for value in values.iter().flatten() {
                f.custom(field, Some(value.as_str()), &rules.value);
            }
            let present: Vec<String> = values.iter().flatten().cloned().collect();
            f.custom(field, Some(present.as_slice()), &rules.array);
        }
        f.into_errors()
    }
}

impl FilterValidator for SearchFilter {
    type Rules = ();
    const KIND: FilterKind = FilterKind::Search;

    fn validate_with(&self, _rules: &()) -> Vec<FieldError> {
        let mut f = Findings::new();
        if self.term.trim().is_empty() {
            f.push("term", "must not be empty");
        }
        f.into_errors()
    }
}

impl FilterValidator for FullTextSearchFilter {
    type Rules = ();
    const KIND: FilterKind = FilterKind::FullTextSearch;

    fn validate_with(&self, _rules: &()) -> Vec<FieldError> {
        let mut f = Findings::new();
        if self.term.trim().is_empty() {
            f.push("term", "must not be empty");
        }
        if let Some(config) = &self.config
            && !is_identifier(config)
        {
            f.push("config", "must be a valid text search configuration name");
        }
        f.into_errors()
    }
}

impl FilterValidator for PaginationFilter {
    type Rules = PaginationRules;
    const KIND: FilterKind = FilterKind::Pagination;

    fn validate_with(&self, rules: &PaginationRules) -> Vec<FieldError> {
        let mut f = Findings::new();
        if self.limit <= 0 {
            f.push("limit", "must be greater than 0");
        }
        if self.page <= 0 {
            f.push("page", "must be greater than 0");
        } else if self.limit > 0 && self.checked_offset().is_none() {
            f.push("page", "offset does not fit in a 64-bit integer");
        }
        if let Some(max) = rules.max_limit
            && self.limit > max
        {
            f.push("limit", format!("must not exceed {max}"));
        }
        f.into_errors()
    }
}
