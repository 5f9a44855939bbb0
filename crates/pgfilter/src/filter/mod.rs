//! Filter descriptors.
//!
//! Descriptors are inert records describing one column's filtering and sorting intent.
//! They are usually deserialized from request input; every field is optional and the
//! wire names are `eq`, `neq`, `gt`, `gte`, `lt`, `lte`, `in`, `not_in`, `is_null`, `sort`.
//!
//! Array fields hold `Option<T>` elements so that a `null` element in the input is kept
//! and reported by validation instead of being silently dropped.

mod values;

pub use values::{DateValue, FilterEnum, FlagEnum, NumericValue};

use serde::Deserialize;
use uuid::Uuid;

/// Sort directive attached to a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Sort {
    /// Position in the ORDER BY list (ascending; ties keep bind order).
    pub position: i32,
    pub descending: bool,
}

impl Sort {
    pub fn asc(position: i32) -> Self {
        Self {
            position,
            descending: false,
        }
    }

    pub fn desc(position: i32) -> Self {
        Self {
            position,
            descending: true,
        }
    }
}

fn wrap_all<T>(values: impl IntoIterator<Item = T>) -> Vec<Option<T>> {
    values.into_iter().map(Some).collect()
}

/// Chainable setters shared by every descriptor with a sort and a null check.
macro_rules! common_setters {
    () => {
        /// Filter on `IS NULL` (`true`) or `IS NOT NULL` (`false`).
        pub fn is_null(mut self, is_null: bool) -> Self {
            self.is_null = Some(is_null);
            self
        }

        /// Attach a sort directive.
        pub fn sort(mut self, sort: Sort) -> Self {
            self.sort = Some(sort);
            self
        }
    };
}

/// Chainable setters for descriptors with the six comparison operators and sets.
macro_rules! range_setters {
    ($t:ty) => {
        pub fn eq(mut self, value: $t) -> Self {
            self.eq = Some(value);
            self
        }

        pub fn neq(mut self, value: $t) -> Self {
            self.neq = Some(value);
            self
        }

        pub fn gt(mut self, value: $t) -> Self {
            self.gt = Some(value);
            self
        }

        pub fn gte(mut self, value: $t) -> Self {
            self.gte = Some(value);
            self
        }

        pub fn lt(mut self, value: $t) -> Self {
            self.lt = Some(value);
            self
        }

        pub fn lte(mut self, value: $t) -> Self {
            self.lte = Some(value);
            self
        }

        pub fn in_list(mut self, values: impl IntoIterator<Item = $t>) -> Self {
            self.in_list = Some(wrap_all(values));
            self
        }

        pub fn not_in(mut self, values: impl IntoIterator<Item = $t>) -> Self {
            self.not_in = Some(wrap_all(values));
            self
        }
    };
}

/// Boolean column filter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BooleanFilter {
    pub eq: Option<bool>,
    pub neq: Option<bool>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl BooleanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, value: bool) -> Self {
        self.eq = Some(value);
        self
    }

    pub fn neq(mut self, value: bool) -> Self {
        self.neq = Some(value);
        self
    }

    common_setters!();
}

/// Date or timestamp column filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DateFilter<T> {
    pub eq: Option<T>,
    pub neq: Option<T>,
    pub gt: Option<T>,
    pub gte: Option<T>,
    pub lt: Option<T>,
    pub lte: Option<T>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<Option<T>>>,
    pub not_in: Option<Vec<Option<T>>>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl<T> Default for DateFilter<T> {
    fn default() -> Self {
        Self {
            eq: None,
            neq: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            in_list: None,
            not_in: None,
            is_null: None,
            sort: None,
        }
    }
}

impl<T: DateValue> DateFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    range_setters!(T);
    common_setters!();
}

/// How an enumeration column stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumFilterMode {
    /// Integer discriminant.
    #[default]
    ByValue,
    /// Variant name as text.
    ByName,
    /// Integer discriminant rendered as text.
    ByValueAsString,
}

/// Enumeration column filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnumFilter<E> {
    pub mode: EnumFilterMode,
    pub eq: Option<E>,
    pub neq: Option<E>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<Option<E>>>,
    pub not_in: Option<Vec<Option<E>>>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl<E> Default for EnumFilter<E> {
    fn default() -> Self {
        Self {
            mode: EnumFilterMode::default(),
            eq: None,
            neq: None,
            in_list: None,
            not_in: None,
            is_null: None,
            sort: None,
        }
    }
}

impl<E: FilterEnum> EnumFilter<E> {
    pub fn new(mode: EnumFilterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn eq(mut self, value: E) -> Self {
        self.eq = Some(value);
        self
    }

    pub fn neq(mut self, value: E) -> Self {
        self.neq = Some(value);
        self
    }

    pub fn in_list(mut self, values: impl IntoIterator<Item = E>) -> Self {
        self.in_list = Some(wrap_all(values));
        self
    }

    pub fn not_in(mut self, values: impl IntoIterator<Item = E>) -> Self {
        self.not_in = Some(wrap_all(values));
        self
    }

    common_setters!();
}

/// Bit-flag column filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlagsFilter<E> {
    pub has_flag: Option<E>,
    pub not_has_flag: Option<E>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl<E> Default for FlagsFilter<E> {
    fn default() -> Self {
        Self {
            has_flag: None,
            not_has_flag: None,
            is_null: None,
            sort: None,
        }
    }
}

impl<E: FlagEnum> FlagsFilter<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_flag(mut self, flag: E) -> Self {
        self.has_flag = Some(flag);
        self
    }

    pub fn not_has_flag(mut self, flag: E) -> Self {
        self.not_has_flag = Some(flag);
        self
    }

    common_setters!();
}

/// UUID identifier column filter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IdFilter {
    pub eq: Option<Uuid>,
    pub neq: Option<Uuid>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<Option<Uuid>>>,
    pub not_in: Option<Vec<Option<Uuid>>>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl IdFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, value: Uuid) -> Self {
        self.eq = Some(value);
        self
    }

    pub fn neq(mut self, value: Uuid) -> Self {
        self.neq = Some(value);
        self
    }

    pub fn in_list(mut self, values: impl IntoIterator<Item = Uuid>) -> Self {
        self.in_list = Some(wrap_all(values));
        self
    }

    pub fn not_in(mut self, values: impl IntoIterator<Item = Uuid>) -> Self {
        self.not_in = Some(wrap_all(values));
        self
    }

    common_setters!();
}

/// Numeric column filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NumericFilter<T> {
    pub eq: Option<T>,
    pub neq: Option<T>,
    pub gt: Option<T>,
    pub gte: Option<T>,
    pub lt: Option<T>,
    pub lte: Option<T>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<Option<T>>>,
    pub not_in: Option<Vec<Option<T>>>,
    pub is_null: Option<bool>,
    pub sort: Option<Sort>,
}

impl<T> Default for NumericFilter<T> {
    fn default() -> Self {
        Self {
            eq: None,
            neq: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            in_list: None,
            not_in: None,
            is_null: None,
            sort: None,
        }
    }
}

impl<T: NumericValue> NumericFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    range_setters!(T);
    common_setters!();
}

/// Text column filter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StringFilter {
    pub eq: Option<String>,
    pub neq: Option<String>,
    pub contains: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<Option<String>>>,
    pub not_in: Option<Vec<Option<String>>>,
    pub is_null: Option<bool>,
    /// Match case exactly; otherwise both sides are compared lower-cased.
    pub case_sensitive: bool,
    pub sort: Option<Sort>,
}

impl StringFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, value: impl Into<String>) -> Self {
        self.eq = Some(value.into());
        self
    }

    pub fn neq(mut self, value: impl Into<String>) -> Self {
        self.neq = Some(value.into());
        self
    }

    pub fn contains(mut self, value: impl Into<String>) -> Self {
        self.contains = Some(value.into());
        self
    }

    pub fn starts_with(mut self, value: impl Into<String>) -> Self {
        self.starts_with = Some(value.into());
        self
    }

    pub fn ends_with(mut self, value: impl Into<String>) -> Self {
        self.ends_with = Some(value.into());
        self
    }

    pub fn in_list<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.in_list = Some(wrap_all(values.into_iter().map(Into::into)));
        self
    }

    pub fn not_in<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.not_in = Some(wrap_all(values.into_iter().map(Into::into)));
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    common_setters!();
}

/// Free-text search across several columns (`LIKE`/`ILIKE` OR-group).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    pub term: String,
    pub case_sensitive: bool,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// How a full-text search term is parsed into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsQueryMode {
    /// All words must match (`plainto_tsquery`).
    #[default]
    Plain,
    /// Web-search operators: quotes, `or`, `-` (`websearch_to_tsquery`).
    WebSearch,
}

/// Tokenized full-text search across several columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FullTextSearchFilter {
    pub term: String,
    /// Text search configuration name (e.g. `english`); the builder default applies if unset.
    pub config: Option<String>,
    pub mode: TsQueryMode,
}

impl FullTextSearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn mode(mut self, mode: TsQueryMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Page-based pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationFilter {
    pub limit: i64,
    /// 1-based page number.
    pub page: i64,
}

impl PaginationFilter {
    pub fn new(limit: i64, page: i64) -> Self {
        Self { limit, page }
    }

    /// Rows to skip: `limit * (page - 1)`, or `None` on overflow.
    pub fn checked_offset(&self) -> Option<i64> {
        self.limit.checked_mul(self.page.checked_sub(1)?)
    }

    /// Rows to skip, saturating at `i64::MAX`. Validation rejects descriptors that would
    /// saturate, so a bound offset is always exact.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}
