//! SQL dialects.
//!
//! A dialect turns one logical operation plus an already-resolved column expression and a
//! pre-chosen parameter name into a [`Condition`]: the SQL fragment and the (possibly
//! transformed) value to bind. Dialect methods are pure and assume identifiers were
//! validated upstream; they never escape identifiers themselves.
//!
//! Default methods follow ANSI SQL. [`PostgresDialect`] overrides the parts where
//! Postgres has a dedicated idiom (`::` casts, `ILIKE`, array parameters, `tsvector`).

mod postgres;

pub use postgres::PostgresDialect;

use crate::error::{FilterError, FilterResult};
use crate::filter::{EnumFilterMode, TsQueryMode};
use crate::value::{Value, ValueType};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Equality operators, for filter kinds that support nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityOp {
    Eq,
    NotEq,
}

impl EqualityOp {
    pub fn tag(&self) -> &'static str {
        CompareOp::from(*self).tag()
    }
}

/// The six comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Tag used in parameter names.
    pub fn tag(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::NotEq => "neq",
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
        }
    }

    /// SQL operator literal.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl From<EqualityOp> for CompareOp {
    fn from(op: EqualityOp) -> Self {
        match op {
            EqualityOp::Eq => CompareOp::Eq,
            EqualityOp::NotEq => CompareOp::NotEq,
        }
    }
}

/// Set membership operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOp {
    In,
    NotIn,
}

impl MembershipOp {
    pub fn tag(&self) -> &'static str {
        match self {
            MembershipOp::In => "in",
            MembershipOp::NotIn => "notin",
        }
    }
}

/// Pattern match shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOp {
    /// `%v%`
    Contains,
    /// `v%`
    StartsWith,
    /// `%v`
    EndsWith,
}

impl PatternOp {
    pub fn tag(&self) -> &'static str {
        match self {
            PatternOp::Contains => "contains",
            PatternOp::StartsWith => "startswith",
            PatternOp::EndsWith => "endswith",
        }
    }

    /// Wrap an escaped term in the wildcards of this shape.
    pub fn apply(&self, escaped: &str) -> String {
        match self {
            PatternOp::Contains => format!("%{escaped}%"),
            PatternOp::StartsWith => format!("{escaped}%"),
            PatternOp::EndsWith => format!("%{escaped}"),
        }
    }
}

/// Bit-flag tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOp {
    Has,
    NotHas,
}

impl FlagOp {
    pub fn tag(&self) -> &'static str {
        match self {
            FlagOp::Has => "hasflag",
            FlagOp::NotHas => "nothasflag",
        }
    }
}

/// One WHERE fragment plus its optional bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub sql: String,
    pub param: Option<(String, Value)>,
}

impl Condition {
    pub fn new(sql: impl Into<String>, name: impl Into<String>, value: Value) -> Self {
        Self {
            sql: sql.into(),
            param: Some((name.into(), value)),
        }
    }

    /// A condition without a parameter.
    pub fn bare(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            param: None,
        }
    }
}

/// Escape clause appended to `LIKE` in the default methods; ANSI `LIKE` has no default escape.
pub const LIKE_ESCAPE: &str = "ESCAPE '\\'";

/// Escape `LIKE` metacharacters so user input matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Semantic type an enumeration column is compared as.
pub fn enum_value_type(mode: EnumFilterMode) -> ValueType {
    match mode {
        EnumFilterMode::ByValue => ValueType::Integer,
        EnumFilterMode::ByName | EnumFilterMode::ByValueAsString => ValueType::Text,
    }
}

/// Condition-building rules of one SQL dialect.
pub trait SqlDialect: fmt::Debug + Send + Sync {
    /// Dialect name, for errors and logs.
    fn name(&self) -> &'static str;

    /// Type name used in casts, or `None` if the dialect has no mapping for `ty`.
    fn cast_type(&self, ty: ValueType) -> Option<&'static str>;

    /// `column = ANY(...)`-style set membership against an array parameter.
    fn membership(&self, column: &str, op: MembershipOp, param: &str, values: Value)
    -> Condition;

    /// Set membership for text, lower-casing both sides when `case_sensitive` is false.
    fn string_membership(
        &self,
        column: &str,
        op: MembershipOp,
        param: &str,
        values: Vec<String>,
        case_sensitive: bool,
    ) -> Condition;

    /// Placeholder text for a named parameter.
    fn placeholder(&self, name: &str) -> String {
        format!("@{name}")
    }

    /// Cast an untyped expression to `ty`.
    fn cast(&self, expr: &str, ty: ValueType) -> FilterResult<String> {
        let type_name = self
            .cast_type(ty)
            .ok_or_else(|| FilterError::unsupported_type(ty.as_str(), expr))?;
        Ok(format!("CAST({expr} AS {type_name})"))
    }

    /// Equality or inequality.
    fn equality(&self, column: &str, op: EqualityOp, param: &str, value: Value) -> Condition {
        self.comparison(column, op.into(), param, value)
    }

    /// Any of the six comparison operators.
    fn comparison(&self, column: &str, op: CompareOp, param: &str, value: Value) -> Condition {
        let sql = format!("{column} {} {}", op.as_sql(), self.placeholder(param));
        Condition::new(sql, param, value)
    }

    /// Text equality or inequality.
    fn string_equality(
        &self,
        column: &str,
        op: EqualityOp,
        param: &str,
        value: &str,
        case_sensitive: bool,
    ) -> Condition {
        let op = CompareOp::from(op).as_sql();
        let placeholder = self.placeholder(param);
        if case_sensitive {
            Condition::new(
                format!("{column} {op} {placeholder}"),
                param,
                Value::Text(value.to_string()),
            )
        } else {
            Condition::new(
                format!("LOWER({column}) {op} {placeholder}"),
                param,
                Value::Text(value.to_lowercase()),
            )
        }
    }

    /// Contains / starts-with / ends-with match. The term is escaped and wrapped here.
    fn pattern(
        &self,
        column: &str,
        op: PatternOp,
        param: &str,
        value: &str,
        case_sensitive: bool,
    ) -> Condition {
        let placeholder = self.placeholder(param);
        if case_sensitive {
            let pattern = op.apply(&escape_like(value));
            Condition::new(
                format!("{column} LIKE {placeholder} {LIKE_ESCAPE}"),
                param,
                Value::Text(pattern),
            )
        } else {
            let pattern = op.apply(&escape_like(&value.to_lowercase()));
            Condition::new(
                format!("LOWER({column}) LIKE {placeholder} {LIKE_ESCAPE}"),
                param,
                Value::Text(pattern),
            )
        }
    }

    /// Bitwise flag test.
    fn flag(&self, column: &str, op: FlagOp, param: &str, bits: i64) -> Condition {
        let cmp = match op {
            FlagOp::Has => "<>",
            FlagOp::NotHas => "=",
        };
        let sql = format!("({column} & {}) {cmp} 0", self.placeholder(param));
        Condition::new(sql, param, Value::BigInt(bits))
    }

    /// `IS NULL` / `IS NOT NULL`.
    fn null_check(&self, column: &str, is_null: bool) -> Condition {
        if is_null {
            Condition::bare(format!("{column} IS NULL"))
        } else {
            Condition::bare(format!("{column} IS NOT NULL"))
        }
    }

    /// OR-group of pattern matches of one `%term%` parameter across `columns`.
    fn free_text_search(
        &self,
        columns: &[String],
        param: &str,
        term: &str,
        case_sensitive: bool,
    ) -> Condition {
        let placeholder = self.placeholder(param);
        let (parts, pattern): (Vec<String>, String) = if case_sensitive {
            (
                columns
                    .iter()
                    .map(|c| format!("{c} LIKE {placeholder} {LIKE_ESCAPE}"))
                    .collect(),
                PatternOp::Contains.apply(&escape_like(term)),
            )
        } else {
            (
                columns
                    .iter()
                    .map(|c| format!("LOWER({c}) LIKE {placeholder} {LIKE_ESCAPE}"))
                    .collect(),
                PatternOp::Contains.apply(&escape_like(&term.to_lowercase())),
            )
        };
        Condition::new(
            format!("({})", parts.join(" OR ")),
            param,
            Value::Text(pattern),
        )
    }

    /// Whether [`SqlDialect::full_text_search`] is available.
    fn supports_full_text_search(&self) -> bool {
        false
    }

    /// Tokenized full-text search across `columns` using text search configuration `config`.
    fn full_text_search(
        &self,
        _columns: &[String],
        _config: &str,
        _mode: TsQueryMode,
        _param: &str,
        _term: &str,
    ) -> FilterResult<Condition> {
        Err(FilterError::FullTextSearchUnsupported {
            dialect: self.name().to_string(),
        })
    }

    /// One ORDER BY item.
    fn order_by(&self, column: &str, descending: bool) -> String {
        if descending {
            format!("{column} DESC")
        } else {
            format!("{column} ASC")
        }
    }

    /// LIMIT/OFFSET clause over two named parameters.
    fn paging(&self, limit_param: &str, offset_param: &str) -> String {
        format!(
            "LIMIT {} OFFSET {}",
            self.placeholder(limit_param),
            self.placeholder(offset_param)
        )
    }
}

/// Dialect selector used by configuration and constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    #[default]
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl DialectKind {
    /// Instantiate the dialect. Dialects are stateless and shared.
    pub fn dialect(&self) -> Arc<dyn SqlDialect> {
        match self {
            DialectKind::Postgres => Arc::new(PostgresDialect),
        }
    }
}
