//! The filter query builder.
//!
//! [`FilterQuery`] accumulates a SELECT clause, WHERE conditions, named parameters, sort
//! directives and paging for one table, then renders them into a [`RenderedQuery`].
//!
//! # Lifecycle
//!
//! ```text
//! new ──> select_* ──> bind_* / search* / apply_paging ──> render (repeatable)
//! ```
//!
//! - each `select_*` method may be called once; a second call fails
//! - `bind_*` validates the descriptor, then appends its conditions and sort directive
//! - an absent descriptor is a no-op unless the config denies null filters
//! - `render` does not consume or mutate the builder
//!
//! Every mutating call either applies fully or leaves the builder untouched.
//!
//! # Example
//!
//! ```ignore
//! use pgfilter::prelude::*;
//!
//! let mut q = FilterQuery::new("users", DialectKind::Postgres)?;
//! q.select_columns(["id", "name"])?
//!     .bind_boolean("is_active", Some(&BooleanFilter::new().eq(true)))?
//!     .bind_numeric("age", Some(&NumericFilter::new().gte(18).sort(Sort::desc(0))))?
//!     .apply_paging(Some(&PaginationFilter::new(20, 1)), None)?;
//!
//! let rendered = q.render()?;
//! // SELECT users.id, users.name FROM users
//! //   WHERE users.is_active = @users_is_active_eq_0 AND users.age >= @users_age_gte_0
//! //   ORDER BY users.age DESC LIMIT @_Limit OFFSET @_Offset
//! ```

mod bind;
mod paging;
mod render;
mod search;
mod select;
mod sort;

pub use paging::{LIMIT_PARAM, OFFSET_PARAM};
pub use render::{PositionalQuery, RenderedQuery};
pub use select::SelectColumn;

use crate::column::{ColumnRef, ParamNamer};
use crate::config::QueryConfig;
use crate::dialect::{
    CompareOp, Condition, DialectKind, EqualityOp, FlagOp, MembershipOp, PatternOp, SqlDialect,
};
use crate::error::FilterResult;
use crate::filter::Sort;
use crate::validate::{FilterValidator, ensure_present, ensure_valid_with, validate_identifier};
use crate::value::{Params, Value};
use select::SelectClause;
use sort::SortSet;
use std::sync::Arc;

/// Mutable query-assembly state for one table.
///
/// Cloning produces an independent copy: conditions, parameters, sorts and naming counters
/// are duplicated, so the copies can diverge freely. The dialect is stateless and shared.
#[derive(Debug, Clone)]
pub struct FilterQuery {
    table: String,
    dialect: Arc<dyn SqlDialect>,
    config: QueryConfig,
    select: Option<SelectClause>,
    conditions: Vec<String>,
    params: Params,
    sorts: SortSet,
    namer: ParamNamer,
    search_count: usize,
    full_text_count: usize,
    paging: Option<(i64, i64)>,
}

/// One logical operation of a bind call, resolved to values but not yet named.
#[derive(Debug)]
enum Step {
    Compare(CompareOp, Value),
    Equal(EqualityOp, Value),
    TextEqual(EqualityOp, String, bool),
    Member(MembershipOp, Value),
    TextMember(MembershipOp, Vec<String>, bool),
    Pattern(PatternOp, String, bool),
    Flag(FlagOp, i64),
    Null(bool),
}

impl FilterQuery {
    /// Create a builder for `table` with the default configuration.
    pub fn new(table: impl Into<String>, dialect: DialectKind) -> FilterResult<Self> {
        Self::with_config(table, QueryConfig::default().with_dialect(dialect))
    }

    /// Create a builder for `table` from a configuration.
    pub fn with_config(table: impl Into<String>, config: QueryConfig) -> FilterResult<Self> {
        config.validate()?;
        let dialect = config.dialect.dialect();
        Self::build(table.into(), dialect, config)
    }

    /// Create a builder over a custom dialect implementation.
    pub fn with_dialect(
        table: impl Into<String>,
        dialect: Arc<dyn SqlDialect>,
    ) -> FilterResult<Self> {
        Self::build(table.into(), dialect, QueryConfig::default())
    }

    fn build(table: String, dialect: Arc<dyn SqlDialect>, config: QueryConfig) -> FilterResult<Self> {
        validate_identifier(&table)?;
        Ok(Self {
            table,
            dialect,
            config,
            select: None,
            conditions: Vec::new(),
            params: Params::new(),
            sorts: SortSet::default(),
            namer: ParamNamer::new(),
            search_count: 0,
            full_text_count: 0,
            paging: None,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn dialect(&self) -> &dyn SqlDialect {
        self.dialect.as_ref()
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Number of WHERE conditions accumulated so far.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Parameters bound by conditions so far (paging parameters are added at render).
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Apply the null-filter policy and validate a present descriptor.
    fn prepare<'f, F: FilterValidator>(
        &self,
        column: &str,
        filter: Option<&'f F>,
        rules: &F::Rules,
    ) -> FilterResult<Option<&'f F>> {
        let Some(filter) =
            ensure_present(filter, &self.table, column, self.config.allow_null_filters)?
        else {
            return Ok(None);
        };
        ensure_valid_with(filter, &self.table, column, rules)?;
        Ok(Some(filter))
    }

    fn push_condition(&mut self, condition: Condition) {
        if let Some((name, value)) = condition.param {
            self.params.set(name, value);
        }
        self.conditions.push(condition.sql);
    }

    /// Name and emit every step against `column_sql`, then record the sort directive.
    ///
    /// All fallible work happens before the first mutation.
    fn apply(
        &mut self,
        column: &str,
        column_sql: String,
        steps: Vec<Step>,
        sort: Option<Sort>,
    ) -> FilterResult<()> {
        if sort.is_some() {
            self.sorts.check(&column_sql)?;
        }

        let table = self.table.clone();
        let col = ColumnRef::new(&table, column);
        for step in steps {
            let condition = self.emit(&col, &column_sql, step);
            self.push_condition(condition);
        }

        if let Some(sort) = sort {
            self.sorts.insert(column_sql, sort)?;
        }
        Ok(())
    }

    fn emit(&mut self, col: &ColumnRef<'_>, sql: &str, step: Step) -> Condition {
        let dialect = Arc::clone(&self.dialect);
        match step {
            Step::Compare(op, value) => {
                dialect.comparison(sql, op, &self.namer.next(col, op.tag()), value)
            }
            Step::Equal(op, value) => {
                dialect.equality(sql, op, &self.namer.next(col, op.tag()), value)
            }
            Step::TextEqual(op, value, case_sensitive) => dialect.string_equality(
                sql,
                op,
                &self.namer.next(col, op.tag()),
                &value,
                case_sensitive,
            ),
            Step::Member(op, values) => {
                dialect.membership(sql, op, &self.namer.next(col, op.tag()), values)
            }
            Step::TextMember(op, values, case_sensitive) => dialect.string_membership(
                sql,
                op,
                &self.namer.next(col, op.tag()),
                values,
                case_sensitive,
            ),
            Step::Pattern(op, value, case_sensitive) => dialect.pattern(
                sql,
                op,
                &self.namer.next(col, op.tag()),
                &value,
                case_sensitive,
            ),
            Step::Flag(op, bits) => dialect.flag(sql, op, &self.namer.next(col, op.tag()), bits),
            Step::Null(is_null) => dialect.null_check(sql, is_null),
        }
    }
}

#[cfg(test)]
mod tests;
