//! Column references and parameter naming.
//!
//! A [`ColumnRef`] pairs a table with a column expression, which is either a bare
//! identifier or an identifier followed by JSON-path hops (`profile->'address'->>'city'`).
//! JSON-path expressions yield untyped values, so they are wrapped in a cast derived from
//! the type of the value they are compared against.
//!
//! Parameter names are `table_column_op_n`, where `n` counts occurrences per
//! (table, column) within one builder. This keeps names unique when the same column is
//! bound repeatedly, even by the same operator.

use crate::dialect::{SqlDialect, enum_value_type};
use crate::error::FilterResult;
use crate::filter::EnumFilterMode;
use crate::value::ValueType;
use std::collections::HashMap;

/// JSON-path hop operator prefix.
const JSON_HOP: &str = "->";

/// A (table, column expression) pair. Constructed per bind call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub table: &'a str,
    pub column: &'a str,
}

impl<'a> ColumnRef<'a> {
    pub fn new(table: &'a str, column: &'a str) -> Self {
        Self { table, column }
    }

    /// Whether the column expression traverses a JSON path.
    pub fn has_json_path(&self) -> bool {
        self.column.contains(JSON_HOP)
    }

    /// The base column identifier, without JSON-path hops.
    pub fn base_column(&self) -> &'a str {
        match self.column.find(JSON_HOP) {
            Some(idx) => &self.column[..idx],
            None => self.column,
        }
    }

    /// `table.column`, without any cast.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    /// SQL for comparing the column against a value of type `ty`.
    ///
    /// Plain columns are returned as `table.column`; JSON-path columns are cast.
    pub fn to_sql(&self, dialect: &dyn SqlDialect, ty: ValueType) -> FilterResult<String> {
        let qualified = self.qualified();
        if self.has_json_path() {
            dialect.cast(&qualified, ty)
        } else {
            Ok(qualified)
        }
    }

    /// SQL for comparing the column against an enumeration stored in `mode`.
    pub fn to_sql_for_enum(
        &self,
        dialect: &dyn SqlDialect,
        mode: EnumFilterMode,
    ) -> FilterResult<String> {
        self.to_sql(dialect, enum_value_type(mode))
    }

    /// Prefix shared by every parameter bound for this column.
    pub fn param_prefix(&self) -> String {
        format!("{}_{}", sanitize(self.table), sanitize(self.column))
    }
}

/// Reduce an identifier or JSON-path expression to `[A-Za-z0-9_]` segments joined by `_`.
pub fn sanitize(s: &str) -> String {
    s.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Per-builder occurrence counters for parameter names.
#[derive(Debug, Clone, Default)]
pub struct ParamNamer {
    occurrences: HashMap<String, usize>,
}

impl ParamNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique parameter name for `column` bound with operator `op_tag`.
    pub fn next(&mut self, column: &ColumnRef<'_>, op_tag: &str) -> String {
        let prefix = column.param_prefix();
        let counter = self.occurrences.entry(prefix.clone()).or_insert(0);
        let name = format!("{prefix}_{op_tag}_{counter}");
        *counter += 1;
        name
    }
}
