//! Identifier syntax checks.
//!
//! This is the single place where identifiers are vetted before being written into SQL.
//! Dialects trust their inputs, so every table, column, alias and text search
//! configuration name must pass through here first.
//!
//! - table / alias / configuration names: `^[A-Za-z_][A-Za-z0-9_]*$`
//! - column expressions: the same, optionally followed by JSON-path hops `->'key'` / `->>'key'`

use crate::error::{FilterError, FilterResult};
use regex::Regex;
use std::sync::OnceLock;

const IDENT_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const COLUMN_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(?:->>?'[A-Za-z0-9_\-]+')*$";

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IDENT_PATTERN).expect("invalid built-in identifier regex"))
}

fn column_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COLUMN_PATTERN).expect("invalid built-in column regex"))
}

/// Returns `true` if `name` is a valid table or alias identifier.
pub fn is_identifier(name: &str) -> bool {
    ident_re().is_match(name)
}

/// Returns `true` if `expr` is a valid column expression (with optional JSON-path hops).
pub fn is_column_expression(expr: &str) -> bool {
    column_re().is_match(expr)
}

/// Validate a table, alias or configuration name.
pub fn validate_identifier(name: &str) -> FilterResult<()> {
    if name.is_empty() {
        return Err(FilterError::invalid_identifier(name, "identifier cannot be empty"));
    }
    if !is_identifier(name) {
        return Err(FilterError::invalid_identifier(
            name,
            format!("must match {IDENT_PATTERN}"),
        ));
    }
    Ok(())
}

/// Validate a column expression.
pub fn validate_column(expr: &str) -> FilterResult<()> {
    if expr.is_empty() {
        return Err(FilterError::invalid_identifier(expr, "column cannot be empty"));
    }
    if !is_column_expression(expr) {
        return Err(FilterError::invalid_identifier(
            expr,
            "must be an identifier optionally followed by ->'key' or ->>'key' hops",
        ));
    }
    Ok(())
}
