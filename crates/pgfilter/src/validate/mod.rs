//! Filter validation.
//!
//! Every bind goes through [`ensure_valid_with`]: identifiers are checked first and fail
//! immediately, then the descriptor's own findings are collected in full and raised as a
//! single [`FilterError::Validation`].

mod common;
mod ident;
mod kinds;
mod rules;

pub use common::MAX_ARRAY_LEN;
pub use ident::{is_column_expression, is_identifier, validate_column, validate_identifier};
pub use rules::{PaginationRules, Rule, StringRules, ValueRules};

use crate::error::{FieldError, FilterError, FilterKind, FilterResult};

/// A descriptor that can check its own consistency.
pub trait FilterValidator {
    /// Caller-supplied extra rules.
    type Rules: Default;

    const KIND: FilterKind;

    /// All findings under `rules`; an empty list means the descriptor is valid.
    fn validate_with(&self, rules: &Self::Rules) -> Vec<FieldError>;

    /// All findings under the built-in rules only.
    fn validate(&self) -> Vec<FieldError> {
        self.validate_with(&Self::Rules::default())
    }
}

/// Check identifiers, then the descriptor, using the built-in rules.
pub fn ensure_valid<F: FilterValidator>(filter: &F, table: &str, column: &str) -> FilterResult<()> {
    ensure_valid_with(filter, table, column, &F::Rules::default())
}

/// Check identifiers, then the descriptor under `rules`.
pub fn ensure_valid_with<F: FilterValidator>(
    filter: &F,
    table: &str,
    column: &str,
    rules: &F::Rules,
) -> FilterResult<()> {
    ensure_valid_columns(filter, table, &[column], rules)
}

/// Like [`ensure_valid_with`] for descriptors spanning several columns.
pub fn ensure_valid_columns<F: FilterValidator>(
    filter: &F,
    table: &str,
    columns: &[&str],
    rules: &F::Rules,
) -> FilterResult<()> {
    validate_identifier(table)?;
    for column in columns {
        validate_column(column)?;
    }
    ensure_consistent(filter, table, &columns.join(","), rules)
}

/// Raise the descriptor's own findings, if any. `label` names the target in the error.
pub(crate) fn ensure_consistent<F: FilterValidator>(
    filter: &F,
    table: &str,
    label: &str,
    rules: &F::Rules,
) -> FilterResult<()> {
    let errors = filter.validate_with(rules);
    if errors.is_empty() {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "pgfilter.validate",
        kind = %F::KIND,
        table = %table,
        column = %label,
        error_count = errors.len(),
        "filter rejected"
    );

    Err(FilterError::validation(F::KIND, table, label, errors))
}

/// Apply the null-filter policy to an optional descriptor.
///
/// Returns the descriptor when present. An absent one is `Ok(None)` when `allow_null` is
/// set and a [`FilterError::MissingFilter`] otherwise.
pub fn ensure_present<'a, F: FilterValidator>(
    filter: Option<&'a F>,
    table: &str,
    column: &str,
    allow_null: bool,
) -> FilterResult<Option<&'a F>> {
    match filter {
        Some(filter) => Ok(Some(filter)),
        None if allow_null => Ok(None),
        None => Err(FilterError::MissingFilter {
            kind: F::KIND,
            table: table.to_string(),
            column: column.to_string(),
        }),
    }
}
