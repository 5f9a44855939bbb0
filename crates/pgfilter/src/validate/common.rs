//! Validation rules shared by every filter kind.

use super::rules::Rule;
use crate::error::FieldError;

/// Largest accepted `in` / `not_in` list. Longer lists are rejected before the pairwise
/// duplicate scan runs.
pub const MAX_ARRAY_LEN: usize = 1000;

/// Accumulates findings; nothing here fails fast.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    errors: Vec<FieldError>,
}

impl Findings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(crate) fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Equality and inequality targets cannot both be set.
    pub(crate) fn exclusive(&mut self, a: &str, a_set: bool, b: &str, b_set: bool) {
        if a_set && b_set {
            self.push(format!("{a}/{b}"), format!("{a} and {b} are mutually exclusive"));
        }
    }

    /// Every violated ordering among the four bounds is reported on its own.
    pub(crate) fn range<T: PartialOrd>(
        &mut self,
        gt: Option<&T>,
        gte: Option<&T>,
        lt: Option<&T>,
        lte: Option<&T>,
    ) {
        if let (Some(gt), Some(lt)) = (gt, lt)
            && !(gt < lt)
        {
            self.push("gt/lt", "gt must be less than lt");
        }
        if let (Some(gt), Some(lte)) = (gt, lte)
            && !(gt <= lte)
        {
            self.push("gt/lte", "gt must be less than or equal to lte");
        }
        if let (Some(gte), Some(lt)) = (gte, lt)
            && !(gte < lt)
        {
            self.push("gte/lt", "gte must be less than lt");
        }
        if let (Some(gte), Some(lte)) = (gte, lte)
            && !(gte <= lte)
        {
            self.push("gte/lte", "gte must be less than or equal to lte");
        }
    }

    /// A present array must be non-empty, bounded, null-free and duplicate-free.
    pub(crate) fn array<T: PartialEq>(&mut self, field: &str, values: Option<&[Option<T>]>) {
        let Some(values) = values else {
            return;
        };
        if values.is_empty() {
            self.push(field, "must not be empty");
            return;
        }
        if values.len() > MAX_ARRAY_LEN {
            self.push(
                field,
                format!("must not contain more than {MAX_ARRAY_LEN} values"),
            );
            return;
        }
        if values.iter().any(Option::is_none) {
            self.push(field, "must not contain null values");
        }
        let present: Vec<&T> = values.iter().flatten().collect();
        let has_duplicate = present
            .iter()
            .enumerate()
            .any(|(i, a)| present[i + 1..].iter().any(|b| a == b));
        if has_duplicate {
            self.push(field, "must not contain duplicate values");
        }
    }

    /// Apply custom rules to one scalar field.
    pub(crate) fn custom<T: ?Sized>(&mut self, field: &str, value: Option<&T>, rules: &[Rule<T>]) {
        let Some(value) = value else {
            return;
        };
        for rule in rules {
            if !rule.check(value) {
                self.push(field, rule.message());
            }
        }
    }
}
