use crate::error::{FilterError, FilterResult};
use crate::filter::Sort;

/// Sort directives keyed by resolved column SQL, in insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct SortSet {
    entries: Vec<(String, Sort)>,
}

impl SortSet {
    pub(crate) fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == column)
    }

    /// Fails if `column` already has a directive.
    pub(crate) fn check(&self, column: &str) -> FilterResult<()> {
        if self.contains(column) {
            return Err(FilterError::DuplicateSort {
                column: column.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, column: String, sort: Sort) -> FilterResult<()> {
        self.check(&column)?;
        self.entries.push((column, sort));
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries ordered by position; equal positions keep insertion order.
    pub(crate) fn ordered(&self) -> Vec<(&str, Sort)> {
        let mut out: Vec<(&str, Sort)> = self
            .entries
            .iter()
            .map(|(c, s)| (c.as_str(), *s))
            .collect();
        out.sort_by_key(|(_, s)| s.position);
        out
    }
}
