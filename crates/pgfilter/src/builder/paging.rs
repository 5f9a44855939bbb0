use super::FilterQuery;
use crate::error::FilterResult;
use crate::filter::PaginationFilter;
use crate::validate::{PaginationRules, ensure_consistent, ensure_present};

/// Parameter name of the page size.
pub const LIMIT_PARAM: &str = "_Limit";
/// Parameter name of the row offset.
pub const OFFSET_PARAM: &str = "_Offset";

impl FilterQuery {
    /// Set paging from a page-based descriptor, replacing any earlier paging.
    ///
    /// `max_limit` caps the page size; when `None` the configured `max_page_size` applies.
    pub fn apply_paging(
        &mut self,
        filter: Option<&PaginationFilter>,
        max_limit: Option<i64>,
    ) -> FilterResult<&mut Self> {
        let Some(filter) =
            ensure_present(filter, &self.table, LIMIT_PARAM, self.config.allow_null_filters)?
        else {
            return Ok(self);
        };

        let rules = PaginationRules {
            max_limit: max_limit.or(self.config.max_page_size),
        };
        ensure_consistent(filter, &self.table, LIMIT_PARAM, &rules)?;

        self.paging = Some((filter.limit, filter.offset()));
        Ok(self)
    }

    /// Current `(limit, offset)`, if paging was applied.
    pub fn paging(&self) -> Option<(i64, i64)> {
        self.paging
    }
}
