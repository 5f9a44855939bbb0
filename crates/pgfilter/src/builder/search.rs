use super::FilterQuery;
use crate::column::ColumnRef;
use crate::error::{FieldError, FilterError, FilterResult};
use crate::filter::{FullTextSearchFilter, SearchFilter};
use crate::validate::{FilterValidator, ensure_present, ensure_valid_columns};
use crate::value::ValueType;

impl FilterQuery {
    /// Check presence, column list and descriptor of a multi-column search.
    fn prepare_search<'f, F: FilterValidator>(
        &self,
        filter: Option<&'f F>,
        columns: &[&str],
    ) -> FilterResult<Option<&'f F>> {
        let label = columns.join(",");
        let Some(filter) =
            ensure_present(filter, &self.table, &label, self.config.allow_null_filters)?
        else {
            return Ok(None);
        };
        if columns.is_empty() {
            return Err(FilterError::validation(
                F::KIND,
                &self.table,
                label,
                vec![FieldError::new("columns", "must name at least one column")],
            ));
        }
        ensure_valid_columns(filter, &self.table, columns, &Default::default())?;
        Ok(Some(filter))
    }

    /// Text SQL for every search column.
    fn resolve_text_columns(&self, columns: &[&str]) -> FilterResult<Vec<String>> {
        columns
            .iter()
            .map(|c| ColumnRef::new(&self.table, c).to_sql(self.dialect.as_ref(), ValueType::Text))
            .collect()
    }

    /// Free-text search: `(c1 ILIKE @_Search_n OR c2 ILIKE @_Search_n ...)` with `%term%`.
    pub fn search(
        &mut self,
        filter: Option<&SearchFilter>,
        columns: &[&str],
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare_search(filter, columns)? else {
            return Ok(self);
        };
        let resolved = self.resolve_text_columns(columns)?;
        let param = format!("_Search_{}", self.search_count);
        let condition =
            self.dialect
                .free_text_search(&resolved, &param, &filter.term, filter.case_sensitive);
        self.search_count += 1;
        self.push_condition(condition);
        Ok(self)
    }

    /// Tokenized full-text search over the concatenation of `columns`.
    ///
    /// Fails with [`FilterError::FullTextSearchUnsupported`] unless the dialect supports it.
    /// The descriptor's configuration name wins over the builder's default.
    pub fn search_full_text(
        &mut self,
        filter: Option<&FullTextSearchFilter>,
        columns: &[&str],
    ) -> FilterResult<&mut Self> {
        let Some(filter) = self.prepare_search(filter, columns)? else {
            return Ok(self);
        };
        if !self.dialect.supports_full_text_search() {
            return Err(FilterError::FullTextSearchUnsupported {
                dialect: self.dialect.name().to_string(),
            });
        }

        let resolved = self.resolve_text_columns(columns)?;
        let config = filter
            .config
            .as_deref()
            .unwrap_or(self.config.text_search_config.as_str());
        let param = format!("_FullText_{}", self.full_text_count);
        let condition =
            self.dialect
                .full_text_search(&resolved, config, filter.mode, &param, &filter.term)?;
        self.full_text_count += 1;
        self.push_condition(condition);
        Ok(self)
    }
}
