use super::FilterQuery;
use crate::error::{FilterError, FilterResult};
use crate::validate::{validate_column, validate_identifier};

/// One entry of a column SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    expr: String,
    alias: Option<String>,
}

impl SelectColumn {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: None,
        }
    }

    /// `table.expr AS alias`
    pub fn aliased(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }

    fn validate(&self) -> FilterResult<()> {
        validate_column(&self.expr)?;
        if let Some(alias) = &self.alias {
            validate_identifier(alias)?;
        }
        Ok(())
    }

    fn to_sql(&self, table: &str) -> String {
        match &self.alias {
            Some(alias) => format!("{table}.{} AS {alias}", self.expr),
            None => format!("{table}.{}", self.expr),
        }
    }
}

impl From<&str> for SelectColumn {
    fn from(expr: &str) -> Self {
        Self::new(expr)
    }
}

impl From<String> for SelectColumn {
    fn from(expr: String) -> Self {
        Self::new(expr)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectClause {
    All,
    Count,
    Columns(Vec<SelectColumn>),
}

impl SelectClause {
    pub(crate) fn to_sql(&self, table: &str) -> String {
        match self {
            SelectClause::All => format!("{table}.*"),
            SelectClause::Count => "COUNT(*)".to_string(),
            SelectClause::Columns(columns) => columns
                .iter()
                .map(|c| c.to_sql(table))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub(crate) fn is_count(&self) -> bool {
        matches!(self, SelectClause::Count)
    }
}

impl FilterQuery {
    fn set_select(&mut self, clause: SelectClause) -> FilterResult<&mut Self> {
        if self.select.is_some() {
            return Err(FilterError::SelectAlreadySet);
        }
        self.select = Some(clause);
        Ok(self)
    }

    /// `SELECT table.*`
    pub fn select_all(&mut self) -> FilterResult<&mut Self> {
        self.set_select(SelectClause::All)
    }

    /// `SELECT COUNT(*)`; ORDER BY is not rendered for a count.
    pub fn select_count(&mut self) -> FilterResult<&mut Self> {
        self.set_select(SelectClause::Count)
    }

    /// `SELECT table.a, table.b, ...`
    pub fn select_columns<I, C>(&mut self, columns: I) -> FilterResult<&mut Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<SelectColumn>,
    {
        if self.select.is_some() {
            return Err(FilterError::SelectAlreadySet);
        }
        let columns: Vec<SelectColumn> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(FilterError::invalid_identifier(
                "",
                "select list cannot be empty",
            ));
        }
        for column in &columns {
            column.validate()?;
        }
        self.set_select(SelectClause::Columns(columns))
    }
}
