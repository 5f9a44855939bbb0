use super::FilterQuery;
use super::paging::{LIMIT_PARAM, OFFSET_PARAM};
use super::select::SelectClause;
use crate::error::{FilterError, FilterResult};
use crate::value::{Params, Value};
use std::collections::HashMap;
use tokio_postgres::types::ToSql;

/// A rendered statement with named `@param` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Params,
}

impl RenderedQuery {
    /// The parameter bag as a JSON object.
    pub fn params_json(&self) -> serde_json::Value {
        self.params.to_json()
    }

    /// Rewrite `@name` placeholders to `$1, $2, ...` for drivers without named parameters.
    ///
    /// A name used twice maps to the same index. `@@` and quoted literals are copied as-is.
    pub fn to_positional(&self) -> FilterResult<PositionalQuery> {
        let mut sql = String::with_capacity(self.sql.len());
        let mut params: Vec<Value> = Vec::new();
        let mut indexes: HashMap<&str, usize> = HashMap::new();

        let src = self.sql.as_str();
        let bytes = src.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\'' => {
                    let end = literal_end(bytes, i);
                    sql.push_str(&src[i..end]);
                    i = end;
                }
                b'@' if bytes.get(i + 1) == Some(&b'@') => {
                    sql.push_str("@@");
                    i += 2;
                }
                b'@' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                        end += 1;
                    }
                    if end == start {
                        sql.push('@');
                        i += 1;
                        continue;
                    }
                    let name = &src[start..end];
                    let index = match indexes.get(name) {
                        Some(index) => *index,
                        None => {
                            let value = self.params.get(name).ok_or_else(|| {
                                FilterError::UnknownParameter {
                                    name: name.to_string(),
                                }
                            })?;
                            params.push(value.clone());
                            indexes.insert(name, params.len());
                            params.len()
                        }
                    };
                    sql.push('$');
                    sql.push_str(&index.to_string());
                    i = end;
                }
                _ => {
                    let next = next_boundary(src, i);
                    sql.push_str(&src[i..next]);
                    i = next;
                }
            }
        }

        Ok(PositionalQuery { sql, params })
    }
}

/// Index just past the closing quote of the literal starting at `start` (`''` escapes).
fn literal_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Index of the next `@` or `'`, or the end of `src`.
fn next_boundary(src: &str, from: usize) -> usize {
    src[from..]
        .find(['@', '\''])
        .map_or(src.len(), |offset| from + offset)
}

/// A statement with positional `$n` placeholders and its ordered values.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PositionalQuery {
    /// Parameters as references for `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

impl FilterQuery {
    /// Render the statement.
    ///
    /// Requires a SELECT clause. Conditions are AND-joined in bind order, ORDER BY follows
    /// sort positions (omitted for a count) and paging adds `_Limit` / `_Offset`.
    pub fn render(&self) -> FilterResult<RenderedQuery> {
        let select = self.select.as_ref().ok_or(FilterError::MissingSelect)?;

        let mut sql = format!("SELECT {} FROM {}", select.to_sql(&self.table), self.table);

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }

        if !select.is_count() && !self.sorts.is_empty() {
            let order = self
                .sorts
                .ordered()
                .into_iter()
                .map(|(column, sort)| self.dialect.order_by(column, sort.descending))
                .collect::<Vec<_>>();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        let mut params = self.params.clone();
        if let Some((limit, offset)) = self.paging {
            sql.push(' ');
            sql.push_str(&self.dialect.paging(LIMIT_PARAM, OFFSET_PARAM));
            params.set(LIMIT_PARAM, Value::BigInt(limit));
            params.set(OFFSET_PARAM, Value::BigInt(offset));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgfilter.sql",
            sql = %sql,
            param_count = params.len(),
            dialect = self.dialect.name(),
            "rendered filter query"
        );

        Ok(RenderedQuery { sql, params })
    }

    /// A `SELECT COUNT(*)` companion with the same WHERE clause and no ordering or paging.
    pub fn count_query(&self) -> FilterQuery {
        let mut query = self.clone();
        query.select = Some(SelectClause::Count);
        query.sorts.clear();
        query.paging = None;
        query
    }
}
