use super::{Condition, MembershipOp, PatternOp, SqlDialect, escape_like};
use crate::error::{FilterError, FilterResult};
use crate::filter::TsQueryMode;
use crate::value::{Value, ValueType};

/// PostgreSQL dialect.
///
/// - JSON-path values are cast with `(expr)::type`
/// - set membership binds one array parameter: `col = ANY(@p)` / `col <> ALL(@p)`
/// - case-insensitive patterns use `ILIKE`
/// - full-text search uses `to_tsvector(...) @@ plainto_tsquery(...)`
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    fn membership_sql(column: &str, op: MembershipOp, placeholder: &str) -> String {
        match op {
            MembershipOp::In => format!("{column} = ANY({placeholder})"),
            MembershipOp::NotIn => format!("{column} <> ALL({placeholder})"),
        }
    }
}

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn cast_type(&self, ty: ValueType) -> Option<&'static str> {
        Some(match ty {
            ValueType::Boolean => "boolean",
            ValueType::SmallInt => "smallint",
            ValueType::Integer => "integer",
            ValueType::BigInt => "bigint",
            ValueType::Real => "real",
            ValueType::Double => "double precision",
            ValueType::Decimal => "numeric",
            ValueType::Text => "text",
            ValueType::Date => "date",
            ValueType::Timestamp => "timestamp",
            ValueType::TimestampTz => "timestamptz",
            ValueType::Uuid => "uuid",
        })
    }

    fn cast(&self, expr: &str, ty: ValueType) -> FilterResult<String> {
        let type_name = self
            .cast_type(ty)
            .ok_or_else(|| FilterError::unsupported_type(ty.as_str(), expr))?;
        Ok(format!("({expr})::{type_name}"))
    }

    fn membership(
        &self,
        column: &str,
        op: MembershipOp,
        param: &str,
        values: Value,
    ) -> Condition {
        let sql = Self::membership_sql(column, op, &self.placeholder(param));
        Condition::new(sql, param, values)
    }

    fn string_membership(
        &self,
        column: &str,
        op: MembershipOp,
        param: &str,
        values: Vec<String>,
        case_sensitive: bool,
    ) -> Condition {
        let placeholder = self.placeholder(param);
        if case_sensitive {
            Condition::new(
                Self::membership_sql(column, op, &placeholder),
                param,
                Value::TextArray(values),
            )
        } else {
            let lowered = values.iter().map(|v| v.to_lowercase()).collect();
            Condition::new(
                Self::membership_sql(&format!("LOWER({column})"), op, &placeholder),
                param,
                Value::TextArray(lowered),
            )
        }
    }

    fn pattern(
        &self,
        column: &str,
        op: PatternOp,
        param: &str,
        value: &str,
        case_sensitive: bool,
    ) -> Condition {
        let placeholder = self.placeholder(param);
        if case_sensitive {
            Condition::new(
                format!("{column} LIKE {placeholder}"),
                param,
                Value::Text(op.apply(&escape_like(value))),
            )
        } else {
            Condition::new(
                format!("{column} ILIKE {placeholder}"),
                param,
                Value::Text(op.apply(&escape_like(&value.to_lowercase()))),
            )
        }
    }

    fn free_text_search(
        &self,
        columns: &[String],
        param: &str,
        term: &str,
        case_sensitive: bool,
    ) -> Condition {
        let placeholder = self.placeholder(param);
        let (op, term) = if case_sensitive {
            ("LIKE", term.to_string())
        } else {
            ("ILIKE", term.to_lowercase())
        };
        let parts = columns
            .iter()
            .map(|c| format!("{c} {op} {placeholder}"))
            .collect::<Vec<_>>();
        Condition::new(
            format!("({})", parts.join(" OR ")),
            param,
            Value::Text(PatternOp::Contains.apply(&escape_like(&term))),
        )
    }

    fn supports_full_text_search(&self) -> bool {
        true
    }

    fn full_text_search(
        &self,
        columns: &[String],
        config: &str,
        mode: TsQueryMode,
        param: &str,
        term: &str,
    ) -> FilterResult<Condition> {
        let document = columns
            .iter()
            .map(|c| format!("COALESCE({c}, '')"))
            .collect::<Vec<_>>()
            .join(" || ' ' || ");
        let parser = match mode {
            TsQueryMode::Plain => "plainto_tsquery",
            TsQueryMode::WebSearch => "websearch_to_tsquery",
        };
        let sql = format!(
            "to_tsvector('{config}', {document}) @@ {parser}('{config}', {})",
            self.placeholder(param)
        );
        Ok(Condition::new(sql, param, Value::Text(term.to_string())))
    }
}
