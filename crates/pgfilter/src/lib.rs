//! # pgfilter
//!
//! Compile typed filter descriptors into parameterized Postgres SQL.
//!
//! ## Features
//!
//! - **Typed descriptors**: boolean, date, enum, flags, id, numeric and string filters,
//!   usually deserialized straight from request input
//! - **Validated before use**: contradictory descriptors are rejected with every finding at once
//! - **Never concatenates user values**: identifiers are checked, values are bound as named
//!   parameters
//! - **JSON-path columns**: `profile->'is_active'` is cast to the compared type
//! - **Search**: `ILIKE` across columns, or `tsvector` full-text search
//! - **Driver-ready**: convert to `$n` placeholders and bind with `tokio-postgres`
//!
//! ## Example
//!
//! ```ignore
//! use pgfilter::prelude::*;
//!
//! let active: BooleanFilter = serde_json::from_str(r#"{"eq": true}"#)?;
//!
//! let mut q = FilterQuery::new("users", DialectKind::Postgres)?;
//! q.select_columns(["id"])?
//!     .bind_boolean("is_active", Some(&active))?;
//!
//! let rendered = q.render()?;
//! assert_eq!(
//!     rendered.sql,
//!     "SELECT users.id FROM users WHERE users.is_active = @users_is_active_eq_0"
//! );
//!
//! let stmt = rendered.to_positional()?;
//! let rows = client.query(&stmt.sql, &stmt.params_ref()).await?;
//! ```

pub mod builder;
pub mod column;
pub mod config;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod prelude;
pub mod validate;
pub mod value;

pub use builder::{FilterQuery, PositionalQuery, RenderedQuery, SelectColumn};
pub use config::QueryConfig;
pub use dialect::{DialectKind, PostgresDialect, SqlDialect};
pub use error::{FieldError, FilterError, FilterKind, FilterResult};
pub use filter::{
    BooleanFilter, DateFilter, DateValue, EnumFilter, EnumFilterMode, FilterEnum, FlagEnum,
    FlagsFilter, FullTextSearchFilter, IdFilter, NumericFilter, NumericValue, PaginationFilter,
    SearchFilter, Sort, StringFilter, TsQueryMode,
};
pub use validate::{FilterValidator, PaginationRules, StringRules, ValueRules};
pub use value::{Params, Value, ValueType};
