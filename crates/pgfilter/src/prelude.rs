//! Convenient imports for typical `pgfilter` usage.
//!
//! ```ignore
//! use pgfilter::prelude::*;
//! ```

pub use crate::{
    BooleanFilter, DateFilter, DialectKind, EnumFilter, EnumFilterMode, FilterEnum, FilterError,
    FilterQuery, FilterResult, FlagEnum, FlagsFilter, FullTextSearchFilter, IdFilter,
    NumericFilter, PaginationFilter, QueryConfig, RenderedQuery, SearchFilter, SelectColumn, Sort,
    StringFilter, TsQueryMode,
};
