//! Error types for pgfilter

use std::fmt;
use thiserror::Error;

/// Result type alias for pgfilter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// The kind of filter descriptor an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Boolean,
    Date,
    Enum,
    Flags,
    Id,
    Numeric,
    String,
    Search,
    FullTextSearch,
    Pagination,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Boolean => "Boolean",
            FilterKind::Date => "Date",
            FilterKind::Enum => "Enum",
            FilterKind::Flags => "Flags",
            FilterKind::Id => "Id",
            FilterKind::Numeric => "Numeric",
            FilterKind::String => "String",
            FilterKind::Search => "Search",
            FilterKind::FullTextSearch => "Full-text search",
            FilterKind::Pagination => "Pagination",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding on one field of a filter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error types for query compilation
#[derive(Debug, Error)]
pub enum FilterError {
    /// Table, column or alias failed the identifier syntax check
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    /// A filter descriptor holds contradictory or malformed fields
    #[error("{kind} filter on {table}.{column} is invalid: {}", join_field_errors(.errors))]
    Validation {
        kind: FilterKind,
        table: String,
        column: String,
        errors: Vec<FieldError>,
    },

    /// A filter descriptor was absent while null filters are disallowed
    #[error("{kind} filter on {table}.{column} is required")]
    MissingFilter {
        kind: FilterKind,
        table: String,
        column: String,
    },

    /// A SELECT clause was requested twice on the same builder
    #[error("SELECT clause can only be set once")]
    SelectAlreadySet,

    /// `render` was called before any SELECT clause was set
    #[error("No SELECT clause has been set")]
    MissingSelect,

    /// The dialect has no full-text search support
    #[error("Full-text search is not supported by the {dialect} dialect")]
    FullTextSearchUnsupported { dialect: String },

    /// The value representation has no mapping in the dialect or allow-list
    #[error("Unsupported type '{type_name}' for column '{column}'")]
    UnsupportedType { type_name: String, column: String },

    /// A second sort directive was bound to an already sorted column
    #[error("Column '{column}' already has a sort directive")]
    DuplicateSort { column: String },

    /// A placeholder in the SQL text has no value in the parameter bag
    #[error("Unknown parameter '@{name}'")]
    UnknownParameter { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilterError {
    /// Create an identifier error
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an aggregated validation error
    pub fn validation(
        kind: FilterKind,
        table: impl Into<String>,
        column: impl Into<String>,
        errors: Vec<FieldError>,
    ) -> Self {
        Self::Validation {
            kind,
            table: table.into(),
            column: column.into(),
            errors,
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(type_name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            column: column.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Field findings carried by a validation error (empty for other variants)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an identifier error
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }

    /// Check if this is a builder state error
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::SelectAlreadySet
                | Self::MissingSelect
                | Self::FullTextSearchUnsupported { .. }
                | Self::UnsupportedType { .. }
                | Self::DuplicateSort { .. }
        )
    }
}
