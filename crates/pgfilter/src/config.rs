//! Builder configuration.

use crate::dialect::DialectKind;
use crate::error::{FilterError, FilterResult};
use crate::validate::is_identifier;
use serde::Deserialize;
use std::path::Path;

fn default_text_search_config() -> String {
    "english".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings shared by every [`FilterQuery`](crate::FilterQuery) built from them.
///
/// ```toml
/// dialect = "postgres"
/// max_page_size = 100
/// text_search_config = "simple"
/// allow_null_filters = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default)]
    pub dialect: DialectKind,
    /// Upper bound on page size when `apply_paging` is given none.
    #[serde(default)]
    pub max_page_size: Option<i64>,
    /// Full-text configuration used when a search names none.
    #[serde(default = "default_text_search_config")]
    pub text_search_config: String,
    /// Treat an absent filter as a no-op. When `false`, an absent filter is an error.
    #[serde(default = "default_true")]
    pub allow_null_filters: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            max_page_size: None,
            text_search_config: default_text_search_config(),
            allow_null_filters: true,
        }
    }
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_max_page_size(mut self, max: i64) -> Self {
        self.max_page_size = Some(max);
        self
    }

    pub fn with_text_search_config(mut self, config: impl Into<String>) -> Self {
        self.text_search_config = config.into();
        self
    }

    /// Reject absent filters instead of skipping them.
    pub fn deny_null_filters(mut self) -> Self {
        self.allow_null_filters = false;
        self
    }

    pub fn allow_null_filters(mut self) -> Self {
        self.allow_null_filters = true;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> FilterResult<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| FilterError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FilterError::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> FilterResult<()> {
        if let Some(max) = self.max_page_size
            && max <= 0
        {
            return Err(FilterError::config(format!(
                "max_page_size must be greater than 0, got {max}"
            )));
        }
        if !is_identifier(&self.text_search_config) {
            return Err(FilterError::config(format!(
                "text_search_config '{}' is not a valid configuration name",
                self.text_search_config
            )));
        }
        Ok(())
    }
}
