//! Caller-supplied validation predicates.

use std::fmt;
use std::sync::Arc;

/// A named predicate; a value failing it is reported with `message`.
pub struct Rule<T: ?Sized> {
    message: String,
    check: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Rule<T> {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Arc::new(check),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check(&self, value: &T) -> bool {
        (self.check)(value)
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Custom rules applied to every scalar value of a descriptor.
#[derive(Debug, Clone)]
pub struct ValueRules<T> {
    pub(crate) value: Vec<Rule<T>>,
}

impl<T> Default for ValueRules<T> {
    fn default() -> Self {
        Self { value: Vec::new() }
    }
}

impl<T> ValueRules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate every scalar value (eq, neq, bounds) must satisfy.
    pub fn rule<F>(mut self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.value.push(Rule::new(message, check));
        self
    }
}

/// Custom rules for text filters.
///
/// Value rules apply to every scalar and to every element of `in` / `not_in`;
/// array rules run once per present array (null elements excluded).
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    pub(crate) value: Vec<Rule<str>>,
    pub(crate) array: Vec<Rule<[String]>>,
}

impl StringRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule<F>(mut self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.value.push(Rule::new(message, check));
        self
    }

    pub fn array_rule<F>(mut self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.array.push(Rule::new(message, check));
        self
    }
}

/// Limits applied to pagination descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationRules {
    /// Largest accepted page size.
    pub max_limit: Option<i64>,
}

impl PaginationRules {
    pub fn max_limit(max_limit: i64) -> Self {
        Self {
            max_limit: Some(max_limit),
        }
    }
}
