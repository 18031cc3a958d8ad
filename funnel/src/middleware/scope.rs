use crate::error::ConfigurationError;
use crate::router::PathPattern;

/// Set of request paths a middleware is eligible to run against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareScope {
    Global,
    Single(PathPattern),
    Many(Vec<PathPattern>),
}

impl MiddlewareScope {
    /// Boolean check only; parameters in scope patterns are never bound.
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            MiddlewareScope::Global => true,
            MiddlewareScope::Single(pattern) => pattern.matches(path),
            MiddlewareScope::Many(patterns) => patterns.iter().any(|p| p.matches(path)),
        }
    }

    fn from_patterns<I, S>(patterns: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| PathPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        // An empty list scopes nothing out
        if compiled.is_empty() {
            Ok(MiddlewareScope::Global)
        } else {
            Ok(MiddlewareScope::Many(compiled))
        }
    }
}

/// Trait for types that can be converted into a MiddlewareScope
pub trait IntoScope {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError>;
}

impl IntoScope for MiddlewareScope {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        Ok(self)
    }
}

// Single pattern
impl IntoScope for &str {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        PathPattern::compile(self).map(MiddlewareScope::Single)
    }
}

impl IntoScope for String {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        self.as_str().into_scope()
    }
}

impl IntoScope for Vec<&str> {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        MiddlewareScope::from_patterns(self)
    }
}

impl IntoScope for Vec<String> {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        MiddlewareScope::from_patterns(self)
    }
}

impl IntoScope for &[&str] {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        MiddlewareScope::from_patterns(self)
    }
}

// Array literal - common case
impl<const N: usize> IntoScope for [&str; N] {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        MiddlewareScope::from_patterns(self)
    }
}

impl<const N: usize> IntoScope for &[&str; N] {
    fn into_scope(self) -> Result<MiddlewareScope, ConfigurationError> {
        MiddlewareScope::from_patterns(self)
    }
}
