//! Error types shared by registration and dispatch.
//!
//! Registration problems surface as [`ConfigurationError`] while the router is being built and
//! never reach dispatch. Everything that goes wrong while serving a request is a [`DispatchError`].

use std::time::Duration;

use thiserror::Error;

use crate::middleware::DispatchState;

/// Error type middleware and handlers may fail with. Anything implementing
/// `std::error::Error` (and `anyhow::Error`) converts into it with `?`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raised synchronously while routes and middleware are registered
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("wildcard must be the final segment in pattern '{pattern}'")]
    WildcardNotLast { pattern: String },

    #[error("empty parameter name in pattern '{pattern}'")]
    EmptyParamName { pattern: String },

    #[error("parameter ':{name}' appears more than once in pattern '{pattern}'")]
    DuplicateParam { pattern: String, name: String },

    #[error("route {method} {pattern} is already registered")]
    DuplicateRoute { method: String, pattern: String },

    #[error("unsupported HTTP method '{0}'")]
    UnknownMethod(String),
}

/// Failure of a single dispatch. No response envelope is produced when one of these is returned.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches {method} {path}")]
    NotFound { method: String, path: String },

    #[error("middleware at stage {stage} failed: {source}")]
    Middleware {
        stage: usize,
        #[source]
        source: BoxError,
    },

    #[error("handler for route '{route}' failed: {source}")]
    Handler {
        route: String,
        #[source]
        source: BoxError,
    },

    #[error("{state} did not finish within {budget:?}")]
    Suspended {
        state: DispatchState,
        budget: Duration,
    },

    #[error("failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }
}
