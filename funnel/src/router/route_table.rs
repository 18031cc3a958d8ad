use std::collections::HashMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::PathPattern;
use crate::error::ConfigurationError;
use crate::http_helpers::HttpMethod;
use crate::traits_helpers::Handler;

pub struct Route {
    pub method: HttpMethod,
    pub pattern: PathPattern,
    pub handler: Arc<dyn Handler>,
}

/// Result of a successful route lookup
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: HashMap<String, String>,
}

/// Per-method route lists, kept in registration order.
#[derive(Default)]
pub struct RouteTable {
    routes: FxHashMap<HttpMethod, Vec<Route>>,
    registration_order: Vec<(HttpMethod, String)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and store a route. The same pattern text may only be registered once per method.
    pub fn insert(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), ConfigurationError> {
        let pattern = PathPattern::compile(pattern)?;
        let routes = self.routes.entry(method).or_default();

        if routes.iter().any(|route| route.pattern == pattern) {
            return Err(ConfigurationError::DuplicateRoute {
                method: method.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }

        self.registration_order
            .push((method, pattern.as_str().to_string()));
        routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(())
    }

    /// First route registered for `method` whose pattern structurally matches `path`
    pub fn resolve(&self, method: HttpMethod, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.get(&method)?.iter().find_map(|route| {
            route
                .pattern
                .captures(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// (method, pattern) pairs in registration order
    pub fn list(&self) -> &[(HttpMethod, String)] {
        &self.registration_order
    }

    pub fn len(&self) -> usize {
        self.registration_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registration_order.is_empty()
    }
}
