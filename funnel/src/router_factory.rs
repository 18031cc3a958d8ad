use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigError, RouterConfig};
use crate::error::ConfigurationError;
use crate::http_helpers::HttpMethod;
use crate::middleware::{IntoScope, MiddlewareRegistry};
use crate::router::RouteTable;
use crate::router_application::Router;
use crate::traits_helpers::{Handler, Middleware};

/// Registration phase of a [`Router`].
///
/// Routes and middleware are added here, then [`RouterFactory::build`] freezes them into an
/// immutable router that can be shared across concurrent invocations.
///
/// ```
/// use funnel::{RouterFactory, handler_fn, middleware_fn};
/// use serde_json::json;
///
/// # fn main() -> Result<(), funnel::ConfigurationError> {
/// let mut factory = RouterFactory::new();
/// factory
///     .use_middleware(middleware_fn(|ctx, _res, next| {
///         ctx.set("seen", true);
///         Ok(next.advance())
///     }))
///     .get("/users/:id", handler_fn(|ctx, res| {
///         res.json(json!({ "id": ctx.param("id") }));
///         Ok(())
///     }))?;
///
/// let router = factory.build();
/// assert_eq!(router.routes().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RouterFactory {
    config: RouterConfig,
    routes: RouteTable,
    middleware: MiddlewareRegistry,
}

impl RouterFactory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit config. The config is validated here, so a router never runs with
    /// an empty default content type or a zero stage budget.
    pub fn with_config(config: RouterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register `handler` for `method` (case-insensitive) and `pattern`
    pub fn route(
        &mut self,
        method: &str,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        let method: HttpMethod = method.parse()?;
        self.add_route(method, pattern, Arc::new(handler))
    }

    pub fn get(
        &mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_route(HttpMethod::GET, pattern, Arc::new(handler))
    }

    pub fn post(
        &mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_route(HttpMethod::POST, pattern, Arc::new(handler))
    }

    pub fn put(
        &mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_route(HttpMethod::PUT, pattern, Arc::new(handler))
    }

    pub fn patch(
        &mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_route(HttpMethod::PATCH, pattern, Arc::new(handler))
    }

    pub fn delete(
        &mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_route(HttpMethod::DELETE, pattern, Arc::new(handler))
    }

    fn add_route(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.routes.insert(method, pattern, handler)?;
        debug!(%method, pattern, "registered route");
        Ok(self)
    }

    /// Middleware that runs for every request
    pub fn use_middleware(&mut self, middleware: impl Middleware + 'static) -> &mut Self {
        let index = self.middleware.add_global(Arc::new(middleware));
        debug!(index, "registered global middleware");
        self
    }

    /// Middleware that runs only when the request path matches `scope`
    pub fn use_middleware_for(
        &mut self,
        scope: impl IntoScope,
        middleware: impl Middleware + 'static,
    ) -> Result<&mut Self, ConfigurationError> {
        let scope = scope.into_scope()?;
        debug!(?scope, "registering scoped middleware");
        self.middleware.add(scope, Arc::new(middleware));
        Ok(self)
    }

    pub fn build(self) -> Router {
        debug!(
            routes = self.routes.len(),
            middleware = self.middleware.len(),
            version = %self.config.version,
            "router built"
        );
        Router::new(self.config, self.routes, self.middleware)
    }
}
