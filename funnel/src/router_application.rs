use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::error::DispatchError;
use crate::http_helpers::{HttpMethod, HttpRequest, RequestContext, ResponseBuilder, ResponseEnvelope};
use crate::middleware::{MiddlewareChain, MiddlewareRegistry};
use crate::router::RouteTable;

struct RouterInner {
    config: RouterConfig,
    routes: RouteTable,
    middleware: MiddlewareRegistry,
}

/// Frozen route table and middleware registry.
///
/// Cloning is cheap and every clone shares the same read-only state, so one router can serve any
/// number of concurrent dispatches. Each dispatch owns its own [`RequestContext`].
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

impl Router {
    pub(crate) fn new(config: RouterConfig, routes: RouteTable, middleware: MiddlewareRegistry) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                config,
                routes,
                middleware,
            }),
        }
    }

    /// Resolve the route for `request`, run the matching middleware in registration order, then
    /// the route handler, and finalize the response.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<ResponseEnvelope, DispatchError> {
        let Some(method) = HttpMethod::from_string(&request.method) else {
            return Err(self.not_found(&request.method, &request.path));
        };

        let Some(found) = self.inner.routes.resolve(method, &request.path) else {
            return Err(self.not_found(method.as_str(), &request.path));
        };
        let route = found.route;
        debug!(%method, path = %request.path, route = %route.pattern, "route resolved");

        let stages = self.inner.middleware.get_middleware_for_path(&request.path);
        let mut chain = MiddlewareChain::new(stages, route.handler.clone(), route.pattern.as_str())
            .with_budget(self.inner.config.stage_budget());

        let mut ctx = RequestContext::new(method, route.pattern.as_str(), found.params, request);
        let mut res = ResponseBuilder::new();
        chain.execute(&mut ctx, &mut res).await?;

        Ok(res.finalize(&self.inner.config.default_content_type)?)
    }

    /// Dispatch and hand the outcome to `completion`, which is called exactly once
    pub async fn run<F>(&self, request: HttpRequest, completion: F)
    where
        F: FnOnce(Result<ResponseEnvelope, DispatchError>),
    {
        completion(self.dispatch(request).await)
    }

    fn not_found(&self, method: &str, path: &str) -> DispatchError {
        warn!(method, path, "no route matched");
        DispatchError::NotFound {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    pub fn version(&self) -> &str {
        &self.inner.config.version
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Registered (method, pattern) pairs in registration order
    pub fn routes(&self) -> &[(HttpMethod, String)] {
        self.inner.routes.list()
    }
}
