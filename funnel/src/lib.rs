//! # funnel
//!
//! Minimal router and middleware pipeline for serverless request handlers.
//!
//! A platform adapter turns an inbound event into an [`HttpRequest`]; the [`Router`] resolves a
//! route by method and path pattern, runs every middleware whose scope matches the path in
//! registration order, runs the route handler and returns a [`ResponseEnvelope`].
//!
//! ```
//! use funnel::{HttpRequest, RouterFactory, handler_fn, middleware_fn};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut factory = RouterFactory::new();
//! factory.use_middleware_for("/users/*", middleware_fn(|ctx, _res, next| {
//!     ctx.set("tenant", "acme");
//!     Ok(next.advance())
//! }))?;
//! factory.get("/users/:id", handler_fn(|ctx, res| {
//!     res.json(json!({ "id": ctx.param("id"), "tenant": ctx.get("tenant") }));
//!     Ok(())
//! }))?;
//! let router = factory.build();
//!
//! let envelope = router.dispatch(HttpRequest::new("GET", "/users/9")).await?;
//! assert_eq!(envelope.body, r#"{"id":"9","tenant":"acme"}"#);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http_helpers;
pub mod middleware;
pub mod router;
mod router_application;
pub mod router_factory;
pub mod traits_helpers;

pub use config::{ConfigError, RouterConfig};
pub use error::{BoxError, ConfigurationError, DispatchError};
pub use http_helpers::{
    Body, HttpMethod, HttpRequest, RequestContext, ResponseBuilder, ResponseEnvelope,
};
pub use middleware::{DispatchState, IntoScope, MiddlewareScope};
pub use router_application::Router;
pub use router_factory::RouterFactory;
pub use traits_helpers::{
    Advanced, Handler, HandlerResult, Middleware, MiddlewareResult, Next, async_handler_fn,
    async_middleware_fn, handler_fn, middleware_fn,
};

// Re-exported so implementors of `Middleware` and `Handler` need not depend on it directly
pub use async_trait::async_trait;
