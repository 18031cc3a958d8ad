use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http_helpers::{RequestContext, ResponseBuilder};

/// Boxed future borrowing the request context for `'a`
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result type for a single middleware stage
pub type MiddlewareResult = Result<Advanced, BoxError>;

/// Single-use continuation handed to each middleware.
///
/// [`Next::advance`] consumes the token and returns the [`Advanced`] proof the middleware
/// must return to let the chain move on. A middleware that never advances never returns, which
/// leaves its dispatch suspended until the router's stage budget (if any) expires.
#[derive(Debug)]
pub struct Next {
    stage: usize,
}

impl Next {
    pub(crate) fn new(stage: usize) -> Self {
        Self { stage }
    }

    /// Position of the current middleware in this dispatch's execution list
    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn advance(self) -> Advanced {
        Advanced { stage: self.stage }
    }
}

/// Proof that a middleware advanced. Only [`Next::advance`] can create one.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "return the Advanced proof from the middleware to continue the chain"]
pub struct Advanced {
    stage: usize,
}

impl Advanced {
    pub(crate) fn stage(&self) -> usize {
        self.stage
    }
}

/// Core middleware trait
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Inspect or mutate the request, then advance or fail
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult;
}

#[async_trait]
impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        (**self).handle(ctx, res, next).await
    }
}

/// Functional middleware - asynchronous closure form
pub type MiddlewareFn = Arc<
    dyn for<'a> Fn(&'a mut RequestContext, &'a mut ResponseBuilder, Next) -> BoxFuture<'a, MiddlewareResult>
        + Send
        + Sync,
>;

/// Wrapper to convert functional middleware to trait
pub struct FunctionalMiddleware {
    handler: MiddlewareFn,
}

impl FunctionalMiddleware {
    pub fn new(handler: MiddlewareFn) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl Middleware for FunctionalMiddleware {
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        (self.handler)(ctx, res, next).await
    }
}

/// Synchronous closure form, for middleware that does no async work
pub struct SyncMiddleware<F> {
    handler: F,
}

#[async_trait]
impl<F> Middleware for SyncMiddleware<F>
where
    F: Fn(&mut RequestContext, &mut ResponseBuilder, Next) -> MiddlewareResult + Send + Sync,
{
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        (self.handler)(ctx, res, next)
    }
}

/// Build middleware from a synchronous closure.
///
/// ```
/// use funnel::middleware_fn;
///
/// let stamp = middleware_fn(|ctx, _res, next| {
///     ctx.set("stamped", true);
///     Ok(next.advance())
/// });
/// # let _ = stamp;
/// ```
pub fn middleware_fn<F>(handler: F) -> SyncMiddleware<F>
where
    F: Fn(&mut RequestContext, &mut ResponseBuilder, Next) -> MiddlewareResult + Send + Sync,
{
    SyncMiddleware { handler }
}

/// Build middleware from an asynchronous closure returning a boxed future.
///
/// ```
/// use funnel::async_middleware_fn;
///
/// let lookup = async_middleware_fn(|ctx, _res, next| {
///     Box::pin(async move {
///         let user = fetch_user().await;
///         ctx.set("user", user);
///         Ok(next.advance())
///     })
/// });
/// # async fn fetch_user() -> String { "alice".to_string() }
/// # let _ = lookup;
/// ```
pub fn async_middleware_fn<F>(handler: F) -> FunctionalMiddleware
where
    F: for<'a> Fn(&'a mut RequestContext, &'a mut ResponseBuilder, Next) -> BoxFuture<'a, MiddlewareResult>
        + Send
        + Sync
        + 'static,
{
    FunctionalMiddleware::new(Arc::new(handler))
}
