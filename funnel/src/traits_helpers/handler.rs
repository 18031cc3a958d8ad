use std::sync::Arc;

use async_trait::async_trait;

use super::middleware::BoxFuture;
use crate::error::BoxError;
use crate::http_helpers::{RequestContext, ResponseBuilder};

pub type HandlerResult = Result<(), BoxError>;

/// Terminal route handler. Writes the response through the builder; returning `Ok` completes
/// the dispatch and the builder is finalized into the envelope.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut RequestContext, res: &mut ResponseBuilder) -> HandlerResult;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle(&self, ctx: &mut RequestContext, res: &mut ResponseBuilder) -> HandlerResult {
        (**self).handle(ctx, res).await
    }
}

pub type HandlerFn = Arc<
    dyn for<'a> Fn(&'a mut RequestContext, &'a mut ResponseBuilder) -> BoxFuture<'a, HandlerResult>
        + Send
        + Sync,
>;

pub struct FunctionalHandler {
    handler: HandlerFn,
}

impl FunctionalHandler {
    pub fn new(handler: HandlerFn) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl Handler for FunctionalHandler {
    async fn handle(&self, ctx: &mut RequestContext, res: &mut ResponseBuilder) -> HandlerResult {
        (self.handler)(ctx, res).await
    }
}

pub struct SyncHandler<F> {
    handler: F,
}

#[async_trait]
impl<F> Handler for SyncHandler<F>
where
    F: Fn(&mut RequestContext, &mut ResponseBuilder) -> HandlerResult + Send + Sync,
{
    async fn handle(&self, ctx: &mut RequestContext, res: &mut ResponseBuilder) -> HandlerResult {
        (self.handler)(ctx, res)
    }
}

/// Build a handler from a synchronous closure.
///
/// ```
/// use funnel::handler_fn;
/// use serde_json::json;
///
/// let hello = handler_fn(|ctx, res| {
///     res.status(200).json(json!({ "method": ctx.method.as_str() }));
///     Ok(())
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F>(handler: F) -> SyncHandler<F>
where
    F: Fn(&mut RequestContext, &mut ResponseBuilder) -> HandlerResult + Send + Sync,
{
    SyncHandler { handler }
}

/// Build a handler from an asynchronous closure returning a boxed future
pub fn async_handler_fn<F>(handler: F) -> FunctionalHandler
where
    F: for<'a> Fn(&'a mut RequestContext, &'a mut ResponseBuilder) -> BoxFuture<'a, HandlerResult>
        + Send
        + Sync
        + 'static,
{
    FunctionalHandler::new(Arc::new(handler))
}
