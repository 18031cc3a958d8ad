pub mod handler;
pub use self::handler::{
    FunctionalHandler, Handler, HandlerFn, HandlerResult, SyncHandler, async_handler_fn,
    handler_fn,
};

pub mod middleware;
pub use self::middleware::{
    Advanced, BoxFuture, FunctionalMiddleware, Middleware, MiddlewareFn, MiddlewareResult, Next,
    SyncMiddleware, async_middleware_fn, middleware_fn,
};
