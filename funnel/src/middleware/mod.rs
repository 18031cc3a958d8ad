//! Middleware registration and the per-dispatch execution chain.
//!
//! ```text
//! use_middleware / use_middleware_for
//!         │
//!         ▼
//! MiddlewareRegistry  (scope + shared registration index)
//!         │  entries_for_path(request.path)
//!         ▼
//! MiddlewareChain     (matching stages in index order, then the route handler)
//! ```

mod chain;
pub use chain::{DispatchState, MiddlewareChain};

mod registry;
pub use registry::{MiddlewareEntry, MiddlewareRegistry};

mod scope;
pub use scope::{IntoScope, MiddlewareScope};

// Re-export core traits
pub use crate::traits_helpers::middleware::{
    Advanced, FunctionalMiddleware, Middleware, MiddlewareFn, MiddlewareResult, Next,
};
