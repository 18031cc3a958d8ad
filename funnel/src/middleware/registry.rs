use std::sync::Arc;

use super::MiddlewareScope;
use crate::traits_helpers::Middleware;

pub struct MiddlewareEntry {
    pub scope: MiddlewareScope,
    pub middleware: Arc<dyn Middleware>,
    pub index: usize,
}

/// Ordered middleware registrations for one router.
///
/// Global and scoped middleware share a single index space, so the relative order in which they
/// were registered is preserved across scope kinds.
#[derive(Default)]
pub struct MiddlewareRegistry {
    entries: Vec<MiddlewareEntry>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append middleware with the next registration index, which is returned
    pub fn add(&mut self, scope: MiddlewareScope, middleware: Arc<dyn Middleware>) -> usize {
        let index = self.entries.len();
        self.entries.push(MiddlewareEntry {
            scope,
            middleware,
            index,
        });
        index
    }

    pub fn add_global(&mut self, middleware: Arc<dyn Middleware>) -> usize {
        self.add(MiddlewareScope::Global, middleware)
    }

    /// Entries whose scope matches `path`, ascending by registration index
    pub fn entries_for_path<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a MiddlewareEntry> + 'a {
        // `entries` is append-only, so vector order is index order.
        self.entries
            .iter()
            .filter(move |entry| entry.scope.is_match(path))
    }

    /// Get all middleware that should run for a concrete request path
    pub fn get_middleware_for_path(&self, path: &str) -> Vec<Arc<dyn Middleware>> {
        self.entries_for_path(path)
            .map(|entry| entry.middleware.clone())
            .collect()
    }

    pub fn entries(&self) -> &[MiddlewareEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_helpers::{RequestContext, ResponseBuilder};
    use crate::middleware::IntoScope;
    use crate::traits_helpers::{MiddlewareResult, Next};
    use async_trait::async_trait;

    // Dummy middleware for testing
    struct DummyMiddleware;

    #[async_trait]
    impl Middleware for DummyMiddleware {
        async fn handle(
            &self,
            _ctx: &mut RequestContext,
            _res: &mut ResponseBuilder,
            next: Next,
        ) -> MiddlewareResult {
            Ok(next.advance())
        }
    }

    fn dummy() -> Arc<dyn Middleware> {
        Arc::new(DummyMiddleware)
    }

    fn indices(registry: &MiddlewareRegistry, path: &str) -> Vec<usize> {
        registry.entries_for_path(path).map(|e| e.index).collect()
    }

    #[test]
    fn test_registry_creation() {
        let registry = MiddlewareRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_middleware_for_path("/").is_empty());
    }

    #[test]
    fn test_indices_are_shared_across_scope_kinds() {
        let mut registry = MiddlewareRegistry::new();
        assert_eq!(registry.add_global(dummy()), 0);
        assert_eq!(registry.add("/a".into_scope().unwrap(), dummy()), 1);
        assert_eq!(registry.add_global(dummy()), 2);
        assert_eq!(registry.add(["/b", "/a/*"].into_scope().unwrap(), dummy()), 3);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_global_and_scoped_interleave_by_index() {
        let mut registry = MiddlewareRegistry::new();
        registry.add("/users/*".into_scope().unwrap(), dummy());
        registry.add_global(dummy());
        registry.add("/users/:id".into_scope().unwrap(), dummy());
        registry.add("/admin".into_scope().unwrap(), dummy());
        registry.add_global(dummy());

        assert_eq!(indices(&registry, "/users/7"), vec![0, 1, 2, 4]);
        assert_eq!(indices(&registry, "/users"), vec![0, 1, 4]);
        assert_eq!(indices(&registry, "/admin"), vec![1, 3, 4]);
        assert_eq!(registry.get_middleware_for_path("/other").len(), 2);
    }
}
