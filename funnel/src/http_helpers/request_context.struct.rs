use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{HttpMethod, HttpRequest};

/// Per-invocation request record.
///
/// Created fresh for every dispatch and handed by `&mut` to each middleware in turn and finally
/// to the handler. Middleware communicate through named fields set with [`RequestContext::set`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: HttpMethod,
    pub path: String,
    /// Pattern text of the matched route, e.g. `/users/:id`
    pub route: String,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Value,
    pub headers: HashMap<String, String>,
    locals: Map<String, Value>,
}

impl RequestContext {
    pub fn new(
        method: HttpMethod,
        route: impl Into<String>,
        params: HashMap<String, String>,
        request: HttpRequest,
    ) -> Self {
        Self {
            method,
            path: request.path,
            route: route.into(),
            params,
            query: request.query,
            body: request.body,
            // Adapters may fill `HttpRequest::headers` directly with platform casing
            headers: request
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            locals: Map::new(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Get a specific header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Top-level field of an object body
    pub fn body_field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|body| body.get(name))
    }

    /// Store a named field for later stages, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.locals.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.locals.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.locals.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locals.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.locals.remove(key)
    }

    /// Named fields in the order middleware set them
    pub fn locals(&self) -> &Map<String, Value> {
        &self.locals
    }
}
