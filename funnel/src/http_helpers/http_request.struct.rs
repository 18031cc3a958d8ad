use std::collections::HashMap;

use serde_json::{Map, Value};

/// Normalized inbound request, as produced by a platform adapter.
///
/// The method is stored lowercase and header names are stored lowercase so lookups are
/// case-insensitive. The path is kept as given apart from a leading slash; trailing slashes are
/// significant.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: &str, path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            method: method.to_ascii_lowercase(),
            path,
            query: HashMap::new(),
            body: Value::Object(Map::new()),
            headers: HashMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge a raw `a=1&b=2` query string into the query map. Later keys win.
    pub fn with_query_string(mut self, raw: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)?;
        self.query.extend(pairs);
        Ok(self)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Get a specific header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
