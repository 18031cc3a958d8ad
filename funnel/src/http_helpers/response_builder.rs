//! Mutable response state shared by middleware and the terminal handler.
//!
//! Every setter returns `&mut Self` so calls chain the way handlers usually write them:
//!
//! ```
//! use funnel::http_helpers::ResponseBuilder;
//! use serde_json::json;
//!
//! let mut res = ResponseBuilder::new();
//! res.status(201).header("X-Trace", "abc").json(json!({ "ok": true }));
//!
//! let envelope = res.finalize("application/json").unwrap();
//! assert_eq!(envelope.status_code, 201);
//! assert_eq!(envelope.body, r#"{"ok":true}"#);
//! assert_eq!(envelope.header("x-trace"), Some("abc"));
//! ```

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use super::{Body, ResponseEnvelope};

const CONTENT_TYPE: &str = "content-type";

#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: u16,
    headers: HashMap<String, String>,
    body: Body,
    content_type_overridden: bool,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: Body::Empty,
            content_type_overridden: false,
        }
    }

    pub fn status(&mut self, code: u16) -> &mut Self {
        self.status = code;
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Set a header. Names are stored lowercase; setting `content-type` here counts as an
    /// explicit override and disables JSON serialization of string bodies.
    pub fn header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let name = name.to_ascii_lowercase();
        if name == CONTENT_TYPE {
            self.content_type_overridden = true;
        }
        self.headers.insert(name, value.into());
        self
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        if name == CONTENT_TYPE {
            self.content_type_overridden = false;
        }
        self.headers.remove(&name)
    }

    pub fn content_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.header(CONTENT_TYPE, value)
    }

    pub fn body(&mut self, body: impl Into<Body>) -> &mut Self {
        self.body = body.into();
        self
    }

    pub fn get_body(&self) -> &Body {
        &self.body
    }

    /// Structured JSON body, serialized at finalize time
    pub fn json(&mut self, value: Value) -> &mut Self {
        self.set_content_type("application/json");
        self.body = Body::Json(value);
        self
    }

    pub fn html(&mut self, markup: impl Into<String>) -> &mut Self {
        self.set_content_type("text/html");
        self.body = Body::Text(markup.into());
        self
    }

    /// Plain text body sent verbatim
    pub fn send(&mut self, text: impl Into<String>) -> &mut Self {
        self.body = Body::Text(text.into());
        self
    }

    /// Raw bytes, base64-encoded into the envelope with `isBase64Encoded` set
    pub fn send_binary(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.body = Body::Binary(bytes.into());
        self
    }

    pub fn redirect(&mut self, location: impl Into<String>) -> &mut Self {
        self.redirect_with_status(location, 302)
    }

    pub fn redirect_with_status(&mut self, location: impl Into<String>, status: u16) -> &mut Self {
        self.headers.insert("location".to_string(), location.into());
        self.status = status;
        self
    }

    /// Produce the response envelope.
    ///
    /// A JSON body is serialized to compact text unless the content type was overridden and the
    /// value is a plain string, in which case the string goes out verbatim. `default_content_type`
    /// applies only when no content type was set at all.
    pub fn finalize(mut self, default_content_type: &str) -> Result<ResponseEnvelope, serde_json::Error> {
        let (body, is_base64_encoded) = match self.body {
            Body::Empty => (String::new(), false),
            Body::Text(text) => (text, false),
            Body::Json(Value::String(text)) if self.content_type_overridden => (text, false),
            Body::Json(value) => (serde_json::to_string(&value)?, false),
            Body::Binary(bytes) => (STANDARD.encode(bytes), true),
        };

        self.headers
            .entry(CONTENT_TYPE.to_string())
            .or_insert_with(|| default_content_type.to_string());

        Ok(ResponseEnvelope {
            headers: self.headers,
            status_code: self.status,
            body,
            is_base64_encoded,
        })
    }

    // Helper-driven content types are not an explicit override.
    fn set_content_type(&mut self, value: &str) {
        if !self.content_type_overridden {
            self.headers.insert(CONTENT_TYPE.to_string(), value.to_string());
        }
    }
}
