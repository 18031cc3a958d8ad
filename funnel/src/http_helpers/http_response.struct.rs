use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Finalized response handed back to the platform adapter.
///
/// Serializes with the field names serverless platforms expect
/// (`statusCode`, `isBase64Encoded`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub headers: HashMap<String, String>,
    pub status_code: u16,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ResponseEnvelope {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
