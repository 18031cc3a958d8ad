use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Route table key. Methods arrive case-insensitively and are normalized to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    PATCH,
    OPTIONS,
}

impl HttpMethod {
    /// Parse an HTTP method from a string (case-insensitive)
    pub fn from_string(method: &str) -> Option<Self> {
        match method.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::GET),
            "post" => Some(HttpMethod::POST),
            "put" => Some(HttpMethod::PUT),
            "delete" => Some(HttpMethod::DELETE),
            "patch" => Some(HttpMethod::PATCH),
            "options" => Some(HttpMethod::OPTIONS),
            "head" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }

    /// Normalized (lowercase) name, as seen by handlers
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "get",
            HttpMethod::POST => "post",
            HttpMethod::PUT => "put",
            HttpMethod::DELETE => "delete",
            HttpMethod::PATCH => "patch",
            HttpMethod::HEAD => "head",
            HttpMethod::OPTIONS => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s).ok_or_else(|| ConfigurationError::UnknownMethod(s.to_string()))
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        assert_eq!(HttpMethod::from_string("get"), Some(HttpMethod::GET));
        assert_eq!(HttpMethod::from_string("GET"), Some(HttpMethod::GET));
        assert_eq!(HttpMethod::from_string("Post"), Some(HttpMethod::POST));
        assert_eq!(HttpMethod::from_string("DELETE"), Some(HttpMethod::DELETE));
        assert_eq!(HttpMethod::from_string("trace"), None);
    }

    #[test]
    fn test_as_str_is_lowercase() {
        assert_eq!(HttpMethod::GET.as_str(), "get");
        assert_eq!(HttpMethod::PATCH.as_str(), "patch");
        assert_eq!(HttpMethod::OPTIONS.to_string(), "options");
    }

    #[test]
    fn test_parse_unknown_method() {
        let err = "BREW".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownMethod("BREW".to_string()));
    }
}
