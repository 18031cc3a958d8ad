//! Pattern compiler and the single segment-alignment routine shared by route matching and
//! middleware scope checks.
//!
//! Grammar, per `/`-separated segment:
//! - `:name` binds exactly one non-empty path segment
//! - `*` matches the rest of the path, zero or more segments, and must come last
//! - anything else must match literally (case-sensitive)

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// Compiled path pattern. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn compile(pattern: &str) -> Result<Self, ConfigurationError> {
        let raw = if pattern.starts_with('/') {
            pattern.to_string()
        } else {
            format!("/{}", pattern)
        };

        let parts: Vec<&str> = split_segments(&raw).collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if index != last {
                    return Err(ConfigurationError::WildcardNotLast { pattern: raw.clone() });
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(ConfigurationError::EmptyParamName { pattern: raw.clone() });
                }
                if segments.contains(&Segment::Param(name.to_string())) {
                    return Err(ConfigurationError::DuplicateParam {
                        pattern: raw.clone(),
                        name: name.to_string(),
                    });
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self { raw, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Boolean structural match. Never binds parameters.
    pub fn matches(&self, path: &str) -> bool {
        self.align(path, None)
    }

    /// Structural match that also returns the parameter bindings.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        self.align(path, Some(&mut params)).then_some(params)
    }

    fn align(&self, path: &str, mut sink: Option<&mut HashMap<String, String>>) -> bool {
        let mut parts = split_segments(path);

        for segment in &self.segments {
            match segment {
                Segment::Wildcard => return true,
                Segment::Literal(text) => match parts.next() {
                    Some(part) if part == text => {}
                    _ => return false,
                },
                Segment::Param(name) => match parts.next() {
                    Some(part) if !part.is_empty() => {
                        if let Some(sink) = sink.as_deref_mut() {
                            sink.insert(name.clone(), part.to_string());
                        }
                    }
                    _ => return false,
                },
            }
        }

        parts.next().is_none()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// "/" yields one empty segment; "/a/" yields ["a", ""].
fn split_segments(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}
