use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    /// Matches every method; written `*` or `ANY` in route tables
    #[serde(alias = "*")]
    Any,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
            Method::Any => "*",
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "OPTIONS" => Ok(Method::Options),
            "*" | "ANY" => Ok(Method::Any),
            _ => Err(RouterError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed route table line before compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Method the route answers to
    pub method: Method,
    /// Path pattern (e.g., "/user/:id", "/static/*path")
    pub pattern: String,
    /// Target name, resolved against the registered targets
    pub target: String,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

/// Owned lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<T> {
    /// The matched payload
    pub payload: T,
    /// Captured parameters in pattern order
    pub params: Vec<(String, String)>,
    /// Raw query string of the routed URL without the leading `?`, left
    /// undecoded. Empty when the URL has none.
    pub query: String,
}

impl<T> RouteMatch<T> {
    /// Value of the parameter `name`, if captured.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Cache key for LRU cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub method: Method,
    pub path: String,
}

impl CacheKey {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
        }
    }
}
