//! Router module.
//!
//! Routes request URLs to named targets using a route table.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compile::{compile, CompiledRouteTable};
use crate::error::Result;
use crate::parser::{parse_routes, parse_routes_from_file};
use crate::types::{Method, RouteMatch, RouteRule};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Target name used when no route matches
pub const NOT_FOUND_TARGET: &str = "not_found";

/// Router dispatches request URLs to targets based on a route table.
pub struct Router<T: Clone> {
    table: CompiledRouteTable<T>,
    not_found: Option<T>,
}

/// Named target entry.
pub struct TargetEntry<T> {
    /// Name of the target (used in route tables)
    pub name: String,
    /// The payload returned for matching requests
    pub target: T,
}

impl<T> TargetEntry<T> {
    /// Create a new target entry.
    pub fn new(name: impl Into<String>, target: T) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// Router builder options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// LRU cache size for lookup results, 0 disables caching
    pub cache_size: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl RouterOptions {
    /// Create new router options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }
}

impl<T: Clone> Router<T> {
    /// Create a new router from a route table string.
    pub fn new(routes: &str, targets: Vec<TargetEntry<T>>, options: RouterOptions) -> Result<Self> {
        let rules = parse_routes(routes)?;
        Self::from_rules(&rules, targets, options)
    }

    /// Create a new router from a route table file.
    pub fn from_file(
        path: impl AsRef<Path>,
        targets: Vec<TargetEntry<T>>,
        options: RouterOptions,
    ) -> Result<Self> {
        let rules = parse_routes_from_file(path)?;
        Self::from_rules(&rules, targets, options)
    }

    /// Create a new router from already parsed rules.
    pub fn from_rules(
        rules: &[RouteRule],
        targets: Vec<TargetEntry<T>>,
        options: RouterOptions,
    ) -> Result<Self> {
        let target_map = targets_to_map(targets);
        let table = compile(rules, &target_map, options.cache_size)?;
        let not_found = target_map.get(NOT_FOUND_TARGET).cloned();

        Ok(Self { table, not_found })
    }

    /// Route a request URL.
    ///
    /// Only the path takes part in matching. The raw query string is handed
    /// back in [`RouteMatch::query`].
    pub fn route(&self, method: Method, url: &str) -> Option<RouteMatch<T>> {
        let (path, query) = split_query(url);
        let mut found = self.table.match_route(method, path)?;
        found.query = query.to_string();
        Some(found)
    }

    /// Route a request URL, falling back to the `not_found` target.
    pub fn route_or_not_found(&self, method: Method, url: &str) -> Option<RouteMatch<T>> {
        self.route(method, url).or_else(|| {
            let (_, query) = split_query(url);
            self.not_found.clone().map(|payload| RouteMatch {
                payload,
                params: Vec::new(),
                query: query.to_string(),
            })
        })
    }

    /// The compiled route table
    pub fn table(&self) -> &CompiledRouteTable<T> {
        &self.table
    }
}

/// Split a request URL into its path and raw query string.
pub fn split_query(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

/// Convert target entries to a map with lowercased names.
fn targets_to_map<T>(targets: Vec<TargetEntry<T>>) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(targets.len());
    for entry in targets {
        map.insert(entry.name.to_lowercase(), entry.target);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    fn entries() -> Vec<TargetEntry<&'static str>> {
        vec![
            TargetEntry::new("Index", "INDEX"),
            TargetEntry::new("show_user", "SHOW"),
            TargetEntry::new("not_found", "404"),
        ]
    }

    #[test]
    fn test_targets_to_map() {
        let map = targets_to_map(entries());
        assert!(map.contains_key("index"));
        assert!(map.contains_key("show_user"));
        assert!(map.contains_key("not_found"));
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/a?x=1&y=2"), ("/a", "x=1&y=2"));
        assert_eq!(split_query("/a"), ("/a", ""));
        assert_eq!(split_query("/a?"), ("/a", ""));
    }

    #[test]
    fn test_router_new() {
        let routes = "GET / index\nGET /user/:id show_user";
        let router = Router::new(routes, entries(), RouterOptions::new());
        assert!(router.is_ok());
        assert_eq!(router.unwrap().table().route_count(), 2);
    }

    #[test]
    fn test_route_splits_query() {
        let router = Router::new("GET /user/:id show_user", entries(), RouterOptions::new()).unwrap();

        let result = router.route(Method::Get, "/user/42?tab=posts").unwrap();
        assert_eq!(result.payload, "SHOW");
        assert_eq!(result.param("id"), Some("42"));
        assert_eq!(result.query, "tab=posts");

        let result = router.route(Method::Get, "/user/42").unwrap();
        assert_eq!(result.query, "");
    }

    #[test]
    fn test_route_or_not_found() {
        let router = Router::new("GET / index", entries(), RouterOptions::new()).unwrap();

        assert!(router.route(Method::Get, "/missing").is_none());

        let result = router.route_or_not_found(Method::Get, "/missing?from=home").unwrap();
        assert_eq!(result.payload, "404");
        assert!(result.params.is_empty());
        assert_eq!(result.query, "from=home");
    }

    #[test]
    fn test_route_without_not_found_target() {
        let targets = vec![TargetEntry::new("index", "INDEX")];
        let router = Router::new("GET / index", targets, RouterOptions::new()).unwrap();
        assert!(router.route_or_not_found(Method::Get, "/missing").is_none());
    }

    #[test]
    fn test_router_unknown_target() {
        let result = Router::new("GET / nowhere", entries(), RouterOptions::new());
        assert!(matches!(result, Err(RouterError::UnknownTarget(_))));
    }

    #[test]
    fn test_options_deserialize() {
        let options: RouterOptions = serde_json::from_str(r#"{"cache_size": 16}"#).unwrap();
        assert_eq!(options, RouterOptions::new().with_cache_size(16));

        let options: RouterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.cache_size, DEFAULT_CACHE_SIZE);
    }
}
