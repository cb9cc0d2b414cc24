//! Path Tree - A compressed radix tree for URL path routing
//!
//! This library maps URL path patterns to payloads with support for:
//! - Static paths with shared-prefix compression
//! - Named parameters (`:name`) matching one path segment
//! - Catch-all parameters (`*name`) matching the rest of the path
//! - Per-method route tables with LRU caching of lookups
//!
//! # Example
//!
//! ```rust
//! use path_tree_r::{Method, Router, RouterOptions, TargetEntry};
//!
//! let routes = "
//! GET  /                 index
//! GET  /user/:id         show_user    # one user
//! POST /user             create_user
//! *    /static/*path     assets       # any method
//! ";
//!
//! // Define targets
//! let targets = vec![
//!     TargetEntry::new("index", "INDEX"),
//!     TargetEntry::new("show_user", "SHOW_USER"),
//!     TargetEntry::new("create_user", "CREATE_USER"),
//!     TargetEntry::new("assets", "ASSETS"),
//! ];
//!
//! let router = Router::new(routes, targets, RouterOptions::new()).unwrap();
//!
//! // Match requests
//! let result = router.route(Method::Get, "/user/42?tab=posts").unwrap();
//! assert_eq!(result.payload, "SHOW_USER");
//! assert_eq!(result.param("id"), Some("42"));
//! assert_eq!(result.query, "tab=posts");
//!
//! let result = router.route(Method::Head, "/static/css/site.css").unwrap();
//! assert_eq!(result.param("path"), Some("css/site.css"));
//! ```
//!
//! The tree can also be used directly:
//!
//! ```rust
//! use path_tree_r::PathTree;
//!
//! let mut tree = PathTree::new();
//! tree.insert("/search/:query", 1).unwrap();
//! tree.insert("/search/literal", 2).unwrap();
//!
//! // Static segments win over parameters
//! assert_eq!(*tree.find("/search/literal").unwrap().0, 2);
//! assert_eq!(*tree.find("/search/rust").unwrap().0, 1);
//! ```
//!
//! # Pattern Syntax
//!
//! | Segment | Example | Matches |
//! |---------|---------|---------|
//! | Literal | `/about` | Exactly `/about` |
//! | Parameter | `/user/:id` | One non-empty segment, up to the next `/` |
//! | Catch-all | `/files/*path` | The rest of the path, `/` included |
//!
//! A catch-all must be the final segment. Matching is byte-exact and
//! case-sensitive; paths are not normalized.
//!
//! # Route Table Syntax
//!
//! ```text
//! METHOD PATTERN TARGET
//! ```
//!
//! `METHOD` is an HTTP method or `*` for any method. `#` starts a comment and
//! `file: path/to/table.routes` includes another table.

pub mod compile;
pub mod error;
pub mod parser;
pub mod router;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, CompiledRouteTable};
pub use error::{InsertError, NotFound, Result, RouterError};
pub use parser::{parse_routes, parse_routes_from_file};
pub use tree::{NodeKind, Params, PathTree};
pub use types::{Method, RouteMatch, RouteRule};

// Re-export router types
pub use router::{
    split_query, Router, RouterOptions, TargetEntry, DEFAULT_CACHE_SIZE, NOT_FOUND_TARGET,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_full_workflow() {
        let text = r#"
# Pages
GET  /                  index
GET  /user/:id          show_user
GET  /user/:id/posts    user_posts

# Uploads
POST /upload            upload

# Static files for every method
*    /static/*path      assets
"#;

        // Parse routes
        let rules = parse_routes(text).unwrap();
        assert_eq!(rules.len(), 5);

        // Define targets
        let mut targets = HashMap::new();
        targets.insert("index".to_string(), "INDEX");
        targets.insert("show_user".to_string(), "SHOW_USER");
        targets.insert("user_posts".to_string(), "USER_POSTS");
        targets.insert("upload".to_string(), "UPLOAD");
        targets.insert("assets".to_string(), "ASSETS");

        // Compile routes
        let compiled = compile(&rules, &targets, 1024).unwrap();
        assert_eq!(compiled.route_count(), 5);

        let result = compiled.match_route(Method::Get, "/").unwrap();
        assert_eq!(result.payload, "INDEX");

        let result = compiled.match_route(Method::Get, "/user/7").unwrap();
        assert_eq!(result.payload, "SHOW_USER");
        assert_eq!(result.param("id"), Some("7"));

        let result = compiled.match_route(Method::Get, "/user/7/posts").unwrap();
        assert_eq!(result.payload, "USER_POSTS");

        let result = compiled.match_route(Method::Post, "/upload").unwrap();
        assert_eq!(result.payload, "UPLOAD");
        assert!(compiled.match_route(Method::Get, "/upload").is_none());

        let result = compiled.match_route(Method::Delete, "/static/img/logo.png").unwrap();
        assert_eq!(result.payload, "ASSETS");
        assert_eq!(result.param("path"), Some("img/logo.png"));

        assert!(compiled.match_route(Method::Get, "/user/7/").is_none());
    }
}
