//! Compressed radix tree for URL path patterns.
//!
//! Patterns are made of literal text, named parameters (`:name`, one path
//! segment) and a trailing catch-all (`*name`, the rest of the path).
//! Shared literal prefixes are factored into common ancestor nodes.
//!
//! ## Example
//!
//! ```
//! use path_tree_r::PathTree;
//!
//! let mut tree = PathTree::new();
//! tree.insert("/user/:id", "user").unwrap();
//! tree.insert("/files/*rest", "files").unwrap();
//!
//! let (payload, params) = tree.find("/user/42").unwrap();
//! assert_eq!(*payload, "user");
//! assert_eq!(params.get("id"), Some("42"));
//!
//! let (payload, params) = tree.find("/files/a/b/c").unwrap();
//! assert_eq!(*payload, "files");
//! assert_eq!(params.get("rest"), Some("a/b/c"));
//!
//! assert!(tree.find("/user/42/").is_none());
//! ```

mod node;
mod params;
mod pattern;

pub use node::NodeKind;
pub use params::Params;

use tracing::debug;

use crate::error::{InsertError, NotFound};
use node::Node;
use pattern::Token;

/// Radix tree mapping path patterns to payloads.
///
/// Built through [`insert`](Self::insert) calls, then queried with
/// [`find`](Self::find). Lookups only need `&self`, so a finished tree can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct PathTree<T> {
    root: Node<T>,
    /// Largest parameter count of any inserted pattern
    max_params: usize,
    /// Number of registered patterns
    len: usize,
}

impl<T> Default for PathTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTree<T> {
    /// Create an empty tree. The root node holds `/`.
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeKind::Static, "/"),
            max_params: 0,
            len: 0,
        }
    }

    /// Register `pattern` with `payload`.
    ///
    /// Fails with [`InsertError::DuplicateRoute`] if the pattern is already
    /// registered. A failed insert leaves the tree unchanged.
    pub fn insert(&mut self, pattern: &str, payload: T) -> Result<(), InsertError> {
        self.insert_inner(pattern, payload, false).map(|_| ())
    }

    /// Register `pattern` with `payload`, replacing any payload already
    /// registered for the same pattern. Returns the replaced payload.
    pub fn insert_or_replace(&mut self, pattern: &str, payload: T) -> Result<Option<T>, InsertError> {
        self.insert_inner(pattern, payload, true)
    }

    fn insert_inner(&mut self, pattern: &str, payload: T, replace: bool) -> Result<Option<T>, InsertError> {
        let tokens = pattern::tokenize(pattern)?;

        let (first, rest) = match tokens.split_first() {
            Some((Token::Static(first), rest)) => (first.as_bytes(), rest),
            _ => return Err(InsertError::EmptyPattern(pattern.to_string())),
        };

        let node = self
            .root
            .insert_static(first, rest)
            .map_err(|conflict| conflict.into_error(pattern))?;

        if node.payload.is_some() && !replace {
            return Err(InsertError::DuplicateRoute(pattern.to_string()));
        }

        let previous = node.payload.replace(payload);
        node.param_names = pattern::param_names(&tokens).map(str::to_string).collect();
        let params = node.param_names.len();

        if previous.is_none() {
            self.len += 1;
        }
        self.max_params = self.max_params.max(params);

        debug!(
            pattern,
            params,
            replaced = previous.is_some(),
            "route registered"
        );

        Ok(previous)
    }

    /// Look up `path`, returning the payload and the captured parameters.
    pub fn find<'a>(&'a self, path: &'a str) -> Option<(&'a T, Params<'a>)> {
        let mut params = Params::with_capacity(self.max_params);
        let payload = self.find_with(path, &mut params).ok()?;
        Some((payload, params))
    }

    /// Look up `path`, writing captured parameters into `params`.
    ///
    /// `params` is cleared first. Concurrent callers each need their own
    /// buffer.
    pub fn find_with<'a>(&'a self, path: &'a str, params: &mut Params<'a>) -> Result<&'a T, NotFound> {
        params.clear();

        let mut values = Vec::with_capacity(self.max_params);
        let node = self.root.find(path, 0, &mut values).ok_or(NotFound)?;
        let payload = node.payload.as_ref().ok_or(NotFound)?;

        debug_assert_eq!(node.param_names.len(), values.len());
        for (name, value) in node.param_names.iter().zip(values) {
            params.push(name, value);
        }

        Ok(payload)
    }

    /// Largest number of parameters in a single registered pattern.
    ///
    /// Capture buffers of this size never reallocate during a lookup.
    pub fn max_params(&self) -> usize {
        self.max_params
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
