use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{Result, RouterError};
use crate::tree::PathTree;
use crate::types::{CacheKey, Method, RouteMatch, RouteRule};

/// Cache value type: the owned match, or `None` for a cached miss
type CacheValue<T> = Option<RouteMatch<T>>;

/// Per-method path trees with LRU caching of lookups
pub struct CompiledRouteTable<T: Clone> {
    trees: BTreeMap<Method, PathTree<T>>,
    /// `None` when caching is disabled
    cache: Option<Mutex<LruCache<CacheKey, CacheValue<T>>>>,
}

impl<T: Clone> CompiledRouteTable<T> {
    /// Create a table from per-method trees. A `cache_size` of 0 disables
    /// the lookup cache.
    pub fn new(trees: BTreeMap<Method, PathTree<T>>, cache_size: usize) -> Self {
        let cache = NonZeroUsize::new(cache_size).map(|size| Mutex::new(LruCache::new(size)));
        Self { trees, cache }
    }

    /// Match a request against the table.
    ///
    /// Routes registered for `method` win over routes registered for
    /// [`Method::Any`].
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch<T>> {
        let Some(cache) = &self.cache else {
            return self.find_match(method, path);
        };

        let key = CacheKey::new(method, path);
        let mut cache = cache.lock();

        if let Some(cached) = cache.get(&key) {
            trace!(%method, path, "route cache hit");
            return cached.clone();
        }

        // Lookup is CPU-only, so computing under the lock is acceptable
        trace!(%method, path, "route cache miss");
        let result = self.find_match(method, path);
        cache.put(key, result.clone());

        result
    }

    /// Find a matching route without caching
    fn find_match(&self, method: Method, path: &str) -> Option<RouteMatch<T>> {
        let lookup = |m: Method| self.trees.get(&m).and_then(|tree| tree.find(path));

        let (payload, params) = match lookup(method) {
            Some(found) => found,
            None if method != Method::Any => lookup(Method::Any)?,
            None => return None,
        };

        Some(RouteMatch {
            payload: payload.clone(),
            params: params.to_owned_vec(),
            query: String::new(),
        })
    }

    /// The tree holding routes registered for `method`
    pub fn tree(&self, method: Method) -> Option<&PathTree<T>> {
        self.trees.get(&method)
    }

    /// Get the number of routes across all methods
    pub fn route_count(&self) -> usize {
        self.trees.values().map(PathTree::len).sum()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}

/// Compile route rules into a CompiledRouteTable
///
/// Target names are looked up lowercased; `targets` keys are expected to be
/// lowercase already.
pub fn compile<T: Clone>(
    rules: &[RouteRule],
    targets: &HashMap<String, T>,
    cache_size: usize,
) -> Result<CompiledRouteTable<T>> {
    let mut trees: BTreeMap<Method, PathTree<T>> = BTreeMap::new();

    for rule in rules {
        let target = targets
            .get(&rule.target.to_lowercase())
            .cloned()
            .ok_or_else(|| RouterError::UnknownTarget(rule.target.clone()))?;

        trees
            .entry(rule.method)
            .or_default()
            .insert(&rule.pattern, target)
            .map_err(|source| RouterError::RouteError {
                line: rule.line_num,
                source,
            })?;
    }

    let table = CompiledRouteTable::new(trees, cache_size);
    debug!(
        routes = table.route_count(),
        cache_size, "route table compiled"
    );

    Ok(table)
}
