//! Operation caches.
//!
//! Each recursive operation memoizes its intermediate results in its own
//! cache, keyed by the normalized operand handles (sorted for the commutative
//! operations, ordered for difference). A cache holds owning references to
//! its keys' operands and to its results; clearing it is the only way to drop
//! otherwise-unreachable results.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

/// The identity of a materialized `(env, proto)` pair, used to key the
/// arc-view cache and the per-call visit caches.
pub type ViewKey = (usize, usize);

/// A snapshot of one cache's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// A memoization table with hit/miss statistics.
pub struct OpCache<K, R> {
    map: RefCell<HashMap<K, R>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K: Eq + Hash, R: Clone> OpCache<K, R> {
    /// Creates a cache with an initial capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        OpCache {
            map: RefCell::new(HashMap::with_capacity(capacity)),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Looks up a previously computed result.
    pub fn get(&self, key: &K) -> Option<R> {
        match self.map.borrow().get(key) {
            Some(result) => {
                self.hits.set(self.hits.get() + 1);
                Some(result.clone())
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Records a computed result.
    pub fn insert(&self, key: K, result: R) {
        self.map.borrow_mut().insert(key, result);
    }

    /// Drops all entries. Statistics are kept.
    pub fn clear(&self) {
        self.map.borrow_mut().clear();
    }

    /// The number of memoized entries.
    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    /// Lookups that found an entry.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Lookups that found nothing.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// A snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits(),
            misses: self.misses(),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_insert() {
        let cache = OpCache::<(u32, u32), u32>::with_capacity(4);
        assert_eq!(cache.get(&(1, 2)), None);

        cache.insert((1, 2), 42);
        assert_eq!(cache.get(&(1, 2)), Some(42));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_statistics() {
        let cache = OpCache::<(u32, u32), u32>::with_capacity(4);
        cache.get(&(1, 2));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 0);

        cache.insert((1, 2), 7);
        cache.get(&(1, 2));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = OpCache::<u32, u32>::with_capacity(4);
        cache.insert(1, 10);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }
}
