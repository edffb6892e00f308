use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::types::dto::common::PageMeta;

/// Identifier used to memoize a list query's result, derived from the
/// query's filter shape rather than its full parameter set. Deliberately
/// coarse: each class is a whole-collection snapshot, so the first
/// successful query's page shape is served for any page/limit until the
/// entry expires or is invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterClass {
    AllProducts,
    ApprovedProducts,
    AllUsers,
}

impl FilterClass {
    pub fn key(self) -> &'static str {
        match self {
            FilterClass::AllProducts => "ALL_PRODUCTS",
            FilterClass::ApprovedProducts => "APPROVED_PRODUCTS",
            FilterClass::AllUsers => "ALL_USERS",
        }
    }
}

/// A memoized list result: the rows plus the metadata computed when the
/// query first ran.
#[derive(Debug, Clone)]
pub struct CachedPage<T> {
    pub rows: Vec<T>,
    pub metadata: PageMeta,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Memoizes expensive list queries under filter-class keys with a TTL and
/// explicit invalidation.
///
/// `get`/`set` are atomic per key; two concurrent misses computing the same
/// key race benignly - last writer wins. The cache never raises: a failure
/// to serve is simply a miss.
pub struct ListCache<V> {
    entries: DashMap<&'static str, CacheEntry<V>>,
}

impl<V: Clone> ListCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a fresh entry. Expired entries are evicted lazily here.
    pub fn get(&self, class: FilterClass) -> Option<V> {
        let key = class.key();

        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.value.clone());
            }
        }

        self.entries
            .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
        None
    }

    /// Store a value under the filter class, overwriting any previous entry.
    pub fn set(&self, class: FilterClass, value: V, ttl: Duration) {
        self.entries.insert(
            class.key(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop the entry for a filter class after a mutation to the underlying
    /// collection.
    pub fn invalidate(&self, class: FilterClass) {
        self.entries.remove(class.key());
    }
}

impl<V: Clone> Default for ListCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
