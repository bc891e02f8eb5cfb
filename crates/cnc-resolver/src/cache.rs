//! Resolution cache using moka
//!
//! Write-once per key: once a result is stored it stays until the caller
//! invalidates it. The resolver itself never evicts anything; the cache is
//! unbounded unless a capacity is configured.

use crate::descriptor::ResolutionResult;
use crate::identifier::NormalizedId;
use moka::sync::Cache;
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Cache of resolution results keyed by normalized identifier
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    inner: Cache<NormalizedId, Arc<ResolutionResult>>,
}

impl ResolutionCache {
    /// Create unbounded cache
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Create cache holding at most `max_capacity` entries
    #[inline]
    #[must_use]
    pub fn bounded(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Create cache from optional capacity
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: Option<u64>) -> Self {
        capacity.map_or_else(Self::unbounded, Self::bounded)
    }

    /// Get cached result
    #[inline]
    #[must_use]
    pub fn get(&self, key: &NormalizedId) -> Option<Arc<ResolutionResult>> {
        self.inner.get(key)
    }

    /// Store a result unless one is already present
    ///
    /// Returns the value that ended up in the cache, which is the earlier
    /// one if another caller got there first.
    pub fn put(&self, key: NormalizedId, value: ResolutionResult) -> Arc<ResolutionResult> {
        self.inner.entry(key).or_insert(Arc::new(value)).into_value()
    }

    /// Get cached result or compute it once
    ///
    /// Concurrent callers for the same missing key wait for a single
    /// evaluation of `resolve` and all receive its result.
    pub fn get_or_resolve<F>(&self, key: NormalizedId, resolve: F) -> Arc<ResolutionResult>
    where
        F: FnOnce() -> ResolutionResult,
    {
        self.inner.get_with(key, || Arc::new(resolve()))
    }

    /// Check if cache holds key
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &NormalizedId) -> bool {
        self.inner.contains_key(key)
    }

    /// Drop one entry
    #[inline]
    pub fn invalidate(&self, key: &NormalizedId) {
        self.inner.invalidate(key);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }

    /// Number of live entries
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entry_count(),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
