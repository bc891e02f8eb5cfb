//! Model resolver
//!
//! Memoizing front for a [`ProviderChain`]. Each key moves once from
//! unresolved to resolved and stays there until the caller clears it.

use crate::cache::{CacheStats, ResolutionCache};
use crate::chain::ProviderChain;
use crate::config::ResolverConfig;
use crate::descriptor::ResolutionResult;
use crate::events::ResolutionEvent;
use crate::identifier::{normalize, NormalizedId};
use std::sync::Arc;

/// Picks the best available descriptor for an entity identifier
///
/// # Example
///
/// ```rust,ignore
/// let resolver = ModelResolver::new(chain, ResolverConfig::default());
///
/// let result = resolver.get_best_descriptor("Hurco VM-50 i");
/// if result.is_low_confidence() {
///     warn_user(&result);
/// }
/// ```
#[derive(Debug)]
pub struct ModelResolver {
    chain: ProviderChain,
    cache: ResolutionCache,
    config: ResolverConfig,
}

impl ModelResolver {
    /// Create resolver over `chain`
    #[must_use]
    pub fn new(chain: ProviderChain, config: ResolverConfig) -> Self {
        Self {
            cache: ResolutionCache::with_capacity(config.cache_capacity),
            chain,
            config,
        }
    }

    /// Resolve a raw identifier
    ///
    /// Total: every input yields a result, at worst a procedural guess.
    /// Repeated calls return the same shared result until the cache is
    /// cleared.
    pub fn get_best_descriptor(&self, raw_id: &str) -> Arc<ResolutionResult> {
        self.resolve_normalized(normalize(raw_id))
    }

    /// Resolve an identifier that may be absent; absent maps to the empty id
    pub fn get_best_descriptor_opt(&self, raw_id: Option<&str>) -> Arc<ResolutionResult> {
        self.resolve_normalized(NormalizedId::from_optional(raw_id))
    }

    /// Resolve an already-normalized identifier
    pub fn resolve_normalized(&self, id: NormalizedId) -> Arc<ResolutionResult> {
        let sink = self.chain.sink();

        if let Some(cached) = self.cache.get(&id) {
            sink.emit(&ResolutionEvent::CacheHit { id });
            return cached;
        }
        sink.emit(&ResolutionEvent::CacheMiss { id: id.clone() });

        if self.config.coalesce_in_flight {
            self.cache
                .get_or_resolve(id.clone(), || self.chain.resolve(&id))
        } else {
            let result = self.chain.resolve(&id);
            self.cache.put(id, result)
        }
    }

    /// Drop every cached result so the next lookups rerun the chain
    pub fn clear_cache(&self) {
        let entries = self.cache.entry_count();
        self.cache.clear();
        self.chain
            .sink()
            .emit(&ResolutionEvent::CacheCleared { entries });
    }

    /// Drop the cached result for one identifier, e.g. after an override upload
    pub fn invalidate(&self, raw_id: &str) {
        let id = normalize(raw_id);
        self.cache.invalidate(&id);
        self.chain
            .sink()
            .emit(&ResolutionEvent::CacheInvalidated { id });
    }

    /// Cache statistics
    #[inline]
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Underlying provider chain
    #[inline]
    #[must_use]
    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}
