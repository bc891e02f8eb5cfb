//! User-uploaded overrides
//!
//! Highest-priority source. Uploads land here at runtime; callers holding a
//! resolver should invalidate the affected id afterwards, since cached
//! results are never refreshed automatically.

use cnc_resolver::{normalize, Descriptor, NormalizedId, Provider, ProviderResult};
use dashmap::DashMap;

/// Concurrent store of user-supplied descriptors
#[derive(Debug, Default)]
pub struct UserOverrideStore {
    entries: DashMap<NormalizedId, Descriptor>,
}

impl UserOverrideStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the override for `raw_id`
    ///
    /// Returns the normalized key and the previous override, if any.
    pub fn upload(&self, raw_id: &str, descriptor: Descriptor) -> (NormalizedId, Option<Descriptor>) {
        let id = normalize(raw_id);
        let previous = self.entries.insert(id.clone(), descriptor);
        tracing::info!(%id, replaced = previous.is_some(), "user override uploaded");
        (id, previous)
    }

    /// Remove the override for `raw_id`
    pub fn remove(&self, raw_id: &str) -> Option<Descriptor> {
        self.entries.remove(&normalize(raw_id)).map(|(_, d)| d)
    }

    /// Check for an override
    #[inline]
    #[must_use]
    pub fn contains(&self, raw_id: &str) -> bool {
        self.entries.contains_key(&normalize(raw_id))
    }

    /// Number of overrides
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Provider for UserOverrideStore {
    fn name(&self) -> &str {
        "user_override"
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        Ok(self.entries.get(id).map(|entry| entry.value().clone()))
    }
}
