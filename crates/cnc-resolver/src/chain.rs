//! Provider chain
//!
//! Queries providers strictly in [`ProviderRank`] order and returns the first
//! usable descriptor. Iteration order is the priority order, so there is no
//! scoring and no tie-break.
//!
//! # Recovery
//!
//! A provider that errors or returns a malformed descriptor is reported to the
//! [`EventSink`] and treated as absent for that request. No retries. The
//! lowest tier is a [`FallbackProvider`], so [`ProviderChain::resolve`] always
//! produces a result.

use crate::descriptor::{ProviderRank, ResolutionResult};
use crate::error::ChainError;
use crate::events::{EventSink, ResolutionEvent, TracingSink};
use crate::identifier::NormalizedId;
use crate::provider::{FallbackProvider, Provider};
use std::sync::Arc;

struct RankedProvider {
    rank: ProviderRank,
    provider: Box<dyn Provider>,
}

/// Ordered set of providers with a total fallback
pub struct ProviderChain {
    /// Lookup providers sorted by rank, registration order within a rank
    lookups: Vec<RankedProvider>,
    fallback: Box<dyn FallbackProvider>,
    sink: Arc<dyn EventSink>,
}

impl ProviderChain {
    /// Start building a chain
    #[inline]
    #[must_use]
    pub fn builder() -> ProviderChainBuilder {
        ProviderChainBuilder::default()
    }

    /// Resolve a normalized identifier
    ///
    /// Result priority equals the rank of the first provider that returned a
    /// well-formed descriptor, or [`ProviderRank::Procedural`] if none did.
    pub fn resolve(&self, id: &NormalizedId) -> ResolutionResult {
        for entry in &self.lookups {
            let name = entry.provider.name();
            match entry.provider.lookup(id) {
                Ok(Some(descriptor)) if descriptor.is_malformed() => {
                    self.sink.emit(&ResolutionEvent::ProviderMalformed {
                        id: id.clone(),
                        rank: entry.rank,
                        provider: name.to_string(),
                    });
                }
                Ok(Some(descriptor)) => {
                    self.sink.emit(&ResolutionEvent::Resolved {
                        id: id.clone(),
                        rank: entry.rank,
                        provider: name.to_string(),
                    });
                    return ResolutionResult::new(entry.rank, name, descriptor);
                }
                Ok(None) => {}
                Err(error) => {
                    self.sink.emit(&ResolutionEvent::ProviderFailed {
                        id: id.clone(),
                        rank: entry.rank,
                        provider: name.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }

        let name = self.fallback.name();
        let descriptor = self.fallback.generate(id);
        self.sink.emit(&ResolutionEvent::Resolved {
            id: id.clone(),
            rank: ProviderRank::Procedural,
            provider: name.to_string(),
        });
        ResolutionResult::new(ProviderRank::Procedural, name, descriptor)
    }

    /// Sink receiving this chain's diagnostics
    #[inline]
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// Provider names in query order, fallback last
    #[must_use]
    pub fn describe(&self) -> Vec<(ProviderRank, String)> {
        self.lookups
            .iter()
            .map(|entry| (entry.rank, entry.provider.name().to_string()))
            .chain(std::iter::once((
                ProviderRank::Procedural,
                self.fallback.name().to_string(),
            )))
            .collect()
    }

    /// Number of lookup providers (fallback excluded)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    /// Chain holds only the fallback
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.describe())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ProviderChain`]
///
/// Providers are injected explicitly; ranks are fixed by the method used.
#[derive(Default)]
pub struct ProviderChainBuilder {
    lookups: Vec<RankedProvider>,
    fallback: Option<Box<dyn FallbackProvider>>,
    sink: Option<Arc<dyn EventSink>>,
    error: Option<ChainError>,
}

impl ProviderChainBuilder {
    /// Register a user-override provider (rank 1)
    #[must_use]
    pub fn user_override(self, provider: impl Provider + 'static) -> Self {
        self.with_provider(ProviderRank::UserOverride, provider)
    }

    /// Register an authoritative record provider (rank 2)
    #[must_use]
    pub fn oem_record(self, provider: impl Provider + 'static) -> Self {
        self.with_provider(ProviderRank::OemRecord, provider)
    }

    /// Register a learned-data provider (rank 3)
    #[must_use]
    pub fn learned(self, provider: impl Provider + 'static) -> Self {
        self.with_provider(ProviderRank::Learned, provider)
    }

    /// Register a lookup provider at `rank`
    ///
    /// [`ProviderRank::Procedural`] is reserved for the fallback; using it
    /// makes [`build`](Self::build) fail.
    #[must_use]
    pub fn with_provider(mut self, rank: ProviderRank, provider: impl Provider + 'static) -> Self {
        if rank == ProviderRank::Procedural {
            self.error.get_or_insert(ChainError::ReservedRank(rank));
            return self;
        }
        self.lookups.push(RankedProvider {
            rank,
            provider: Box::new(provider),
        });
        self
    }

    /// Set the total fallback generator (rank 4)
    #[must_use]
    pub fn fallback(mut self, provider: impl FallbackProvider + 'static) -> Self {
        self.fallback = Some(Box::new(provider));
        self
    }

    /// Set the diagnostic sink; defaults to [`TracingSink`]
    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Finish the chain
    ///
    /// # Errors
    /// - [`ChainError::MissingFallback`] if no fallback was set
    /// - [`ChainError::ReservedRank`] if a lookup provider used the fallback rank
    pub fn build(self) -> Result<ProviderChain, ChainError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let fallback = self.fallback.ok_or(ChainError::MissingFallback)?;

        let mut lookups = self.lookups;
        // Stable: registration order is kept within a tier
        lookups.sort_by_key(|entry| entry.rank);

        Ok(ProviderChain {
            lookups,
            fallback,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::error::ProviderError;
    use crate::events::MemorySink;
    use crate::identifier::normalize;
    use crate::provider::FnProvider;
    use proptest::prelude::*;
    use serde_json::json;

    struct Generic;

    impl FallbackProvider for Generic {
        fn name(&self) -> &str {
            "generic"
        }

        fn generate(&self, id: &NormalizedId) -> Descriptor {
            Descriptor::new(json!({"id": id.as_str(), "type": "3axis"}))
        }
    }

    fn hit(name: &'static str) -> FnProvider<impl Fn(&NormalizedId) -> crate::ProviderResult<Option<Descriptor>>> {
        FnProvider::new(name, move |_: &NormalizedId| {
            Ok(Some(Descriptor::new(json!({"from": name}))))
        })
    }

    fn miss(name: &'static str) -> FnProvider<impl Fn(&NormalizedId) -> crate::ProviderResult<Option<Descriptor>>> {
        FnProvider::new(name, |_: &NormalizedId| Ok(None))
    }

    #[test]
    fn first_match_wins() {
        let chain = ProviderChain::builder()
            .learned(hit("learned"))
            .oem_record(hit("oem"))
            .fallback(Generic)
            .build()
            .unwrap();

        let result = chain.resolve(&normalize("x"));
        assert_eq!(result.source, ProviderRank::OemRecord);
        assert_eq!(result.priority, 2);
        assert_eq!(result.provider, "oem");
    }

    #[test]
    fn falls_through_to_fallback() {
        let chain = ProviderChain::builder()
            .user_override(miss("user"))
            .oem_record(miss("oem"))
            .fallback(Generic)
            .build()
            .unwrap();

        let result = chain.resolve(&normalize("x"));
        assert_eq!(result.source, ProviderRank::Procedural);
        assert_eq!(result.provider, "generic");
        assert!(!result.has_geometry);
    }

    #[test]
    fn registration_order_within_tier() {
        let chain = ProviderChain::builder()
            .oem_record(miss("catalog_a"))
            .oem_record(hit("catalog_b"))
            .oem_record(hit("catalog_c"))
            .fallback(Generic)
            .build()
            .unwrap();

        assert_eq!(chain.resolve(&normalize("x")).provider, "catalog_b");
    }

    #[test]
    fn failing_provider_is_skipped_and_reported() {
        let sink = Arc::new(MemorySink::new());
        let chain = ProviderChain::builder()
            .user_override(FnProvider::new("broken", |_: &NormalizedId| {
                Err(ProviderError::Other("disk gone".into()))
            }))
            .learned(hit("learned"))
            .fallback(Generic)
            .event_sink(sink.clone())
            .build()
            .unwrap();

        let result = chain.resolve(&normalize("x"));
        assert_eq!(result.source, ProviderRank::Learned);
        assert_eq!(
            sink.count(|e| matches!(e, ResolutionEvent::ProviderFailed { provider, .. } if provider == "broken")),
            1
        );
    }

    #[test]
    fn malformed_descriptor_is_skipped_and_reported() {
        let sink = Arc::new(MemorySink::new());
        let chain = ProviderChain::builder()
            .oem_record(FnProvider::new("nulls", |_: &NormalizedId| {
                Ok(Some(Descriptor::new(serde_json::Value::Null)))
            }))
            .fallback(Generic)
            .event_sink(sink.clone())
            .build()
            .unwrap();

        let result = chain.resolve(&normalize("x"));
        assert_eq!(result.source, ProviderRank::Procedural);
        assert_eq!(
            sink.count(|e| matches!(e, ResolutionEvent::ProviderMalformed { .. })),
            1
        );
    }

    #[test]
    fn build_requires_fallback() {
        let err = ProviderChain::builder().oem_record(miss("oem")).build().unwrap_err();
        assert_eq!(err, ChainError::MissingFallback);
    }

    #[test]
    fn procedural_rank_is_reserved() {
        let err = ProviderChain::builder()
            .with_provider(ProviderRank::Procedural, miss("sneaky"))
            .fallback(Generic)
            .build()
            .unwrap_err();
        assert_eq!(err, ChainError::ReservedRank(ProviderRank::Procedural));
    }

    #[test]
    fn describe_lists_query_order() {
        let chain = ProviderChain::builder()
            .learned(miss("learned"))
            .user_override(miss("user"))
            .fallback(Generic)
            .build()
            .unwrap();

        let names: Vec<String> = chain.describe().into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["user", "learned", "generic"]);
        assert_eq!(chain.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_priority_is_first_matching_rank(mask in proptest::array::uniform3(any::<bool>())) {
            let mut builder = ProviderChain::builder();
            for (i, present) in mask.iter().enumerate() {
                let rank = ProviderRank::ALL[i];
                builder = if *present {
                    builder.with_provider(rank, hit(rank.as_str()))
                } else {
                    builder.with_provider(rank, miss(rank.as_str()))
                };
            }
            let chain = builder.fallback(Generic).event_sink(Arc::new(crate::events::NullSink)).build().unwrap();

            let expected = mask
                .iter()
                .position(|present| *present)
                .map_or(ProviderRank::Procedural.priority(), |i| ProviderRank::ALL[i].priority());

            let result = chain.resolve(&normalize("any"));
            prop_assert_eq!(result.priority, expected);
            prop_assert_eq!(result.source.priority(), result.priority);
        }
    }
}
