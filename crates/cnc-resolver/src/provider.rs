//! Provider capabilities
//!
//! Two seams:
//! - [`Provider`]: fallible keyed lookup that may come back empty
//! - [`FallbackProvider`]: infallible generator used by the lowest tier
//!
//! Splitting them lets the type system guarantee that a chain always has a
//! result to hand back.

use crate::descriptor::Descriptor;
use crate::error::ProviderResult;
use crate::identifier::NormalizedId;
use std::sync::Arc;

/// Keyed descriptor source
///
/// Lookups are expected to be cheap in-memory reads without side effects.
pub trait Provider: Send + Sync {
    /// Name reported in resolution provenance and diagnostics
    fn name(&self) -> &str;

    /// Look up a descriptor for an already-normalized identifier
    ///
    /// # Errors
    /// Returns [`ProviderError`](crate::ProviderError) when the backing data
    /// cannot be read. The chain treats this as an absent result.
    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>>;
}

/// Total descriptor generator for the lowest-priority tier
pub trait FallbackProvider: Send + Sync {
    /// Name reported in resolution provenance
    fn name(&self) -> &str;

    /// Synthesize a best-guess descriptor; never fails
    fn generate(&self, id: &NormalizedId) -> Descriptor;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        (**self).lookup(id)
    }
}

impl<P: FallbackProvider + ?Sized> FallbackProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, id: &NormalizedId) -> Descriptor {
        (**self).generate(id)
    }
}

/// Adapter turning a closure into a [`Provider`]
///
/// Handy for wiring ad-hoc sources without a dedicated type.
pub struct FnProvider<F> {
    name: String,
    lookup: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&NormalizedId) -> ProviderResult<Option<Descriptor>> + Send + Sync,
{
    /// Wrap `lookup` under `name`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, lookup: F) -> Self {
        Self {
            name: name.into(),
            lookup,
        }
    }
}

impl<F> Provider for FnProvider<F>
where
    F: Fn(&NormalizedId) -> ProviderResult<Option<Descriptor>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        (self.lookup)(id)
    }
}
