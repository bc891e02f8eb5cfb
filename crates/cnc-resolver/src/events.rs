//! Diagnostic events emitted during resolution
//!
//! The resolver never writes logs directly. It reports [`ResolutionEvent`]s to
//! an injected [`EventSink`]; [`TracingSink`] forwards them to `tracing`,
//! [`MemorySink`] keeps them for assertions.

use crate::descriptor::ProviderRank;
use crate::identifier::NormalizedId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Something observable happened while resolving an identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolutionEvent {
    /// Result served from cache
    CacheHit { id: NormalizedId },

    /// No cached result; chain will run
    CacheMiss { id: NormalizedId },

    /// Provider lookup returned an error and was skipped
    ProviderFailed {
        id: NormalizedId,
        rank: ProviderRank,
        provider: String,
        error: String,
    },

    /// Provider returned a descriptor the chain rejected
    ProviderMalformed {
        id: NormalizedId,
        rank: ProviderRank,
        provider: String,
    },

    /// Chain produced a result
    Resolved {
        id: NormalizedId,
        rank: ProviderRank,
        provider: String,
    },

    /// One cached entry dropped by the caller
    CacheInvalidated { id: NormalizedId },

    /// Whole cache dropped by the caller
    CacheCleared { entries: u64 },
}

impl ResolutionEvent {
    /// Identifier the event concerns, if any
    #[must_use]
    pub fn id(&self) -> Option<&NormalizedId> {
        match self {
            Self::CacheHit { id }
            | Self::CacheMiss { id }
            | Self::ProviderFailed { id, .. }
            | Self::ProviderMalformed { id, .. }
            | Self::Resolved { id, .. }
            | Self::CacheInvalidated { id } => Some(id),
            Self::CacheCleared { .. } => None,
        }
    }
}

/// Receiver for resolution diagnostics
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: &ResolutionEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: &ResolutionEvent) {
        (**self).emit(event);
    }
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &ResolutionEvent) {
        match event {
            ResolutionEvent::CacheHit { id } => {
                tracing::trace!(%id, "resolution cache hit");
            }
            ResolutionEvent::CacheMiss { id } => {
                tracing::debug!(%id, "resolution cache miss");
            }
            ResolutionEvent::ProviderFailed {
                id,
                rank,
                provider,
                error,
            } => {
                tracing::warn!(%id, %rank, provider = %provider, %error, "provider lookup failed, skipping");
            }
            ResolutionEvent::ProviderMalformed { id, rank, provider } => {
                tracing::warn!(%id, %rank, provider = %provider, "provider returned malformed descriptor, skipping");
            }
            ResolutionEvent::Resolved { id, rank, provider } => {
                tracing::debug!(%id, %rank, provider = %provider, "resolved descriptor");
            }
            ResolutionEvent::CacheInvalidated { id } => {
                tracing::info!(%id, "resolution cache entry invalidated");
            }
            ResolutionEvent::CacheCleared { entries } => {
                tracing::info!(entries, "resolution cache cleared");
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ResolutionEvent) {}
}

/// Records events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Vec<ResolutionEvent>>,
}

impl MemorySink {
    /// Create empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events
    #[must_use]
    pub fn events(&self) -> Vec<ResolutionEvent> {
        self.inner.lock().clone()
    }

    /// Number of recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&ResolutionEvent) -> bool) -> usize {
        self.inner.lock().iter().filter(|e| predicate(e)).count()
    }

    /// Drop recorded events
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &ResolutionEvent) {
        self.inner.lock().push(event.clone());
    }
}

/// Forwards each event to several sinks in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    /// Create empty fan-out
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a downstream sink
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: &ResolutionEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::normalize;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(&ResolutionEvent::CacheMiss { id: normalize("a") });
        sink.emit(&ResolutionEvent::CacheHit { id: normalize("a") });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ResolutionEvent::CacheMiss { .. }));
        assert!(matches!(events[1], ResolutionEvent::CacheHit { .. }));

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());
        let fanout = FanoutSink::new().with(a.clone()).with(b.clone());

        fanout.emit(&ResolutionEvent::CacheCleared { entries: 3 });

        assert_eq!(a.events().len(), 1);
        assert_eq!(b.events().len(), 1);
    }

    #[test]
    fn event_id_accessor() {
        let event = ResolutionEvent::Resolved {
            id: normalize("x"),
            rank: ProviderRank::Procedural,
            provider: "procedural".into(),
        };
        assert_eq!(event.id().map(NormalizedId::as_str), Some("x"));
        assert!(ResolutionEvent::CacheCleared { entries: 0 }.id().is_none());
    }

    #[test]
    fn event_serializes_tagged() {
        let event = ResolutionEvent::CacheHit { id: normalize("A B") };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "cache_hit");
        assert_eq!(json["id"], "a_b");
    }

    #[test]
    fn tracing_sink_accepts_every_variant() {
        let id = normalize("x");
        let sink = TracingSink;
        sink.emit(&ResolutionEvent::CacheHit { id: id.clone() });
        sink.emit(&ResolutionEvent::ProviderFailed {
            id,
            rank: ProviderRank::Learned,
            provider: "learned".into(),
            error: "boom".into(),
        });
    }
}
