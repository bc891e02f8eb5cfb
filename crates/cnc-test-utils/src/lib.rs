//! Testing utilities for the CNC resolver workspace
//!
//! Shared providers, fixtures, and tracing setup.

#![allow(missing_docs)]

use cnc_resolver::{
    normalize, Descriptor, FallbackProvider, NormalizedId, Provider, ProviderError, ProviderResult,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Install a test-friendly tracing subscriber; safe to call repeatedly
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cnc_resolver=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn machine_descriptor(model: &str) -> Descriptor {
    Descriptor::new(json!({ "model": model }))
}

pub fn geometry_descriptor(model: &str) -> Descriptor {
    machine_descriptor(model).with_geometry(true)
}

/// In-memory provider over a fixed map
#[derive(Debug, Default)]
pub struct FixedProvider {
    name: String,
    entries: HashMap<NormalizedId, Descriptor>,
}

impl FixedProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Add an entry keyed by the normalized form of `raw_id`
    pub fn with_entry(mut self, raw_id: &str, descriptor: Descriptor) -> Self {
        self.entries.insert(normalize(raw_id), descriptor);
        self
    }
}

impl Provider for FixedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        Ok(self.entries.get(id).cloned())
    }
}

/// Provider whose lookups always fail
#[derive(Debug)]
pub struct FailingProvider {
    name: String,
}

impl FailingProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Provider for FailingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, _id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        Err(ProviderError::unavailable(self.name.clone(), "simulated failure"))
    }
}

/// Wraps a provider and counts lookups
#[derive(Debug)]
pub struct CountingProvider<P> {
    inner: P,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<NormalizedId>>>,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared counter, readable after the provider moves into a chain
    pub fn counter(&self) -> CallCounter {
        CallCounter {
            calls: self.calls.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<P: Provider> Provider for CountingProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(id.clone());
        self.inner.lookup(id)
    }
}

/// Read side of a [`CountingProvider`]
#[derive(Debug, Clone)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<NormalizedId>>>,
}

impl CallCounter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<NormalizedId> {
        self.seen.lock().clone()
    }
}

/// Fallback returning a generic 3-axis profile
#[derive(Debug, Default)]
pub struct GenericFallback;

impl FallbackProvider for GenericFallback {
    fn name(&self) -> &str {
        "generic"
    }

    fn generate(&self, id: &NormalizedId) -> Descriptor {
        Descriptor::new(json!({ "id": id.as_str(), "type": "3axis" }))
    }
}
