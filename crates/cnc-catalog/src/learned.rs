//! Learned descriptors
//!
//! Holds descriptors produced by an external learning/inference process.
//! Each entry carries a confidence in `[0, 1]`; entries under the store's
//! floor are treated as absent so the chain falls through to the procedural
//! guess instead.

use cnc_resolver::{normalize, Descriptor, NormalizedId, Provider, ProviderError, ProviderResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Learned descriptor with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedEntry {
    /// Inferred descriptor
    pub descriptor: Descriptor,

    /// Confidence in `[0, 1]`
    pub confidence: f32,

    /// Observations the inference was based on
    #[serde(default)]
    pub observations: u32,
}

/// Concurrent store of learned descriptors
#[derive(Debug)]
pub struct LearnedStore {
    entries: DashMap<NormalizedId, LearnedEntry>,
    min_confidence: f32,
}

impl LearnedStore {
    /// Default confidence floor
    pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

    /// Create store with the given confidence floor
    ///
    /// The floor is clamped to `[0, 1]`; a non-finite floor falls back to
    /// [`DEFAULT_MIN_CONFIDENCE`](Self::DEFAULT_MIN_CONFIDENCE).
    #[must_use]
    pub fn new(min_confidence: f32) -> Self {
        let min_confidence = if min_confidence.is_finite() {
            min_confidence.clamp(0.0, 1.0)
        } else {
            tracing::warn!(min_confidence, "non-finite confidence floor, using default");
            Self::DEFAULT_MIN_CONFIDENCE
        };
        Self {
            entries: DashMap::new(),
            min_confidence,
        }
    }

    /// Record an inference result, replacing any earlier one
    pub fn record(&self, raw_id: &str, entry: LearnedEntry) -> NormalizedId {
        let id = normalize(raw_id);
        tracing::debug!(%id, confidence = entry.confidence, "learned descriptor recorded");
        self.entries.insert(id.clone(), entry);
        id
    }

    /// Stored entry regardless of confidence
    #[must_use]
    pub fn entry(&self, raw_id: &str) -> Option<LearnedEntry> {
        self.entries
            .get(&normalize(raw_id))
            .map(|e| e.value().clone())
    }

    /// Confidence floor
    #[inline]
    #[must_use]
    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Number of stored entries
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

impl Default for LearnedStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CONFIDENCE)
    }
}

impl Provider for LearnedStore {
    fn name(&self) -> &str {
        "learned"
    }

    fn lookup(&self, id: &NormalizedId) -> ProviderResult<Option<Descriptor>> {
        let Some(entry) = self.entries.get(id) else {
            return Ok(None);
        };

        if !entry.confidence.is_finite() || !(0.0..=1.0).contains(&entry.confidence) {
            return Err(ProviderError::corrupt_record(
                "learned",
                id.as_str(),
                format!("confidence {} outside [0, 1]", entry.confidence),
            ));
        }

        if entry.confidence < self.min_confidence {
            return Ok(None);
        }
        Ok(Some(entry.descriptor.clone()))
    }
}
