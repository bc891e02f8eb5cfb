//! Descriptors, provider ranks and resolution results
//!
//! A [`Descriptor`] is the opaque payload a provider hands back. The chain
//! wraps it into a [`ResolutionResult`] tagged with the [`ProviderRank`] of
//! the tier that produced it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Fixed priority tiers, highest priority first
///
/// The discriminant is the priority rank reported to callers (1 = best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderRank {
    /// Explicit user upload; always wins
    UserOverride = 1,

    /// Authoritative manufacturer record (e.g. OEM STEP geometry)
    OemRecord = 2,

    /// Derived from prior observations, lower confidence
    Learned = 3,

    /// Synthesized guess from the identifier itself
    Procedural = 4,
}

impl ProviderRank {
    /// All ranks in priority order
    pub const ALL: [ProviderRank; 4] = [
        ProviderRank::UserOverride,
        ProviderRank::OemRecord,
        ProviderRank::Learned,
        ProviderRank::Procedural,
    ];

    /// Numeric priority (1 = highest)
    #[inline]
    #[must_use]
    pub const fn priority(self) -> u8 {
        self as u8
    }

    /// Stable snake_case name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserOverride => "user_override",
            Self::OemRecord => "oem_record",
            Self::Learned => "learned",
            Self::Procedural => "procedural",
        }
    }
}

impl Display for ProviderRank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved entity data
///
/// The payload is never interpreted by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Opaque entity payload
    pub payload: serde_json::Value,

    /// Payload carries verified detailed geometry
    #[serde(default)]
    pub has_geometry: bool,
}

impl Descriptor {
    /// Create descriptor without verified geometry
    #[inline]
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            has_geometry: false,
        }
    }

    /// Mark whether the payload carries verified geometry
    #[inline]
    #[must_use]
    pub fn with_geometry(mut self, has_geometry: bool) -> Self {
        self.has_geometry = has_geometry;
        self
    }

    /// A `null` payload is malformed and treated as absent by the chain
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.payload.is_null()
    }
}

/// Provenance-tagged output of the provider chain for one identifier
///
/// `priority` always equals `source.priority()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Tier that supplied `data`
    pub source: ProviderRank,

    /// Name of the individual provider within that tier
    pub provider: String,

    /// Numeric rank of `source`
    pub priority: u8,

    /// Resolved descriptor
    pub data: Descriptor,

    /// Mirrors `data.has_geometry`
    pub has_geometry: bool,
}

impl ResolutionResult {
    /// Build result for a descriptor supplied by `provider` in tier `source`
    #[must_use]
    pub fn new(source: ProviderRank, provider: impl Into<String>, data: Descriptor) -> Self {
        Self {
            source,
            provider: provider.into(),
            priority: source.priority(),
            has_geometry: data.has_geometry,
            data,
        }
    }

    /// Learned or procedural data; callers may want to flag it to users
    #[inline]
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.source >= ProviderRank::Learned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rank_priorities_are_ordered() {
        let priorities: Vec<u8> = ProviderRank::ALL.iter().map(|r| r.priority()).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4]);
        assert!(ProviderRank::UserOverride < ProviderRank::Procedural);
    }

    #[test]
    fn rank_display() {
        assert_eq!(ProviderRank::OemRecord.to_string(), "oem_record");
        assert_eq!(
            serde_json::to_string(&ProviderRank::UserOverride).unwrap(),
            "\"user_override\""
        );
    }

    #[test]
    fn result_mirrors_descriptor() {
        let data = Descriptor::new(json!({"axes": 5})).with_geometry(true);
        let result = ResolutionResult::new(ProviderRank::OemRecord, "oem", data);

        assert_eq!(result.priority, 2);
        assert!(result.has_geometry);
        assert!(!result.is_low_confidence());
    }

    #[test]
    fn learned_and_procedural_are_low_confidence() {
        let data = Descriptor::new(json!({}));
        assert!(ResolutionResult::new(ProviderRank::Learned, "l", data.clone()).is_low_confidence());
        assert!(ResolutionResult::new(ProviderRank::Procedural, "p", data).is_low_confidence());
    }

    #[test]
    fn null_payload_is_malformed() {
        assert!(Descriptor::new(serde_json::Value::Null).is_malformed());
        assert!(!Descriptor::new(json!({"id": "x"})).is_malformed());
    }

    #[test]
    fn descriptor_geometry_defaults_false() {
        let d: Descriptor = serde_json::from_str(r#"{"payload": {"a": 1}}"#).unwrap();
        assert!(!d.has_geometry);
    }
}
