//! Identifier normalization
//!
//! Provides [`NormalizedId`], the canonical lookup key for every cache and
//! provider in the resolver. Raw identifiers ("Hurco VM-50 i") are turned into
//! stable keys ("hurco_vm_50_i") by [`normalize`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").expect("static pattern"));

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").expect("static pattern"));

/// Normalize a raw identifier into a lookup key.
///
/// Lowercases, collapses runs of whitespace and hyphens into a single `_`,
/// then drops every character outside `[a-z0-9_]`. Total and idempotent.
///
/// # Examples
/// ```
/// use cnc_resolver::normalize;
///
/// assert_eq!(normalize("Hurco VM-50 i").as_str(), "hurco_vm_50_i");
/// assert_eq!(normalize("").as_str(), "");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> NormalizedId {
    let lowered = raw.to_lowercase();
    let collapsed = SEPARATOR_RUNS.replace_all(&lowered, "_");
    let stripped = DISALLOWED.replace_all(&collapsed, "");
    NormalizedId(stripped.into_owned())
}

/// Canonical identifier, only constructible through [`normalize`]
///
/// Deserializing also normalizes, so keys read from catalog files line up
/// with keys produced from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedId(String);

impl NormalizedId {
    /// Normalize an optional raw identifier; absent input becomes the empty id
    #[inline]
    #[must_use]
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(normalize).unwrap_or_default()
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for the empty identifier
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `_`-separated tokens, skipping empty ones
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split('_').filter(|t| !t.is_empty())
    }
}

impl Display for NormalizedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedId {
    fn from(raw: &str) -> Self {
        normalize(raw)
    }
}

impl From<String> for NormalizedId {
    fn from(raw: String) -> Self {
        normalize(&raw)
    }
}

impl From<NormalizedId> for String {
    fn from(id: NormalizedId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalizes_machine_name() {
        assert_eq!(normalize("Hurco VM-50 i").as_str(), "hurco_vm_50_i");
    }

    #[test]
    fn collapses_mixed_separator_runs() {
        assert_eq!(normalize("Haas  -- UMC\t750").as_str(), "haas_umc_750");
        assert_eq!(normalize(" leading").as_str(), "_leading");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(normalize("DMG/Mori (DMU 50)").as_str(), "dmgmori_dmu_50");
        assert_eq!(normalize("Ø-axis").as_str(), "_axis");
    }

    #[test]
    fn keeps_existing_underscores() {
        assert_eq!(normalize("already_normal_5ax").as_str(), "already_normal_5ax");
    }

    #[test]
    fn empty_and_absent_inputs() {
        assert!(normalize("").is_empty());
        assert!(NormalizedId::from_optional(None).is_empty());
        assert_eq!(NormalizedId::from_optional(Some("A B")).as_str(), "a_b");
        assert!(normalize("!!!").is_empty());
    }

    #[test]
    fn tokens_skip_empty_segments() {
        let id = normalize("_tormach__1100mx_");
        let tokens: Vec<_> = id.tokens().collect();
        assert_eq!(tokens, vec!["tormach", "1100mx"]);
    }

    #[test]
    fn deserialize_normalizes() {
        let id: NormalizedId = serde_json::from_str("\"Hurco VM-50 i\"").unwrap();
        assert_eq!(id.as_str(), "hurco_vm_50_i");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hurco_vm_50_i\"");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in any::<String>()) {
            let once = normalize(&raw);
            let twice = normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_output_alphabet(raw in any::<String>()) {
            let id = normalize(&raw);
            prop_assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
