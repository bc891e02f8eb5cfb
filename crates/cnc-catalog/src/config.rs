//! Catalog configuration

use crate::error::{CatalogError, CatalogResult};
use crate::learned::LearnedStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which catalogs to load and how to treat learned data
///
/// ```toml
/// catalogs = ["data/hurco.toml", "data/haas.json"]
/// learned_min_confidence = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// OEM catalog files, queried in listed order
    pub catalogs: Vec<PathBuf>,

    /// Learned entries below this confidence are ignored
    pub learned_min_confidence: f32,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an additional catalog file
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalogs.push(path.into());
        self
    }

    /// With learned confidence floor
    #[inline]
    #[must_use]
    pub fn with_learned_min_confidence(mut self, floor: f32) -> Self {
        self.learned_min_confidence = floor;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`CatalogError`] on malformed TOML or out-of-range values.
    pub fn from_toml_str(source: &str) -> CatalogResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidConfig`] if the confidence floor is not
    /// within `[0, 1]`.
    pub fn validate(&self) -> CatalogResult<()> {
        if !(0.0..=1.0).contains(&self.learned_min_confidence) {
            return Err(CatalogError::InvalidConfig {
                field: "learned_min_confidence",
                reason: format!("{} is outside [0, 1]", self.learned_min_confidence),
            });
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalogs: Vec::new(),
            learned_min_confidence: LearnedStore::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CatalogConfig::new();
        assert!(config.catalogs.is_empty());
        assert!((config.learned_min_confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn parses_toml() {
        let config = CatalogConfig::from_toml_str(
            "catalogs = [\"a.json\", \"b.toml\"]\nlearned_min_confidence = 0.75\n",
        )
        .unwrap();
        assert_eq!(config.catalogs, vec![PathBuf::from("a.json"), PathBuf::from("b.toml")]);
        assert!((config.learned_min_confidence - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_floor() {
        let err = CatalogConfig::from_toml_str("learned_min_confidence = 1.5").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig { field: "learned_min_confidence", .. }));
    }

    #[test]
    fn rejects_nan_floor() {
        let config = CatalogConfig::new().with_learned_min_confidence(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_appends_catalogs() {
        let config = CatalogConfig::new().with_catalog("x.yaml").with_catalog("y.yml");
        assert_eq!(config.catalogs.len(), 2);
    }
}
