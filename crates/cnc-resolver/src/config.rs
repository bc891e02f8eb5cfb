//! Resolver configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Resolver configuration
///
/// Can be built in code with the `with_*` methods or read from TOML:
///
/// ```toml
/// cache_capacity = 5000
/// coalesce_in_flight = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Upper bound on cached results; `None` keeps every entry for the
    /// lifetime of the resolver
    pub cache_capacity: Option<u64>,

    /// Concurrent misses on one key wait for a single chain run
    pub coalesce_in_flight: bool,
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cache capacity bound
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// With in-flight coalescing enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_coalescing(mut self, coalesce: bool) -> Self {
        self.coalesce_in_flight = coalesce;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`ConfigError`] on malformed TOML or out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a zero cache capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cache_capacity",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_capacity: None,
            coalesce_in_flight: true,
        }
    }
}
