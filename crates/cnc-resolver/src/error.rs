//! Error types for the resolver
//!
//! Resolution itself never fails. Errors exist at two seams:
//! - Provider lookups (recovered by the chain, never surfaced to callers)
//! - Configuration loading

use crate::descriptor::ProviderRank;

/// Error raised by a single provider lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Backing store could not be read
    #[error("provider '{provider}' unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    /// Stored record could not be turned into a descriptor
    #[error("provider '{provider}' returned corrupt record for '{id}': {reason}")]
    CorruptRecord {
        provider: String,
        id: String,
        reason: String,
    },

    /// Any other provider-specific failure
    #[error("provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Create unavailable error for provider
    pub fn unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create corrupt record error
    pub fn corrupt_record(
        provider: impl Into<String>,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CorruptRecord {
            provider: provider.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors while loading or validating resolver configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML document could not be parsed
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its accepted range
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors while assembling a provider chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The fallback tier cannot hold lookup providers
    #[error("rank {0} is reserved for the fallback provider")]
    ReservedRank(ProviderRank),

    /// No fallback provider was supplied
    #[error("provider chain requires a fallback provider")]
    MissingFallback,
}

/// Result type alias for provider lookups
pub type ProviderResult<T> = Result<T, ProviderError>;
