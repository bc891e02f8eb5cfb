//! Standard provider set
//!
//! Wires the four tiers from a [`CatalogConfig`] while keeping shared handles
//! to the mutable stores, so callers can upload overrides or record learned
//! data after the chain is built.

use crate::config::CatalogConfig;
use crate::error::CatalogResult;
use crate::learned::LearnedStore;
use crate::overrides::UserOverrideStore;
use crate::procedural::ProceduralGenerator;
use crate::static_catalog::StaticCatalog;
use cnc_resolver::{ProviderChain, ProviderChainBuilder};
use std::sync::Arc;

/// Handles to the standard providers
#[derive(Debug, Clone)]
pub struct StandardProviders {
    /// Rank 1
    pub overrides: Arc<UserOverrideStore>,
    /// Rank 2, queried in order
    pub catalogs: Vec<Arc<StaticCatalog>>,
    /// Rank 3
    pub learned: Arc<LearnedStore>,
}

impl StandardProviders {
    /// Empty stores and the given catalogs
    #[must_use]
    pub fn new(catalogs: Vec<StaticCatalog>, learned_min_confidence: f32) -> Self {
        Self {
            overrides: Arc::new(UserOverrideStore::new()),
            catalogs: catalogs.into_iter().map(Arc::new).collect(),
            learned: Arc::new(LearnedStore::new(learned_min_confidence)),
        }
    }

    /// Load every configured catalog
    ///
    /// # Errors
    /// Invalid configuration or the first catalog that fails to load.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        let catalogs = config
            .catalogs
            .iter()
            .map(StaticCatalog::from_path)
            .collect::<CatalogResult<Vec<_>>>()?;

        tracing::info!(catalogs = catalogs.len(), "standard providers loaded");
        Ok(Self::new(catalogs, config.learned_min_confidence))
    }

    /// Chain builder with every tier registered and the procedural fallback
    ///
    /// Further settings (e.g. the event sink) can be added before `build`.
    #[must_use]
    pub fn chain_builder(&self) -> ProviderChainBuilder {
        let builder = ProviderChain::builder().user_override(self.overrides.clone());
        self.catalogs
            .iter()
            .fold(builder, |b, catalog| b.oem_record(catalog.clone()))
            .learned(self.learned.clone())
            .fallback(ProceduralGenerator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_catalog::CatalogRecord;
    use cnc_resolver::ProviderRank;

    #[test]
    fn chain_lists_tiers_in_order() {
        let oem = StaticCatalog::from_records("oem", vec![CatalogRecord::new("a")]).unwrap();
        let providers = StandardProviders::new(vec![oem], 0.5);

        let chain = providers.chain_builder().build().unwrap();
        let described = chain.describe();

        assert_eq!(
            described,
            vec![
                (ProviderRank::UserOverride, "user_override".to_string()),
                (ProviderRank::OemRecord, "oem".to_string()),
                (ProviderRank::Learned, "learned".to_string()),
                (ProviderRank::Procedural, "procedural".to_string()),
            ]
        );
    }

    #[test]
    fn from_config_without_catalogs() {
        let providers = StandardProviders::from_config(&CatalogConfig::new()).unwrap();
        assert!(providers.catalogs.is_empty());
        assert!(providers.overrides.is_empty());
    }
}
